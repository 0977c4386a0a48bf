#![no_main]

use libfuzzer_sys::fuzz_target;

use hayrake::{KeywordSet, Options};

fuzz_target!(|data: &[u8]| {
    // First byte selects the options; the rest is newline-separated keys
    // followed by the haystack.
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let mut parts: Vec<&str> = text.split('\n').collect();
    let haystack = parts.pop().unwrap_or("");

    let mut set = KeywordSet::with_options(Options {
        case_insensitive: flags & 1 != 0,
        whole_words_only: flags & 2 != 0,
    });
    for key in parts {
        // Empty and length-changing keys are rejected; that is fine here,
        // the target only cares that nothing panics.
        let _ = set.insert(key);
    }
    set.build().unwrap();

    for m in set.find_iter(haystack).unwrap() {
        assert!(m.start <= m.end && m.end <= haystack.len());
        assert!(haystack.is_char_boundary(m.start));
        assert!(haystack.is_char_boundary(m.end));
        assert_eq!(&haystack[m.start..m.end], m.text);
    }
});
