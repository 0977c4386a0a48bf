//! End-to-end matching scenarios through the public dictionary API.
//!
//! These tests pin down the observable contract: which occurrences are
//! reported, in which order, with which spans and values, and how the
//! case-folding and whole-word options change that.

use hayrake::{Error, KeywordMap, KeywordSet, Options};

fn built_set(keys: &[&str], options: Options) -> KeywordSet {
    let mut set = KeywordSet::with_options(options);
    set.insert_all(keys).expect("insert");
    set.build().expect("build");
    set
}

fn found(set: &KeywordSet, haystack: &str) -> Vec<(usize, usize, String)> {
    set.find_iter(haystack)
        .expect("find_iter")
        .map(|m| (m.start, m.end, m.text.to_owned()))
        .collect()
}

#[test]
fn reports_nested_suffix_keys_longest_first() {
    let set = built_set(&["bobcat", "cat", "at"], Options::new());
    assert_eq!(
        found(&set, "I have a bobcat"),
        vec![
            (9, 15, "bobcat".to_owned()),
            (12, 15, "cat".to_owned()),
            (13, 15, "at".to_owned()),
        ]
    );
}

#[test]
fn orders_by_end_ascending_then_length_descending() {
    let set = built_set(&["cat", "at", "catapult", "tap", "a", "t"], Options::new());
    assert_eq!(
        found(&set, "catapult"),
        vec![
            (1, 2, "a".to_owned()),
            (0, 3, "cat".to_owned()),
            (1, 3, "at".to_owned()),
            (2, 3, "t".to_owned()),
            (3, 4, "a".to_owned()),
            (2, 5, "tap".to_owned()),
            (0, 8, "catapult".to_owned()),
            (7, 8, "t".to_owned()),
        ]
    );
}

#[test]
fn overlapping_keys_are_both_reported() {
    let set = built_set(&["baby", "byte"], Options::new());
    assert_eq!(
        found(&set, "babyte"),
        vec![(0, 4, "baby".to_owned()), (2, 6, "byte".to_owned())]
    );
}

#[test]
fn case_sensitive_by_default() {
    let set = built_set(&["cAt", "CaT"], Options::new());
    assert_eq!(
        found(&set, "CAT CaT CAt Cat cAT caT cAt cat"),
        vec![(4, 7, "CaT".to_owned()), (24, 27, "cAt".to_owned())]
    );
}

#[test]
fn whole_words_only_accepts_whitespace_and_edges() {
    let set = built_set(
        &["Expected", "Double Expected", "Exp"],
        Options {
            whole_words_only: true,
            ..Options::default()
        },
    );
    let haystack =
        "Double Expected\tnotExpected notDouble\rExpected Expected\nExpectedNot Exp";
    let starts: Vec<usize> = set
        .find_iter(haystack)
        .unwrap()
        .map(|m| m.start)
        .collect();
    assert_eq!(starts, vec![0, 7, 38, 47, 68]);
}

#[test]
fn map_yields_values_in_match_order() {
    let mut map = KeywordMap::new();
    map.insert("np", "no problem").unwrap();
    map.insert("ty", "thank you").unwrap();
    map.build().unwrap();
    let values: Vec<&str> = map
        .find_iter("It was np, ty though.")
        .unwrap()
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(values, vec!["no problem", "thank you"]);
}

#[test]
fn case_insensitive_set_returns_haystack_casing() {
    let set = built_set(
        &["expected"],
        Options {
            case_insensitive: true,
            ..Options::default()
        },
    );
    assert_eq!(
        found(&set, "ExPeCtEd expected EXPECTED"),
        vec![
            (0, 8, "ExPeCtEd".to_owned()),
            (9, 17, "expected".to_owned()),
            (18, 26, "EXPECTED".to_owned()),
        ]
    );
}

#[test]
fn case_insensitive_map_can_carry_original_key_casing() {
    let mut map = KeywordMap::with_options(Options {
        case_insensitive: true,
        ..Options::default()
    });
    for key in ["McIntosh", "LaTeX"] {
        map.insert(key, key).unwrap();
    }
    map.build().unwrap();
    let pairs: Vec<(&str, &str)> = map
        .find_iter("mcintosh latex")
        .unwrap()
        .map(|(m, v)| (m.text, *v))
        .collect();
    assert_eq!(pairs, vec![("mcintosh", "McIntosh"), ("latex", "LaTeX")]);
}

#[test]
fn empty_haystack_yields_nothing() {
    let set = built_set(&["x"], Options::new());
    assert_eq!(set.find_iter("").unwrap().count(), 0);
}

#[test]
fn empty_dictionary_yields_nothing() {
    let mut set = KeywordSet::new();
    set.build().unwrap();
    assert_eq!(set.find_iter("any text").unwrap().count(), 0);
    assert_eq!(set.node_count(), 1);
}

#[test]
fn multibyte_keys_report_byte_spans() {
    let set = built_set(&["żółw", "łw", "日本"], Options::new());
    let haystack = "ten żółw, 日本語";
    let matches = found(&set, haystack);
    for (start, end, text) in &matches {
        assert_eq!(&haystack[*start..*end], text);
    }
    let texts: Vec<&str> = matches.iter().map(|(_, _, t)| t.as_str()).collect();
    assert_eq!(texts, vec!["żółw", "łw", "日本"]);
}

#[test]
fn insertion_order_does_not_change_results() {
    let keys = ["he", "she", "his", "hers", "usher", "s", "h"];
    let haystack = "ushers say shh";
    let forward = built_set(&keys, Options::new());
    let mut reversed_keys = keys;
    reversed_keys.reverse();
    let reversed = built_set(&reversed_keys, Options::new());
    assert_eq!(found(&forward, haystack), found(&reversed, haystack));
}

#[test]
fn awkward_base_offsets_still_build() {
    // The second key collides with sibling sets placed by the first at
    // the low end of the index space.
    let set = built_set(&["cab", "aa"], Options::new());
    assert_eq!(
        found(&set, "cabaa"),
        vec![(0, 3, "cab".to_owned()), (3, 5, "aa".to_owned())]
    );
}

#[test]
fn node_count_includes_root_and_shared_prefixes() {
    let set = built_set(&["cat", "catapult", "cats"], Options::new());
    // root + c,a,t + a,p,u,l,t + s
    assert_eq!(set.node_count(), 10);
}

#[test]
fn state_errors_on_misuse() {
    let mut set = KeywordSet::new();
    set.insert("key").unwrap();
    assert!(matches!(set.find_iter("key"), Err(Error::NotBuilt)));
    set.build().unwrap();
    assert_eq!(set.build(), Err(Error::AlreadyBuilt));
    assert_eq!(set.insert("other"), Err(Error::AlreadyBuilt));

    let mut map: KeywordMap<u32> = KeywordMap::new();
    map.insert("key", 1).unwrap();
    map.build().unwrap();
    assert_eq!(map.insert("other", 2), Err(Error::AlreadyBuilt));
    assert_eq!(map.replace("key", 3, true), Err(Error::AlreadyBuilt));
}

#[test]
fn heap_usage_is_reported_and_modest() {
    let mut set = KeywordSet::new();
    for i in 0..1000 {
        set.insert(&format!("key{i:04}")).unwrap();
    }
    set.build().unwrap();
    let per_node = set.heap_bytes() / set.node_count();
    // Five i32 fields are 20 bytes; the table may carry some slack from
    // collision-driven relocation, but it must stay the same order.
    assert!(per_node >= 20, "five fields are 20 bytes, got {per_node}");
    assert!(per_node < 80, "per-node footprint too high: {per_node}");
}

#[test]
fn whitespace_variants_count_as_word_boundaries() {
    let set = built_set(
        &["mark"],
        Options {
            whole_words_only: true,
            ..Options::default()
        },
    );
    for haystack in [
        "mark", "mark ", " mark", "a mark\tb", "x\nmark\ry", "\u{a0}mark\u{a0}",
    ] {
        assert_eq!(
            set.find_iter(haystack).unwrap().count(),
            1,
            "haystack {haystack:?}"
        );
    }
    for haystack in ["marker", "remark", "re-mark-er", "markmark"] {
        assert_eq!(
            set.find_iter(haystack).unwrap().count(),
            0,
            "haystack {haystack:?}"
        );
    }
}
