//! String-keyed dictionary: every key is its own match value.
//!
//! [`KeywordSet`] never retains the key strings. The automaton stores each
//! key's char count as its payload; a match's start is derived by stepping
//! that many chars back from its end, and the reported text is the slice
//! of the *haystack*. In case-insensitive mode that means the haystack's
//! casing, not the key's.

use crate::automaton::matcher::{start_offset, word_bounded, Match, RawMatches};
use crate::automaton::{lowers_to_single_scalar, Automaton, Options};
use crate::error::{Error, Result};

/// A set of keys with Aho–Corasick matching over haystacks.
///
/// ```
/// use hayrake::KeywordSet;
///
/// let mut set = KeywordSet::new();
/// set.insert_all(["bobcat", "cat", "at"])?;
/// set.build()?;
///
/// let matches: Vec<_> = set.find_iter("I have a bobcat")?.collect();
/// assert_eq!(matches[0].text, "bobcat");
/// assert_eq!((matches[1].start, matches[1].end), (12, 15));
/// # Ok::<(), hayrake::Error>(())
/// ```
#[derive(Debug)]
pub struct KeywordSet {
    automaton: Automaton,
    keys: usize,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::with_options(Options::new())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            automaton: Automaton::new(options),
            keys: 0,
        }
    }

    /// Add a key. Re-adding a key the set already holds is a no-op.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyKey`] for the empty string.
    /// - [`Error::AlreadyBuilt`] after [`KeywordSet::build`].
    /// - [`Error::LengthChangingKey`] in case-insensitive mode for keys
    ///   with a char whose lowercase form is longer than one char; those
    ///   would break the length-based start derivation.
    pub fn insert(&mut self, key: &str) -> Result<()> {
        if self.automaton.is_built() {
            return Err(Error::AlreadyBuilt);
        }
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        if self.automaton.case_insensitive() && !key.chars().all(lowers_to_single_scalar) {
            return Err(Error::LengthChangingKey {
                key: key.to_owned(),
            });
        }
        if self.automaton.contains(key) {
            return Ok(());
        }
        let char_len = key.chars().count() as i32;
        self.automaton.add_entry(key, char_len)?;
        self.keys += 1;
        Ok(())
    }

    /// Add every key of an iterator; stops at the first error.
    pub fn insert_all<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.insert(key.as_ref())?;
        }
        Ok(())
    }

    /// Freeze the set and construct the match links. Required before
    /// [`KeywordSet::find_iter`]; insertion is rejected afterwards.
    pub fn build(&mut self) -> Result<()> {
        self.automaton.build()
    }

    /// Stream every occurrence of every key in `haystack`, ordered by end
    /// offset ascending and, within one end offset, by length descending.
    ///
    /// # Errors
    ///
    /// [`Error::NotBuilt`] before [`KeywordSet::build`]. Iteration itself
    /// never fails.
    pub fn find_iter<'s, 'h>(&'s self, haystack: &'h str) -> Result<Matches<'s, 'h>> {
        if !self.automaton.is_built() {
            return Err(Error::NotBuilt);
        }
        Ok(Matches {
            raw: RawMatches::new(&self.automaton, haystack),
            haystack,
            whole_words: self.automaton.whole_words_only(),
        })
    }

    /// Whether `key` is in the set. Usable at any build stage.
    pub fn contains(&self, key: &str) -> bool {
        self.automaton.contains(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys == 0
    }

    /// Total automaton nodes, root included.
    pub fn node_count(&self) -> usize {
        self.automaton.node_count()
    }

    pub fn is_built(&self) -> bool {
        self.automaton.is_built()
    }

    /// Approximate heap usage of the automaton in bytes.
    pub fn heap_bytes(&self) -> usize {
        self.automaton.heap_bytes()
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy match stream over one haystack; see [`KeywordSet::find_iter`].
pub struct Matches<'a, 'h> {
    raw: RawMatches<'a, 'h>,
    haystack: &'h str,
    whole_words: bool,
}

impl<'h> Iterator for Matches<'_, 'h> {
    type Item = Match<'h>;

    fn next(&mut self) -> Option<Match<'h>> {
        loop {
            let raw = self.raw.next()?;
            let start = start_offset(self.haystack, raw.end, raw.payload as usize);
            if self.whole_words && !word_bounded(self.haystack, start, raw.end) {
                continue;
            }
            return Some(Match {
                start,
                end: raw.end,
                text: &self.haystack[start..raw.end],
            });
        }
    }
}
