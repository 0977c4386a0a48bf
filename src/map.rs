//! Value-keyed dictionary: keys map to arbitrary external values.
//!
//! [`KeywordMap`] stores its values and the keys' char counts in side
//! vectors, indexed by the id the automaton carries as its payload. The
//! key strings themselves are not retained.
//!
//! Repeated [`KeywordMap::insert`] calls for one key append a fresh
//! (value, length) pair and point the trie at it; the earlier pair stays
//! allocated but unreachable. [`KeywordMap::replace`] updates in place
//! and leaves no dead pair behind.

use crate::automaton::matcher::{start_offset, word_bounded, Match, RawMatches};
use crate::automaton::{Automaton, Options};
use crate::error::{Error, Result};

/// A key→value dictionary with Aho–Corasick matching over haystacks.
///
/// ```
/// use hayrake::KeywordMap;
///
/// let mut map = KeywordMap::new();
/// map.insert("np", "no problem")?;
/// map.insert("ty", "thank you")?;
/// map.build()?;
///
/// let found: Vec<_> = map
///     .find_iter("It was np, ty though.")?
///     .map(|(_, v)| *v)
///     .collect();
/// assert_eq!(found, vec!["no problem", "thank you"]);
/// # Ok::<(), hayrake::Error>(())
/// ```
#[derive(Debug)]
pub struct KeywordMap<V> {
    automaton: Automaton,
    values: Vec<V>,
    lengths: Vec<u32>,
    keys: usize,
}

impl<V> KeywordMap<V> {
    pub fn new() -> Self {
        Self::with_options(Options::new())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            automaton: Automaton::new(options),
            values: Vec::new(),
            lengths: Vec::new(),
            keys: 0,
        }
    }

    /// Associate `key` with `value`. Inserting an existing key updates
    /// the live value; the previous pair becomes dead but is not freed.
    ///
    /// Unlike [`KeywordSet`](crate::KeywordSet), a case-insensitive map
    /// accepts keys containing a char whose lowercase form is longer than
    /// one char (such as U+0130). Folding leaves such a char unchanged on
    /// both the key and the haystack side, so it matches only its literal
    /// self, never its case variants; spans are unaffected.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyKey`] for the empty string, [`Error::AlreadyBuilt`]
    /// after [`KeywordMap::build`].
    pub fn insert(&mut self, key: &str, value: V) -> Result<()> {
        let existed = self.automaton.contains(key);
        let id = self.values.len() as i32;
        self.automaton.add_entry(key, id)?;
        self.values.push(value);
        self.lengths.push(key.chars().count() as u32);
        if !existed {
            self.keys += 1;
        }
        Ok(())
    }

    /// The live value for `key`, if any. Usable at any build stage.
    pub fn get(&self, key: &str) -> Option<&V> {
        let id = self.automaton.value_of(key)?;
        Some(&self.values[id as usize])
    }

    /// Overwrite the value of an existing key in place, avoiding the dead
    /// pair [`KeywordMap::insert`] would leave behind. Returns whether an
    /// existing value was overwritten; with `insert_if_missing` an absent
    /// key is inserted instead (still returning `false`).
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyBuilt`] after [`KeywordMap::build`], and insertion
    /// errors when `insert_if_missing` applies.
    pub fn replace(&mut self, key: &str, value: V, insert_if_missing: bool) -> Result<bool> {
        if self.automaton.is_built() {
            return Err(Error::AlreadyBuilt);
        }
        match self.automaton.value_of(key) {
            Some(id) => {
                self.values[id as usize] = value;
                Ok(true)
            }
            None => {
                if insert_if_missing {
                    self.insert(key, value)?;
                }
                Ok(false)
            }
        }
    }

    /// Freeze the map and construct the match links. Required before
    /// [`KeywordMap::find_iter`]; mutation is rejected afterwards.
    pub fn build(&mut self) -> Result<()> {
        self.automaton.build()
    }

    /// Stream every occurrence of every key in `haystack` together with
    /// its live value, ordered by end offset ascending and, within one
    /// end offset, by length descending.
    ///
    /// # Errors
    ///
    /// [`Error::NotBuilt`] before [`KeywordMap::build`]. Iteration itself
    /// never fails.
    pub fn find_iter<'s, 'h>(&'s self, haystack: &'h str) -> Result<MatchesWith<'s, 'h, V>> {
        if !self.automaton.is_built() {
            return Err(Error::NotBuilt);
        }
        Ok(MatchesWith {
            raw: RawMatches::new(&self.automaton, haystack),
            haystack,
            whole_words: self.automaton.whole_words_only(),
            values: &self.values,
            lengths: &self.lengths,
        })
    }

    /// Whether `key` is in the map. Usable at any build stage.
    pub fn contains(&self, key: &str) -> bool {
        self.automaton.contains(key)
    }

    /// Number of distinct keys (dead pairs from repeated inserts do not
    /// count).
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

    /// Approximate heap usage of the automaton and the side vectors.
    pub fn heap_bytes(&self) -> usize {
        self.automaton.heap_bytes()
            + self.values.capacity() * std::mem::size_of::<V>()
            + self.lengths.capacity() * std::mem::size_of::<u32>()
    }
}

impl<V> Default for KeywordMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy match stream over one haystack; see [`KeywordMap::find_iter`].
pub struct MatchesWith<'a, 'h, V> {
    raw: RawMatches<'a, 'h>,
    haystack: &'h str,
    whole_words: bool,
    values: &'a [V],
    lengths: &'a [u32],
}

impl<'a, 'h, V> Iterator for MatchesWith<'a, 'h, V> {
    type Item = (Match<'h>, &'a V);

    fn next(&mut self) -> Option<(Match<'h>, &'a V)> {
        loop {
            let raw = self.raw.next()?;
            let id = raw.payload as usize;
            let start = start_offset(self.haystack, raw.end, self.lengths[id] as usize);
            if self.whole_words && !word_bounded(self.haystack, start, raw.end) {
                continue;
            }
            let m = Match {
                start,
                end: raw.end,
                text: &self.haystack[start..raw.end],
            };
            return Some((m, &self.values[id]));
        }
    }
}
