//! The match-time state machine.
//!
//! Matching is a pull: each call to the iterator consumes haystack chars
//! until a keyed node is reached, then drains that position's prefix-link
//! chain before consuming further input. The deepest match at a position
//! comes out first, so the stream is ordered by end offset ascending and,
//! within one end offset, by length descending.
//!
//! The raw stream carries `(end, payload)` pairs; the dictionary front
//! ends decide what a payload means (a key length, or an id into side
//! tables) and turn it into a user-facing match.

use std::str::CharIndices;

use crate::automaton::{at, Automaton, ROOT};
use crate::store::RESERVED;

/// A single occurrence of a key in the haystack.
///
/// `start` and `end` are byte offsets into the original haystack, so
/// `&haystack[m.start..m.end]` is exactly the matched text, which is also
/// carried in `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'h> {
    /// Byte offset of the first matched char.
    pub start: usize,
    /// Byte offset one past the last matched char.
    pub end: usize,
    /// The matched slice of the haystack.
    pub text: &'h str,
}

/// An `(end, payload)` candidate produced by the raw stream.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawMatch {
    pub(crate) end: usize,
    pub(crate) payload: i32,
}

/// Lazy stream of raw matches. One instance per `find_iter` call; it
/// borrows the automaton read-only and owns its entire walk state, so
/// independent streams never interfere.
pub(crate) struct RawMatches<'a, 'h> {
    automaton: &'a Automaton,
    chars: CharIndices<'h>,
    state: i32,
    /// Next node on the current position's prefix chain, or RESERVED when
    /// the chain is drained and input must advance.
    pending: i32,
    /// Byte offset one past the char consumed last.
    end: usize,
}

impl<'a, 'h> RawMatches<'a, 'h> {
    pub(crate) fn new(automaton: &'a Automaton, haystack: &'h str) -> Self {
        Self {
            automaton,
            chars: haystack.char_indices(),
            state: ROOT,
            pending: RESERVED,
            end: 0,
        }
    }
}

impl Iterator for RawMatches<'_, '_> {
    type Item = RawMatch;

    fn next(&mut self) -> Option<RawMatch> {
        loop {
            if self.pending == RESERVED {
                let (pos, ch) = self.chars.next()?;
                let unit = self.automaton.fold(ch) as i32;
                self.end = pos + ch.len_utf8();
                self.state = self.automaton.step(self.state, unit);
                self.pending = self.automaton.nodes.aux2(at(self.state));
                let value = self.automaton.nodes.value(at(self.state));
                if value != RESERVED {
                    return Some(RawMatch {
                        end: self.end,
                        payload: value,
                    });
                }
            } else {
                // Every node on the prefix chain is keyed by construction.
                let value = self.automaton.nodes.value(at(self.pending));
                self.pending = self.automaton.nodes.aux2(at(self.pending));
                return Some(RawMatch {
                    end: self.end,
                    payload: value,
                });
            }
        }
    }
}

impl Automaton {
    /// Advance one code unit: follow the child edge if it exists, else
    /// chase failure links until one does or the root absorbs the unit.
    #[inline]
    pub(crate) fn step(&self, mut state: i32, unit: i32) -> i32 {
        loop {
            let target = self.nodes.base(at(state)) + unit;
            if self.nodes.parent(at(target)) == state {
                return target;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.nodes.aux1(at(state));
        }
    }
}

/// Step back `char_len` chars from byte offset `end`.
///
/// Exact because folding is one-to-one in char count: the stored key
/// length counts chars of the folded key, which equals the chars of the
/// haystack span that matched it.
pub(crate) fn start_offset(haystack: &str, end: usize, char_len: usize) -> usize {
    let mut start = end;
    for _ in 0..char_len {
        start -= 1;
        while !haystack.is_char_boundary(start) {
            start -= 1;
        }
    }
    start
}

/// Whole-word check: the char before `start` and the char at `end` must
/// be whitespace; the ends of the haystack count as boundaries.
pub(crate) fn word_bounded(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    let after = haystack[end..]
        .chars()
        .next()
        .map_or(true, char::is_whitespace);
    before && after
}
