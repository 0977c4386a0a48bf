//! # hayrake - low-memory multi-pattern string matching
//!
//! hayrake finds every occurrence of any key from a prebuilt dictionary
//! inside a haystack, reporting each match's byte span and an associated
//! value. The engine is an Aho–Corasick automaton over a modified
//! double-array trie: every node costs roughly five 32-bit integers, and
//! peak construction memory sits about 20% above the frozen footprint.
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! - `automaton` - the trie/automaton engine (insertion, link
//!   construction, the match state machine)
//! - `store` - node storage: chunked-then-contiguous field vectors and the
//!   free-slot cache that keeps the table dense
//! - [`set`] - [`KeywordSet`], the front end where each key is its own
//!   match value
//! - [`map`] - [`KeywordMap`], the front end mapping keys to arbitrary
//!   values
//!
//! ## Quick start
//!
//! ```
//! use hayrake::{KeywordSet, Options};
//!
//! let mut set = KeywordSet::with_options(Options {
//!     case_insensitive: true,
//!     ..Options::default()
//! });
//! set.insert_all(["cat", "at"])?;
//! set.build()?;
//!
//! for m in set.find_iter("Bobcat!")? {
//!     println!("{}..{} {:?}", m.start, m.end, m.text);
//! }
//! # Ok::<(), hayrake::Error>(())
//! ```
//!
//! ## Guarantees
//!
//! - Matching is lazy: results are produced one at a time as the haystack
//!   is consumed, ordered by end offset ascending and, within one end
//!   offset, by length descending (every suffix key at a position is
//!   reported).
//! - A built dictionary is immutable; any number of match iterators can
//!   run against it independently.
//! - Construction memory stays low: node fields live in fixed-size chunks
//!   while inserting and are copied once into exact-size flat arrays at
//!   [`KeywordSet::build`] time.

pub mod error;
pub mod map;
pub mod set;

mod automaton;
mod store;

pub use automaton::matcher::Match;
pub use automaton::Options;
pub use error::{Error, Result};
pub use map::{KeywordMap, MatchesWith};
pub use set::{KeywordSet, Matches};
