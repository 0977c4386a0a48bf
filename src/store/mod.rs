//! Backing storage for the automaton.
//!
//! - [`vector`] - growable `i32` stores (chunked while building, flat after)
//! - [`nodes`] - the five parallel node-field vectors
//! - [`free_slots`] - bounded cache of slots vacated by relocation
//!
//! Everything here is index-based; no pointers, no per-node allocation. A
//! node is nothing but the same index into five vectors.

pub(crate) mod free_slots;
pub(crate) mod nodes;
pub(crate) mod vector;

pub(crate) use free_slots::FreeSlotCache;
pub(crate) use nodes::NodeStore;

/// Sentinel for "absent" in every node field. Also the reason node fields
/// are `i32` rather than `u32`: the sentinel must never collide with a
/// valid index, offset, or stored value.
pub(crate) const RESERVED: i32 = i32::MIN;
