//! Five-field node table with atomic cross-field growth.
//!
//! Every node is an index shared by five parallel vectors. The fields are
//! overloaded across the automaton's lifecycle:
//!
//! | field  | while inserting          | after build            |
//! |--------|--------------------------|------------------------|
//! | base   | child offset base        | unchanged              |
//! | parent | owner index, or free     | unchanged              |
//! | value  | payload at key end       | unchanged              |
//! | aux1   | next-sibling offset      | failure link           |
//! | aux2   | first-child offset       | prefix link            |
//!
//! During link construction `aux1` briefly serves a third role as the
//! next-pointer of an in-place BFS queue; see the build module.
//!
//! A slot is occupied iff its parent field is not [`RESERVED`]. The root
//! (index 0) is the one exception: its parent is itself.

use crate::store::vector::IntVec;
use crate::store::RESERVED;

#[derive(Debug)]
pub(crate) struct NodeStore {
    base: IntVec,
    parent: IntVec,
    value: IntVec,
    aux1: IntVec,
    aux2: IntVec,
}

impl NodeStore {
    pub(crate) fn new() -> Self {
        Self {
            base: IntVec::chunked(RESERVED),
            parent: IntVec::chunked(RESERVED),
            value: IntVec::chunked(RESERVED),
            aux1: IntVec::chunked(RESERVED),
            aux2: IntVec::chunked(RESERVED),
        }
    }

    /// One past the highest node index ever written.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.base.len()
    }

    #[inline]
    pub(crate) fn base(&self, index: usize) -> i32 {
        self.base.safe_get(index)
    }

    #[inline]
    pub(crate) fn parent(&self, index: usize) -> i32 {
        self.parent.safe_get(index)
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> i32 {
        self.value.safe_get(index)
    }

    #[inline]
    pub(crate) fn aux1(&self, index: usize) -> i32 {
        self.aux1.safe_get(index)
    }

    #[inline]
    pub(crate) fn aux2(&self, index: usize) -> i32 {
        self.aux2.safe_get(index)
    }

    #[inline]
    pub(crate) fn set_base(&mut self, index: usize, value: i32) {
        self.base.set(index, value);
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, index: usize, value: i32) {
        self.parent.set(index, value);
    }

    #[inline]
    pub(crate) fn set_value(&mut self, index: usize, value: i32) {
        self.value.set(index, value);
    }

    #[inline]
    pub(crate) fn set_aux1(&mut self, index: usize, value: i32) {
        self.aux1.set(index, value);
    }

    #[inline]
    pub(crate) fn set_aux2(&mut self, index: usize, value: i32) {
        self.aux2.set(index, value);
    }

    /// Write all five fields of a node at once, keeping the vectors the
    /// same length. Only the first write probes for growth; when it does
    /// not grow, the rest can take the cheap non-growing path.
    pub(crate) fn write_all(
        &mut self,
        index: usize,
        base: i32,
        parent: i32,
        value: i32,
        aux1: i32,
        aux2: i32,
    ) {
        if self.base.safe_set(index, base) {
            self.parent.safe_set(index, parent);
            self.value.safe_set(index, value);
            self.aux1.safe_set(index, aux1);
            self.aux2.safe_set(index, aux2);
        } else {
            self.parent.set(index, parent);
            self.value.set(index, value);
            self.aux1.set(index, aux1);
            self.aux2.set(index, aux2);
        }
    }

    /// One-time switch from chunked to contiguous backing. The lengths are
    /// final at this point, so each copy is allocated exactly.
    pub(crate) fn freeze(&mut self) {
        self.base.freeze();
        self.parent.freeze();
        self.value.freeze();
        self.aux1.freeze();
        self.aux2.freeze();
    }

    /// Approximate heap usage of the five field vectors.
    pub(crate) fn heap_bytes(&self) -> usize {
        self.base.heap_bytes()
            + self.parent.heap_bytes()
            + self.value.heap_bytes()
            + self.aux1.heap_bytes()
            + self.aux2.heap_bytes()
    }
}
