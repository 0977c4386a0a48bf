//! Trie insertion: descent, sibling-set relocation, free-slot search.
//!
//! Insertion walks the key one code unit at a time. Most steps either
//! descend into an existing child or claim a free slot; the interesting
//! case is a collision, where the slot `base[cur] + u` is already owned by
//! another parent. Resolution relocates the smaller of the two sibling
//! sets to a fresh base and leaves the vacated slots to the free-slot
//! cache, which later single-child insertions drain to keep the table
//! dense.
//!
//! This module relies on the sibling phase of `aux1`/`aux2`: `aux2[p]` is
//! the first-child offset of `p` and `aux1[c]` the next-sibling offset of
//! `c`, circular within one sibling set.

use crate::automaton::{at, collect_children, Automaton, ROOT};
use crate::error::{Error, Result};
use crate::store::RESERVED;

impl Automaton {
    /// Insert `key` with an `i32` payload, folding it if the automaton is
    /// case-insensitive. A repeated key overwrites its payload.
    ///
    /// The payload write is the last action, so a precondition failure
    /// leaves previously inserted keys untouched.
    pub(crate) fn add_entry(&mut self, key: &str, value: i32) -> Result<()> {
        if self.built {
            return Err(Error::AlreadyBuilt);
        }
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        let mut node = ROOT;
        for ch in key.chars() {
            let unit = self.fold(ch) as i32;
            node = self.descend(node, unit);
        }
        self.nodes.set_value(at(node), value);
        Ok(())
    }

    /// One descent step from `node` along code unit `unit`, creating the
    /// child if it does not exist yet.
    fn descend(&mut self, node: i32, unit: i32) -> i32 {
        let base = self.nodes.base(at(node));
        if base == RESERVED {
            // First child of this node: park it wherever a slot is free
            // and derive the base from that slot.
            let slot = self.find_single(unit);
            self.nodes.set_base(at(node), slot - unit);
            self.attach_child(slot, node);
            return slot;
        }

        let child = base + unit;
        let owner = self.nodes.parent(at(child));
        if owner == node {
            return child;
        }
        if owner == RESERVED {
            self.attach_child(child, node);
            return child;
        }

        // The slot belongs to another sibling set; move the smaller set
        // out of the way, then claim the now guaranteed free slot.
        let node = self.relocate(node, unit, child, owner);
        let child = self.nodes.base(at(node)) + unit;
        self.attach_child(child, node);
        child
    }

    /// Wire a new child into `parent`'s circular sibling list and write
    /// its node fields. `slot` must be free.
    fn attach_child(&mut self, slot: i32, parent: i32) {
        self.node_count += 1;
        let base = self.nodes.base(at(parent));
        let offset = slot - base;
        let first = self.nodes.aux2(at(parent));
        let sibling = if first == RESERVED {
            // Only child: the circular list is a self-loop.
            self.nodes.set_aux2(at(parent), offset);
            offset
        } else {
            // Splice right after the first child, O(1).
            let first_index = base + first;
            let after_first = self.nodes.aux1(at(first_index));
            self.nodes.set_aux1(at(first_index), offset);
            after_first
        };
        self.nodes
            .write_all(at(slot), RESERVED, parent, RESERVED, sibling, RESERVED);
    }

    /// Resolve a collision: `base[node] + unit` landed on `occupied`,
    /// which belongs to `owner`. Moves the smaller sibling set (ties move
    /// `node`'s own) to a fresh base and returns `node`, adjusted if it
    /// was itself among the relocated children.
    fn relocate(&mut self, node: i32, unit: i32, occupied: i32, owner: i32) -> i32 {
        let mut owner_set = std::mem::take(&mut self.scratch_far);
        let mut own_set = std::mem::take(&mut self.scratch_near);
        collect_children(&self.nodes, owner, &mut owner_set);
        collect_children(&self.nodes, node, &mut own_set);
        // The incoming child counts toward our side: the resolution must
        // end with a slot for it.
        own_set.push(unit);

        // `occupied` can be slot 0 when a zero base meets code unit zero;
        // the root's self-parent makes that slot look owned, and no
        // relocation of `owner` could ever free it.
        let move_own = occupied == ROOT || own_set.len() <= owner_set.len();

        let adjusted = if move_own {
            let new_base = self.find_multi(&own_set);
            // The new child does not exist yet; relocation moves only the
            // pre-existing children.
            own_set.pop();
            self.move_children(node, &own_set, new_base);
            node
        } else {
            own_set.pop();
            let was_child_of_owner = self.nodes.parent(at(node)) == owner;
            let old_base = self.nodes.base(at(owner));
            let new_base = self.find_multi(&owner_set);
            self.move_children(owner, &owner_set, new_base);
            if was_child_of_owner {
                // Our own slot moved along with the rest of the set.
                node + (new_base - old_base)
            } else {
                node
            }
        };

        self.scratch_far = owner_set;
        self.scratch_near = own_set;
        adjusted
    }

    /// Copy every child of `parent` (given by its `offsets`) to
    /// `new_base`, re-parent their own children, free the old slots and
    /// finally point `parent` at the new base.
    fn move_children(&mut self, parent: i32, offsets: &[i32], new_base: i32) {
        let old_base = self.nodes.base(at(parent));
        let mut grandchildren = std::mem::take(&mut self.scratch_kids);
        for &offset in offsets {
            let old_child = old_base + offset;
            let new_child = new_base + offset;

            // Children of the moved node keep their slots; only their
            // parent field must follow the move.
            collect_children(&self.nodes, old_child, &mut grandchildren);
            let child_base = self.nodes.base(at(old_child));
            for &grand in grandchildren.iter() {
                self.nodes.set_parent(at(child_base + grand), new_child);
            }

            let parent_field = self.nodes.parent(at(old_child));
            let value = self.nodes.value(at(old_child));
            let aux1 = self.nodes.aux1(at(old_child));
            let aux2 = self.nodes.aux2(at(old_child));
            self.nodes
                .write_all(at(new_child), child_base, parent_field, value, aux1, aux2);

            self.nodes.set_parent(at(old_child), RESERVED);
            if old_child < self.single_cursor {
                self.free.add(old_child);
            }
        }
        grandchildren.clear();
        self.scratch_kids = grandchildren;
        self.nodes.set_base(at(parent), new_base);
    }

    /// Find a free slot usable for code unit `unit` (so the derived base
    /// stays non-negative). Cached holes win; otherwise scan past the
    /// single-slot cursor.
    fn find_single(&mut self, unit: i32) -> i32 {
        let cached = self.free.pop_for(unit, &self.nodes);
        if cached != 0 {
            return cached;
        }
        if self.single_cursor < unit - 1 {
            self.single_cursor = unit - 1;
        }
        loop {
            self.single_cursor += 1;
            if self.nodes.parent(at(self.single_cursor)) == RESERVED {
                return self.single_cursor;
            }
        }
    }

    /// Find a base under which every offset in `offsets` is free.
    /// Sibling-set searches need a run of free slots and scan with their
    /// own cursor so the dense low end does not slow them down.
    fn find_multi(&mut self, offsets: &[i32]) -> i32 {
        if offsets.len() == 1 {
            let offset = offsets[0];
            return self.find_single(offset) - offset;
        }
        if self.multi_cursor < self.single_cursor {
            self.multi_cursor = self.single_cursor;
        }
        loop {
            self.multi_cursor += 1;
            let base = self.multi_cursor;
            if offsets
                .iter()
                .all(|&offset| self.nodes.parent(at(base + offset)) == RESERVED)
            {
                return base;
            }
        }
    }
}
