//! Freezing the store and constructing failure and prefix links.
//!
//! The BFS that orders link construction runs entirely inside the node
//! table: `aux1` is borrowed as a "next node to process" pointer, forming
//! a queue that is consumed at the head while children are appended at the
//! tail. A node's sibling information is read exactly once, before its own
//! `aux1`/`aux2` are overwritten, and a node's parent is always processed
//! before the node itself, which is what makes the failure recurrence
//! well-founded.
//!
//! Phases of `aux1` inside this module, per node:
//! sibling offset → queue next-pointer → failure link.

use crate::automaton::{at, collect_children, Automaton, ROOT};
use crate::error::{Error, Result};
use crate::store::RESERVED;

impl Automaton {
    /// Freeze the store and link the automaton. After this the node table
    /// is immutable and matching is allowed.
    pub(crate) fn build(&mut self) -> Result<()> {
        if self.built {
            return Err(Error::AlreadyBuilt);
        }
        self.nodes.freeze();
        if self.node_count > 1 {
            self.link();
        }
        self.built = true;
        Ok(())
    }

    fn link(&mut self) {
        let mut offsets = std::mem::take(&mut self.scratch_near);

        // Seed the queue with the root's children. Their links are fixed:
        // failure to the root, no keyed proper suffix.
        collect_children(&self.nodes, ROOT, &mut offsets);
        let root_base = self.nodes.base(at(ROOT));
        let head = root_base + offsets[0];
        let mut tail = RESERVED;
        for &offset in &offsets {
            let child = root_base + offset;
            if self.nodes.base(at(child)) == RESERVED {
                // Leaves get a real base so match arithmetic can always
                // form base + unit without probing.
                self.nodes.set_base(at(child), 0);
            }
            if tail != RESERVED {
                self.nodes.set_aux1(at(tail), child);
            }
            tail = child;
        }
        self.nodes.set_aux1(at(tail), RESERVED);

        // The root's first-child offset has served its purpose; from here
        // on `aux2` reads on the root must mean "no prefix link", both for
        // the recurrence below and for the match loop later.
        self.nodes.set_aux2(at(ROOT), RESERVED);

        let mut node = head;
        while node != RESERVED {
            // Enqueue the children before touching this node's fields;
            // their sibling chain is still intact.
            collect_children(&self.nodes, node, &mut offsets);
            let base = self.nodes.base(at(node));
            for &offset in &offsets {
                let child = base + offset;
                if self.nodes.base(at(child)) == RESERVED {
                    self.nodes.set_base(at(child), 0);
                }
                self.nodes.set_aux1(at(tail), child);
                self.nodes.set_aux1(at(child), RESERVED);
                tail = child;
            }

            let next = self.nodes.aux1(at(node));
            let parent = self.nodes.parent(at(node));
            let (fail, prefix) = if parent == ROOT {
                (ROOT, RESERVED)
            } else {
                let unit = node - self.nodes.base(at(parent));
                let fail = self.fail_target(parent, unit);
                // The failure target is strictly shallower, so its links
                // are already final.
                let prefix = if self.nodes.value(at(fail)) != RESERVED {
                    fail
                } else {
                    self.nodes.aux2(at(fail))
                };
                (fail, prefix)
            };
            self.nodes.set_aux1(at(node), fail);
            self.nodes.set_aux2(at(node), prefix);
            node = next;
        }

        offsets.clear();
        self.scratch_near = offsets;
    }

    /// Longest proper suffix of `parent`'s path extended by `unit` that
    /// exists in the trie, found by chasing `parent`'s failure chain.
    fn fail_target(&self, parent: i32, unit: i32) -> i32 {
        let mut state = self.nodes.aux1(at(parent));
        loop {
            let candidate = self.nodes.base(at(state)) + unit;
            if self.nodes.parent(at(candidate)) == state {
                return candidate;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.nodes.aux1(at(state));
        }
    }
}
