/*
 * This file is part of aigraph, a concurrent engine for exploring
 * And-Inverter Graphs.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! Cut enumeration: claim a node exclusively, expand its frontier greedily
//! towards primary inputs, and hand back a bounded-width cut. The claim
//! discipline (`Aig::check_and_mark`/`mark`/`reset_mark`) is the only thing
//! that lets many worker threads walk the same shared DAG at once without a
//! lock on the graph itself.

mod expand;

use crate::aig::Aig;

/// Default target cut width used by `create_cut`.
pub const DEFAULT_SIZE_LIMIT: usize = 6;

/// An ordered, caller-owned set of node indices covering some claimed node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cut {
    leaves: Vec<u32>,
}

impl Cut {
    fn singleton(n: u32) -> Self {
        Self { leaves: vec![n] }
    }

    pub fn leaves(&self) -> &[u32] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// A cut is trivial once every leaf is a PI or the constant node, i.e.
    /// expansion has nothing productive left to do.
    pub fn is_trivial(&self, aig: &Aig) -> bool {
        self.leaves
            .iter()
            .all(|&n| aig.is_constant(n) || aig.is_pi(n))
    }
}

/// Claims `n` for `thread_id` and expands it into a bounded-width cut.
///
/// Returns an empty cut if `n` is already owned by another thread — the
/// caller treats that as "try later" or skip. The returned cut, if
/// non-empty, must eventually be passed to [`release_cut`] by the same
/// `thread_id` to release the claimed subtree.
pub fn create_cut(aig: &Aig, n: u32, thread_id: u32, size_limit: usize) -> Cut {
    if !aig.check_and_mark(n, thread_id) {
        debug!("create_cut: n{n} already claimed, thread {thread_id} backing off");
        return Cut::default();
    }
    let mut cut = Cut::singleton(n);
    expand::expand(aig, &mut cut, size_limit, thread_id);
    cut
}

/// Releases every node in the subtree rooted at `n` that is owned by
/// `thread_id`, using an explicit work-list rather than native recursion
/// since the claimed subtree of a large AIG can be tens of thousands of
/// nodes deep. Constants and PIs are reachable through fanin traversal but
/// were never claimed, so `foreach_fanin`'s early exit stops the walk there
/// without any special-casing here.
pub fn release_cut(aig: &Aig, n: u32, thread_id: u32) {
    assert_ne!(thread_id, 0, "thread_id 0 is reserved for 'unclaimed'");
    let mut stack = vec![n];
    while let Some(x) = stack.pop() {
        if aig.mark(x) != thread_id {
            continue;
        }
        aig.reset_mark(x);
        aig.foreach_fanin(x, |s| {
            stack.push(aig.get_node(s));
            true
        });
    }
}
