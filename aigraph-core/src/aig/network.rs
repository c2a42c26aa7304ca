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

use super::{node::Node, signal::Signal};
use std::collections::HashMap;

/// Growth factor applied to both the node array and the hash index once
/// either crosses 90% occupancy. Load-bearing: the two MUST grow in step or
/// the hash index degrades while the node array doesn't (or vice versa).
const GROWTH_FACTOR: f64 = std::f64::consts::PI;
const GROWTH_THRESHOLD: f64 = 0.9;

/// A concurrent And-Inverter Graph store.
///
/// Construction (`create_pi`/`create_and`/`create_po`) is single-threaded
/// and not thread-safe. Once built, the graph is logically frozen: reads
/// (`get_node`, `foreach_fanin`, ...) and the atomic claim operations
/// (`check_and_mark`/`mark`/`reset_mark`) are safe to call concurrently from
/// any number of threads, because they touch only read-only node data and
/// each node's own atomic mark word.
#[derive(Debug)]
pub struct Aig {
    nodes: Vec<Node>,
    pi_indices: Vec<u32>,
    outputs: Vec<Signal>,
    hash_index: HashMap<(Signal, Signal), u32>,
}

impl Default for Aig {
    fn default() -> Self {
        Self::new()
    }
}

impl Aig {
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(1);
        nodes.push(Node::new_constant());
        Self {
            nodes,
            pi_indices: Vec::new(),
            outputs: Vec::new(),
            hash_index: HashMap::new(),
        }
    }

    /// Total node count, including the constant node.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn pi_count(&self) -> usize {
        self.pi_indices.len()
    }

    #[inline]
    pub fn pi_indices(&self) -> &[u32] {
        &self.pi_indices
    }

    #[inline]
    pub fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    #[inline]
    pub const fn get_constant(value: bool) -> Signal {
        Signal::new(0, value)
    }

    #[inline]
    pub fn is_constant(&self, n: u32) -> bool {
        n == 0
    }

    /// A node is a PI iff its two fanin slots hold the same sentinel whose
    /// raw index value is less than the PI count (see the data model note
    /// on PI encoding). Node 0 is excluded explicitly since the constant
    /// node's fanins happen to satisfy the same shape.
    #[inline]
    pub fn is_pi(&self, n: u32) -> bool {
        if n == 0 {
            return false;
        }
        let node = &self.nodes[n as usize];
        node.fanins[0] == node.fanins[1] && node.fanins[0].index() < self.pi_indices.len() as u32
    }

    #[inline]
    pub fn is_complemented(&self, s: Signal) -> bool {
        s.is_complemented()
    }

    #[inline]
    pub fn get_node(&self, s: Signal) -> u32 {
        s.index()
    }

    #[inline]
    pub const fn make_signal(n: u32) -> Signal {
        Signal::new(n, false)
    }

    /// Number of fanin slots a node occupies: 0 for the constant and for
    /// PIs, 2 for AND nodes.
    #[inline]
    pub fn fanin_size(&self, n: u32) -> usize {
        if self.is_constant(n) || self.is_pi(n) {
            0
        } else {
            2
        }
    }

    #[inline]
    pub fn fanout_size(&self, n: u32) -> u32 {
        self.nodes[n as usize].ref_count()
    }

    fn ensure_capacity(&mut self) {
        let cap = self.nodes.capacity();
        if cap == 0 || self.nodes.len() as f64 >= cap as f64 * GROWTH_THRESHOLD {
            let base = self.nodes.len().max(1);
            let target = (base as f64 * GROWTH_FACTOR).ceil() as usize;
            let additional = target.saturating_sub(self.nodes.capacity());
            if additional > 0 {
                self.nodes.reserve(additional);
                self.hash_index.reserve(additional);
            }
        }
    }

    /// Appends a fresh primary input. Not thread-safe; build phase only.
    pub fn create_pi(&mut self) -> Signal {
        self.ensure_capacity();
        let ordinal = self.pi_indices.len() as u32;
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::new_pi(ordinal));
        self.pi_indices.push(index);
        Signal::new(index, false)
    }

    /// Structurally-hashed AND gate construction. Not thread-safe; build
    /// phase only.
    pub fn create_and(&mut self, a: Signal, b: Signal) -> Signal {
        assert!((a.index() as usize) < self.nodes.len(), "dangling fanin a");
        assert!((b.index() as usize) < self.nodes.len(), "dangling fanin b");

        let (mut a, mut b) = (a, b);
        if a.index() > b.index() {
            std::mem::swap(&mut a, &mut b);
        }

        if a.index() == b.index() {
            return if a.is_complemented() == b.is_complemented() {
                a
            } else {
                Self::get_constant(false)
            };
        }
        if a.index() == 0 {
            return if a.is_complemented() {
                b
            } else {
                Self::get_constant(false)
            };
        }

        if let Some(&existing) = self.hash_index.get(&(a, b)) {
            debug!("create_and: structural hash hit for ({a:?}, {b:?}) -> n{existing}");
            return Signal::new(existing, false);
        }

        self.ensure_capacity();
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::new_and(a, b));
        self.hash_index.insert((a, b), index);
        self.nodes[a.index() as usize].bump_ref_count();
        self.nodes[b.index() as usize].bump_ref_count();
        Signal::new(index, false)
    }

    /// Appends a primary output. Not thread-safe; build phase only.
    pub fn create_po(&mut self, s: Signal) {
        assert!((s.index() as usize) < self.nodes.len(), "dangling output");
        self.nodes[s.index() as usize].bump_ref_count();
        self.outputs.push(s);
    }

    pub fn foreach_node(&self, mut f: impl FnMut(u32)) {
        for n in 0..self.nodes.len() as u32 {
            f(n);
        }
    }

    /// Invokes `f` with each fanin of `n`, in order, short-circuiting if `f`
    /// returns `false`. Early-exits without calling `f` at all for the
    /// constant node and for PIs, since neither has real fanins.
    pub fn foreach_fanin(&self, n: u32, mut f: impl FnMut(Signal) -> bool) {
        if self.is_constant(n) || self.is_pi(n) {
            return;
        }
        let fanins = self.nodes[n as usize].fanins;
        if !f(fanins[0]) {
            return;
        }
        f(fanins[1]);
    }

    /// The two fanins of an AND node. Panics if `n` is the constant node or
    /// a PI; callers must check `is_pi`/`is_constant` first (mirrors
    /// `foreach_fanin`'s early exit).
    pub(crate) fn and_fanins(&self, n: u32) -> [Signal; 2] {
        debug_assert!(!self.is_constant(n) && !self.is_pi(n));
        self.nodes[n as usize].fanins
    }

    /// Atomically claims `n` for `thread_id`: succeeds if `n` was unclaimed
    /// (CAS 0 -> thread_id) or already owned by `thread_id`. This is the
    /// sole concurrent mutation of the shared graph post-build.
    #[inline]
    pub fn check_and_mark(&self, n: u32, thread_id: u32) -> bool {
        assert_ne!(thread_id, 0, "thread_id 0 is reserved for 'unclaimed'");
        self.nodes[n as usize].check_and_mark(thread_id)
    }

    #[inline]
    pub fn mark(&self, n: u32) -> u32 {
        self.nodes[n as usize].mark()
    }

    #[inline]
    pub fn reset_mark(&self, n: u32) {
        self.nodes[n as usize].reset_mark();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_small() -> (Aig, Signal, Signal, Signal, Signal, Signal, Signal) {
        let mut aig = Aig::new();
        let x0 = aig.create_pi();
        let x1 = aig.create_pi();
        let x2 = aig.create_pi();
        let n3 = aig.create_and(x0, x1);
        let n4 = aig.create_and(x1, x2);
        let n5 = aig.create_and(n3, n4);
        (aig, x0, x1, x2, n3, n4, n5)
    }

    #[test]
    fn small_aig_determinism() {
        let (mut aig, _x0, x1, _x2, n3, n4, n5) = build_small();
        aig.create_po(n5);
        assert_eq!(aig.node_count(), 6);
        assert_eq!(aig.fanout_size(x1.index()), 2);
        assert_eq!(aig.fanout_size(n3.index()), 1);
        assert_eq!(aig.fanout_size(n4.index()), 1);
        assert_eq!(aig.fanout_size(n5.index()), 1);
    }

    #[test]
    fn structural_hashing_dedups() {
        let (mut aig, x0, x1, _x2, n3, _n4, _n5) = build_small();
        let count_before = aig.node_count();
        let again = aig.create_and(x0, x1);
        assert_eq!(again, n3);
        assert_eq!(aig.node_count(), count_before);
    }

    #[test]
    fn trivial_rules() {
        let mut aig = Aig::new();
        let x0 = aig.create_pi();
        assert_eq!(aig.create_and(x0, x0.negate()), Aig::get_constant(false));
        assert_eq!(aig.create_and(x0, x0), x0);
        assert_eq!(aig.create_and(Aig::get_constant(true), x0), x0);
        assert_eq!(aig.create_and(Aig::get_constant(false), x0), Aig::get_constant(false));
    }

    #[test]
    fn fanin_ordering_invariant() {
        let mut aig = Aig::new();
        let x0 = aig.create_pi();
        let x1 = aig.create_pi();
        let n = aig.create_and(x1, x0);
        let fanins = aig.and_fanins(n.index());
        assert!(fanins[0].index() <= fanins[1].index());
        assert!(fanins[0].index() < n.index());
        assert!(fanins[1].index() < n.index());
    }

    #[test]
    fn is_pi_and_is_constant_are_disjoint() {
        let mut aig = Aig::new();
        let x0 = aig.create_pi();
        assert!(!aig.is_constant(x0.index()));
        assert!(aig.is_pi(x0.index()));
        assert!(aig.is_constant(0));
        assert!(!aig.is_pi(0));
    }

    #[test]
    fn capacity_grows_in_step() {
        let mut aig = Aig::new();
        let mut prev = aig.create_pi();
        for _ in 0..64 {
            let next_pi = aig.create_pi();
            prev = aig.create_and(prev, next_pi);
        }
        assert!(aig.node_count() > 64);
        assert_eq!(prev.index() as usize, aig.node_count() - 1);
    }
}
