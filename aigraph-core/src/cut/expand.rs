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

use super::Cut;
use crate::aig::Aig;
use crate::compiler::unlikely;
use std::collections::HashMap;

const MAX_ITERATIONS: u32 = 5;

/// A fanin is free if it needs no claim to sit in a cut: the constant node,
/// a PI, or a real node already owned by `thread_id`.
fn is_free(aig: &Aig, n: u32, thread_id: u32) -> bool {
    aig.is_constant(n) || aig.is_pi(n) || aig.mark(n) == thread_id
}

/// Cost-free expansion: replaces a leaf with its fanins only when doing so
/// introduces at most one new unclaimed real node. Iterates to a fixed
/// point. Returns true iff every leaf left in the cut is a PI or constant.
fn expand0(aig: &Aig, cut: &mut Cut, thread_id: u32) -> bool {
    loop {
        let mut next = Vec::with_capacity(cut.leaves.len());
        let mut pending = Vec::new();
        let mut changed = false;

        for &x in &cut.leaves {
            if aig.is_constant(x) || aig.is_pi(x) {
                next.push(x);
                continue;
            }

            let fanins = aig.and_fanins(x);
            let outside: Vec<u32> = fanins
                .iter()
                .map(|s| aig.get_node(*s))
                .filter(|&fi| !is_free(aig, fi, thread_id))
                .collect();

            if outside.len() >= 2 {
                next.push(x);
                continue;
            }
            let outside_fanin = outside.first().copied();

            let claimed = match outside_fanin {
                Some(fi) => aig.check_and_mark(fi, thread_id),
                None => true,
            };

            // A contended outside fanin is the exceptional case; expand0
            // usually finds its one outside fanin free for the taking.
            if unlikely(!claimed) {
                next.push(x);
                continue;
            }

            changed = true;
            for s in fanins {
                let fi = aig.get_node(s);
                if aig.is_constant(fi) || aig.is_pi(fi) {
                    pending.push(fi);
                } else if Some(fi) == outside_fanin {
                    pending.push(fi);
                }
                // a fanin already marked by thread_id before this pass is
                // represented by its own claimed descendants elsewhere and
                // is deliberately not re-added.
            }
        }

        next.extend(pending);
        cut.leaves = next;

        if !changed {
            break;
        }
    }

    cut.is_trivial(aig)
}

/// Picks the next node to bring into a non-trivial cut: the real
/// (non-PI, non-constant) fanin referenced by the most current leaves,
/// breaking ties by highest fanout size in the underlying graph, then by
/// first-seen order.
fn select_next_fanin(aig: &Aig, cut: &Cut) -> u32 {
    let mut refcount: HashMap<u32, u32> = HashMap::new();
    let mut first_seen: Vec<u32> = Vec::new();

    for &x in &cut.leaves {
        if aig.is_constant(x) || aig.is_pi(x) {
            continue;
        }
        for s in aig.and_fanins(x) {
            let fi = aig.get_node(s);
            if aig.is_constant(fi) || aig.is_pi(fi) {
                continue;
            }
            let entry = refcount.entry(fi).or_insert_with(|| {
                first_seen.push(fi);
                0
            });
            *entry += 1;
        }
    }

    // `Iterator::max_by_key` returns the *last* of equally-maximal elements;
    // ties here must instead resolve to the *first*-seen candidate, so the
    // best is tracked by hand, only replacing on a strict improvement.
    let mut best: Option<u32> = None;
    let mut best_key = (0u32, 0u32);
    for fi in first_seen {
        let key = (refcount[&fi], aig.fanout_size(fi));
        if best.is_none() || key > best_key {
            best = Some(fi);
            best_key = key;
        }
    }
    best.expect("select_next_fanin called on a non-trivial cut, so a candidate must exist")
}

/// Bounded best-fanin expansion of a freshly-claimed seed cut `[n]`.
pub(super) fn expand(aig: &Aig, cut: &mut Cut, size_limit: usize, thread_id: u32) {
    if expand0(aig, cut, thread_id) {
        return;
    }

    let mut best_cut: Option<Cut> = if cut.len() <= size_limit {
        Some(cut.clone())
    } else {
        None
    };
    let mut oversize_iterations = 0u32;

    loop {
        let candidate = select_next_fanin(aig, cut);
        if aig.check_and_mark(candidate, thread_id) {
            cut.leaves.push(candidate);
        }

        let trivial = expand0(aig, cut, thread_id);

        if cut.len() > size_limit {
            oversize_iterations += 1;
        } else {
            oversize_iterations = 0;
        }

        if cut.len() <= size_limit {
            best_cut = Some(cut.clone());
        }

        if trivial || oversize_iterations >= MAX_ITERATIONS {
            break;
        }
    }

    if let Some(best) = best_cut {
        *cut = best;
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_cut, release_cut, Cut};
    use crate::aig::Aig;

    /// Two candidates tied on (refcount, fanout_size) must resolve to the
    /// first-seen one, not whichever `HashMap` iteration or `max_by_key`'s
    /// last-wins behavior happens to surface.
    #[test]
    fn select_next_fanin_breaks_ties_by_first_seen() {
        let mut aig = Aig::new();
        let x0 = aig.create_pi();
        let x1 = aig.create_pi();
        let x2 = aig.create_pi();
        let x3 = aig.create_pi();
        let m1 = aig.create_and(x0, x1);
        let m2 = aig.create_and(x2, x3);
        let n_a = aig.create_and(x0, m1);
        let n_b = aig.create_and(x2, m2);

        assert_eq!(aig.fanout_size(m1.index()), 1);
        assert_eq!(aig.fanout_size(m2.index()), 1);

        let cut = Cut {
            leaves: vec![n_a.index(), n_b.index()],
        };
        let picked = select_next_fanin(&aig, &cut);
        assert_eq!(picked, m1.index(), "tie must resolve to the first-seen candidate");
    }

    /// x0,x1,x2 -> n3=x0&x1, n4=x1&x2, n5=n3&n4. A size-6 cut of n5 should
    /// bottom out at the three PIs.
    fn build_small() -> (Aig, u32) {
        let mut aig = Aig::new();
        let x0 = aig.create_pi();
        let x1 = aig.create_pi();
        let x2 = aig.create_pi();
        let n3 = aig.create_and(x0, x1);
        let n4 = aig.create_and(x1, x2);
        let n5 = aig.create_and(n3, n4);
        aig.create_po(n5);
        (aig, n5.index())
    }

    #[test]
    fn cut_of_small_aig_reaches_pis() {
        let (aig, n5) = build_small();
        let cut = create_cut(&aig, n5, 1, 6);
        assert!(!cut.is_empty());
        assert!(cut.is_trivial(&aig));
        for &leaf in cut.leaves() {
            assert!(aig.is_pi(leaf) || aig.is_constant(leaf));
        }
        release_cut(&aig, n5, 1);
        assert_eq!(aig.mark(n5), 0);
    }

    #[test]
    fn second_claim_on_same_root_fails_while_held() {
        let (aig, n5) = build_small();
        assert!(aig.check_and_mark(n5, 1));
        let cut = create_cut(&aig, n5, 2, 6);
        assert!(cut.is_empty());
        aig.reset_mark(n5);
    }

    #[test]
    fn release_cut_clears_entire_claimed_subtree() {
        let (aig, n5) = build_small();
        let cut = create_cut(&aig, n5, 7, 6);
        assert!(!cut.is_empty());
        release_cut(&aig, n5, 7);
        aig.foreach_node(|n| {
            assert_eq!(aig.mark(n), 0, "node {n} still marked after release");
        });
    }

    #[test]
    fn concurrent_cuts_never_double_claim_a_node() {
        use std::sync::Arc;
        use std::thread;

        let mut aig = Aig::new();
        let mut prev = aig.create_pi();
        for _ in 0..40 {
            let next_pi = aig.create_pi();
            prev = aig.create_and(prev, next_pi);
        }
        let root = prev.index();
        let aig = Arc::new(aig);

        let handles: Vec<_> = (1..=8u32)
            .map(|tid| {
                let aig = aig.clone();
                thread::spawn(move || {
                    let cut = create_cut(&aig, root, tid, 6);
                    if !cut.is_empty() {
                        release_cut(&aig, root, tid);
                    }
                    !cut.is_empty()
                })
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|&&ok| ok).count(), 1);
    }
}
