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

use super::signal::Signal;
use crate::compiler::likely;
use std::sync::atomic::{AtomicU32, Ordering};

/// The mark value meaning "unclaimed". Callers must never use this as a
/// `thread_id`.
pub const UNMARKED: u32 = 0;

/// A single entry in the graph.
///
/// Constant-0, primary inputs and AND nodes are all represented uniformly so
/// that `fanins`/`ref_count`/`mark` are always present; only the *meaning* of
/// `fanins` differs per kind (see `Aig::is_pi`/`Aig::is_constant`).
#[derive(Debug)]
pub struct Node {
    pub(super) fanins: [Signal; 2],
    ref_count: AtomicU32,
    mark: AtomicU32,
}

impl Node {
    pub(super) fn new_constant() -> Self {
        Self {
            fanins: [Signal::new(0, false); 2],
            ref_count: AtomicU32::new(0),
            mark: AtomicU32::new(UNMARKED),
        }
    }

    /// `ordinal` is the PI's zero-based rank among all primary inputs; it is
    /// used only as a same-value sentinel in both fanin slots and is never
    /// dereferenced as a real node index (see the data model note on PI
    /// encoding).
    pub(super) fn new_pi(ordinal: u32) -> Self {
        let sentinel = Signal::new(ordinal, false);
        Self {
            fanins: [sentinel, sentinel],
            ref_count: AtomicU32::new(0),
            mark: AtomicU32::new(UNMARKED),
        }
    }

    pub(super) fn new_and(a: Signal, b: Signal) -> Self {
        Self {
            fanins: [a, b],
            ref_count: AtomicU32::new(0),
            mark: AtomicU32::new(UNMARKED),
        }
    }

    #[inline(always)]
    pub(super) fn bump_ref_count(&self) {
        self.ref_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(super) fn ref_count(&self) -> u32 {
        self.ref_count.load(Ordering::Relaxed)
    }

    /// The sole concurrent mutation of a node post-build: claim the node for
    /// `thread_id` if it is unclaimed, or re-confirm ownership if it is
    /// already ours.
    #[inline]
    pub(super) fn check_and_mark(&self, thread_id: u32) -> bool {
        debug_assert_ne!(thread_id, UNMARKED, "0 is not a valid thread id");
        let current = self.mark.load(Ordering::Relaxed);
        if current == thread_id {
            return true;
        }
        let claimed = self
            .mark
            .compare_exchange(UNMARKED, thread_id, Ordering::Acquire, Ordering::Relaxed)
            .is_ok();
        // Most claim attempts land on an unclaimed node; losing the race to
        // another worker is the exceptional case.
        likely(claimed)
    }

    #[inline(always)]
    pub(super) fn mark(&self) -> u32 {
        self.mark.load(Ordering::Acquire)
    }

    #[inline(always)]
    pub(super) fn reset_mark(&self) {
        self.mark.store(UNMARKED, Ordering::Release);
    }
}
