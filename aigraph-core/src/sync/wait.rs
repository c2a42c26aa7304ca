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

//! A sleeping wait/notify primitive over a plain atomic word.
//!
//! This is the thing the rest of the substrate (the semaphore, in turn the
//! queue and the pool's stop token) is built on. The teacher's own sync
//! layer reaches for a process-wide contention table backing a raw futex;
//! that's an implementation detail of the sleeping primitive the design
//! notes explicitly say "need not be surfaced", so this gives every
//! `WaitCell` its own parking_lot-backed mutex/condvar pair instead. Simpler,
//! and sufficient at the scale this engine targets.

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU32, Ordering};

pub struct WaitCell {
    word: AtomicU32,
    gate: Mutex<()>,
    cv: Condvar,
}

impl WaitCell {
    pub fn new(initial: u32) -> Self {
        Self {
            word: AtomicU32::new(initial),
            gate: Mutex::new(()),
            cv: Condvar::new(),
        }
    }

    #[inline(always)]
    pub fn load(&self, order: Ordering) -> u32 {
        self.word.load(order)
    }

    #[inline(always)]
    pub fn fetch_update(
        &self,
        set_order: Ordering,
        fetch_order: Ordering,
        mut f: impl FnMut(u32) -> Option<u32>,
    ) -> Result<u32, u32> {
        self.word.fetch_update(set_order, fetch_order, &mut f)
    }

    /// Sleeps until the word no longer equals `expected`. Spurious wakeups
    /// are possible (the loop re-checks), but this never busy-spins past the
    /// initial check: every iteration blocks on the condvar.
    pub fn wait_while_eq(&self, expected: u32) {
        let mut guard = self.gate.lock();
        while self.word.load(Ordering::Acquire) == expected {
            self.cv.wait(&mut guard);
        }
    }

    /// Wakes every thread parked in `wait_while_eq`. Callers must hold or
    /// have just released whatever store made the predicate false; taking
    /// the gate here ensures no wakeup is lost between a waiter's load and
    /// its `cv.wait`.
    pub fn notify_all(&self) {
        let _guard = self.gate.lock();
        self.cv.notify_all();
    }

    pub fn notify_one(&self) {
        let _guard = self.gate.lock();
        self.cv.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering::{Acquire, Release};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn wait_returns_immediately_if_already_changed() {
        let cell = WaitCell::new(1);
        cell.wait_while_eq(0);
    }

    #[test]
    fn notify_wakes_a_waiter() {
        let cell = Arc::new(WaitCell::new(0));
        let waiter = {
            let cell = cell.clone();
            thread::spawn(move || cell.wait_while_eq(0))
        };
        thread::sleep(Duration::from_millis(20));
        cell.word.store(1, Release);
        cell.notify_all();
        waiter.join().unwrap();
        assert_eq!(cell.load(Acquire), 1);
    }
}
