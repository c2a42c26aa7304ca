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

//! A counting semaphore over [`WaitCell`], sized at construction and never
//! resized. Two of these back the bounded queue (`remaining_space` and
//! `items_produced`); the pool's sentinel barrier uses a third (capacity 1)
//! under the hood via `std::sync::Barrier` instead, since that's already a
//! semaphore-shaped primitive in `std` and there's no reason to reinvent it.

use super::wait::WaitCell;
use super::Backoff;
use std::sync::atomic::Ordering;

pub struct Semaphore {
    cell: WaitCell,
}

impl Semaphore {
    pub fn new(initial: u32) -> Self {
        Self {
            cell: WaitCell::new(initial),
        }
    }

    /// Blocks until a unit is available, then takes it.
    pub fn acquire(&self) {
        let backoff = Backoff::new();
        loop {
            if self.try_acquire() {
                return;
            }
            if backoff.is_exhausted() {
                self.cell.wait_while_eq(0);
            } else {
                backoff.snooze();
            }
        }
    }

    /// Takes a unit if one is immediately available, without blocking.
    pub fn try_acquire(&self) -> bool {
        self.cell
            .fetch_update(Ordering::Acquire, Ordering::Relaxed, |count| {
                count.checked_sub(1)
            })
            .is_ok()
    }

    /// Returns a unit, waking one waiter if any are parked.
    pub fn release(&self) {
        self.cell
            .fetch_update(Ordering::Release, Ordering::Relaxed, |count| {
                Some(count + 1)
            })
            .expect("release never fails: the update closure always returns Some");
        self.cell.notify_one();
    }

    #[cfg(test)]
    fn available(&self) -> u32 {
        self.cell.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn try_acquire_respects_count() {
        let sem = Semaphore::new(1);
        assert!(sem.try_acquire());
        assert!(!sem.try_acquire());
        sem.release();
        assert!(sem.try_acquire());
    }

    #[test]
    fn acquire_blocks_until_release() {
        let sem = Arc::new(Semaphore::new(0));
        let waiter = {
            let sem = sem.clone();
            thread::spawn(move || sem.acquire())
        };
        thread::sleep(Duration::from_millis(20));
        sem.release();
        waiter.join().unwrap();
    }

    #[test]
    fn many_threads_never_over_acquire() {
        use std::sync::atomic::{AtomicUsize, Ordering as AOrd};
        let sem = Arc::new(Semaphore::new(4));
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let sem = sem.clone();
                let inside = inside.clone();
                let max_seen = max_seen.clone();
                thread::spawn(move || {
                    sem.acquire();
                    let now = inside.fetch_add(1, AOrd::SeqCst) + 1;
                    max_seen.fetch_max(now, AOrd::SeqCst);
                    thread::sleep(Duration::from_millis(1));
                    inside.fetch_sub(1, AOrd::SeqCst);
                    sem.release();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(max_seen.load(AOrd::SeqCst) <= 4);
        assert_eq!(sem.available(), 4);
    }
}
