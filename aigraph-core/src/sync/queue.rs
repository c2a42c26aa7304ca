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

//! A bounded multi-producer multi-consumer queue of fixed depth `D`. Two
//! counting semaphores provide backpressure in both directions
//! (`remaining_space` gates producers, `items_produced` gates consumers);
//! the FIFO itself is a short mutex-guarded critical section, since the
//! semaphores already serialize entry/exit and the lock is only ever held
//! for a single push_back/pop_front.

use super::semaphore::Semaphore;
use crate::mem::CachePadded;
use parking_lot::Mutex;
use std::collections::VecDeque;

pub struct BoundedQueue<T> {
    depth: usize,
    items: Mutex<VecDeque<T>>,
    remaining_space: CachePadded<Semaphore>,
    items_produced: CachePadded<Semaphore>,
}

impl<T> BoundedQueue<T> {
    pub fn new(depth: usize) -> Self {
        assert!(depth > 0, "queue depth must be nonzero");
        Self {
            depth,
            items: Mutex::new(VecDeque::with_capacity(depth)),
            remaining_space: CachePadded::new(Semaphore::new(depth as u32)),
            items_produced: CachePadded::new(Semaphore::new(0)),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Blocks until there is room, then pushes `item`.
    pub fn enqueue(&self, item: T) {
        self.remaining_space.acquire();
        self.items.lock().push_back(item);
        self.items_produced.release();
    }

    /// Pushes `item` without blocking if room is immediately available.
    /// Returns the item back on failure.
    pub fn try_enqueue(&self, item: T) -> Result<(), T> {
        if !self.remaining_space.try_acquire() {
            return Err(item);
        }
        self.items.lock().push_back(item);
        self.items_produced.release();
        Ok(())
    }

    /// Blocks until an item is available, then pops it.
    pub fn dequeue(&self) -> T {
        self.items_produced.acquire();
        let item = self
            .items
            .lock()
            .pop_front()
            .expect("items_produced permit implies a queued item");
        self.remaining_space.release();
        item
    }

    /// Pops an item without blocking if one is immediately available.
    pub fn try_dequeue(&self) -> Option<T> {
        if !self.items_produced.try_acquire() {
            return None;
        }
        let item = self
            .items
            .lock()
            .pop_front()
            .expect("items_produced permit implies a queued item");
        self.remaining_space.release();
        Some(item)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.items.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fifo_order_preserved() {
        let q = BoundedQueue::new(4);
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3);
        assert_eq!(q.dequeue(), 1);
        assert_eq!(q.dequeue(), 2);
        assert_eq!(q.dequeue(), 3);
    }

    #[test]
    fn try_enqueue_fails_when_full() {
        let q = BoundedQueue::new(1);
        assert!(q.try_enqueue(1).is_ok());
        assert_eq!(q.try_enqueue(2), Err(2));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn try_dequeue_empty_is_none() {
        let q: BoundedQueue<i32> = BoundedQueue::new(1);
        assert_eq!(q.try_dequeue(), None);
    }

    #[test]
    fn concurrent_producers_and_consumers_see_every_item() {
        let q = Arc::new(BoundedQueue::new(8));
        let producers: Vec<_> = (0..4)
            .map(|t| {
                let q = q.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        q.enqueue(t * 100 + i);
                    }
                })
            })
            .collect();
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let q = q.clone();
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    for _ in 0..100 {
                        seen.push(q.dequeue());
                    }
                    seen
                })
            })
            .collect();
        for p in producers {
            p.join().unwrap();
        }
        let mut total = Vec::new();
        for c in consumers {
            total.extend(c.join().unwrap());
        }
        total.sort_unstable();
        let mut expected: Vec<i32> = (0..4).flat_map(|t| (0..100).map(move |i| t * 100 + i)).collect();
        expected.sort_unstable();
        assert_eq!(total, expected);
    }
}
