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

//! A fixed-size worker pool draining a [`BoundedQueue`] of boxed closures.
//!
//! Each worker is handed a stable, non-zero `thread_id` (its index plus one)
//! that it passes into every task it runs, so a task can use it as a claim
//! identity that persists across the whole lifetime of the worker rather
//! than being freshly minted per task. `submit`'s cooperative fallback (see
//! below) runs a task on the calling thread instead of a dedicated worker,
//! so it hands out `worker_count + 1` instead — a sentinel id reserved for
//! cooperative execution, distinct from every real worker's `1..=worker_count`.
//!
//! Shutdown is cooperative: the destructor submits one sentinel task per
//! worker, each of which waits on a `Barrier` of size `worker_count + 1`
//! before asking its worker to stop. This guarantees every task queued
//! before `drop` runs to completion (a sentinel can only pass the barrier
//! after all `worker_count` sentinels have been dequeued, which only
//! happens once every worker has drained everything ahead of them), and
//! that no worker observes the stop flag until its in-flight work is done.

use super::queue::BoundedQueue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread::JoinHandle;

type Task = Box<dyn FnOnce(u32) + Send + 'static>;

pub struct WorkerPool {
    queue: Arc<BoundedQueue<Task>>,
    stop: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
    cooperative_thread_id: u32,
}

impl WorkerPool {
    pub fn new(worker_count: usize, queue_depth: usize) -> Self {
        assert!(worker_count > 0, "worker pool needs at least one worker");
        let queue = Arc::new(BoundedQueue::new(queue_depth));
        let stop = Arc::new(AtomicBool::new(false));
        let handles = (0..worker_count)
            .map(|id| {
                let queue = queue.clone();
                let stop = stop.clone();
                std::thread::Builder::new()
                    .name(format!("aigraph-worker-{id}"))
                    .spawn(move || Self::run(id, queue, stop))
                    .expect("failed to spawn worker thread")
            })
            .collect();
        info!("worker pool started with {worker_count} workers, queue depth {queue_depth}");
        Self {
            queue,
            stop,
            handles,
            cooperative_thread_id: worker_count as u32 + 1,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    fn run(id: usize, queue: Arc<BoundedQueue<Task>>, stop: Arc<AtomicBool>) {
        let thread_id = id as u32 + 1;
        loop {
            let task = queue.dequeue();
            task(thread_id);
            if stop.load(Ordering::Acquire) {
                debug!("worker {id} observed stop, exiting");
                return;
            }
        }
    }

    /// Runs one queued task on the calling thread if one is immediately
    /// available, without blocking. Used by `submit` to make progress while
    /// waiting for queue room instead of deadlocking against a caller that
    /// is itself a pool worker submitting nested work.
    fn make_progress(queue: &BoundedQueue<Task>, cooperative_thread_id: u32) -> bool {
        match queue.try_dequeue() {
            Some(task) => {
                task(cooperative_thread_id);
                true
            }
            None => false,
        }
    }

    /// Submits a task, blocking until there is queue room. If the queue is
    /// full, the caller cooperatively drains one task itself rather than
    /// blocking indefinitely, so a worker that submits nested work into its
    /// own pool can't deadlock against itself. Each task receives the
    /// `thread_id` of whichever worker (or the cooperative sentinel id) ends
    /// up running it.
    pub fn submit(&self, task: impl FnOnce(u32) + Send + 'static) {
        let boxed: Task = Box::new(task);
        match self.queue.try_enqueue(boxed) {
            Ok(()) => {}
            Err(boxed) => {
                let mut remaining = Some(boxed);
                loop {
                    if Self::make_progress(&self.queue, self.cooperative_thread_id) {
                        if let Some(boxed) = remaining.take() {
                            match self.queue.try_enqueue(boxed) {
                                Ok(()) => break,
                                Err(boxed) => remaining = Some(boxed),
                            }
                        }
                    } else {
                        let boxed = remaining.take().expect("remaining task always present here");
                        self.queue.enqueue(boxed);
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        let worker_count = self.handles.len();
        let barrier = Arc::new(Barrier::new(worker_count + 1));
        for _ in 0..worker_count {
            let stop = self.stop.clone();
            let barrier = barrier.clone();
            self.queue.enqueue(Box::new(move |_thread_id| {
                barrier.wait();
                stop.store(true, Ordering::Release);
            }));
        }
        barrier.wait();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
        info!("worker pool with {worker_count} workers shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn pool_drains_all_submitted_work() {
        let pool = WorkerPool::new(6, 4);
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..256 {
            let counter = counter.clone();
            pool.submit(move |_thread_id| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        drop(pool);
        assert_eq!(counter.load(Ordering::SeqCst), 256);
    }

    #[test]
    fn submit_does_not_deadlock_when_queue_is_full() {
        let pool = WorkerPool::new(2, 1);
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..32 {
            let counter = counter.clone();
            pool.submit(move |_thread_id| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        drop(pool);
        assert_eq!(counter.load(Ordering::SeqCst), 32);
    }

    #[test]
    fn each_worker_keeps_a_stable_thread_id_across_tasks() {
        use std::collections::HashSet;
        use std::sync::Mutex;

        let pool = WorkerPool::new(4, 4);
        let seen: Arc<Mutex<HashSet<u32>>> = Arc::new(Mutex::new(HashSet::new()));
        for _ in 0..64 {
            let seen = seen.clone();
            pool.submit(move |thread_id| {
                assert!(thread_id >= 1 && thread_id <= 5, "unexpected thread id {thread_id}");
                seen.lock().unwrap().insert(thread_id);
            });
        }
        drop(pool);
        // every observed id falls within the reserved 1..=worker_count+1 range.
        assert!(seen.lock().unwrap().iter().all(|&id| id >= 1 && id <= 5));
    }
}
