//! # Timer queue: deadline-ordered min-heap with a sleeping consumer.
//!
//! [`TimerQueue`] holds `(deadline, actor)` entries ordered earliest-first.
//! The single timer thread blocks in [`TimerQueue::next_due`], sleeping until
//! the top entry's deadline; a push with an earlier deadline or a close wakes
//! it so it can re-evaluate the heap.
//!
//! The `closed` flag lives under the same mutex as the heap, so a close can
//! never race a consumer into a missed wakeup.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

use crate::core::actor::TaskActor;
use crate::core::clock;

/// One scheduled execution: the moment it becomes due and the task to run.
pub(crate) struct TimerEntry {
    deadline: Instant,
    actor: Arc<TaskActor>,
}

impl TimerEntry {
    pub(crate) fn new(deadline: Instant, actor: Arc<TaskActor>) -> Self {
        Self { deadline, actor }
    }
}

// `BinaryHeap` is a max-heap; deadline comparison is reversed so the earliest
// entry surfaces at the top.
impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.deadline.cmp(&self.deadline)
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline
    }
}

impl Eq for TimerEntry {}

#[derive(Default)]
struct Inner {
    heap: BinaryHeap<TimerEntry>,
    closed: bool,
}

/// Deadline-ordered queue feeding the timer thread.
pub(crate) struct TimerQueue {
    inner: Mutex<Inner>,
    cv: Condvar,
}

impl TimerQueue {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            cv: Condvar::new(),
        }
    }

    /// Inserts an entry and wakes the timer thread so it can recompute its
    /// sleep deadline.
    pub(crate) fn push(&self, entry: TimerEntry) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.heap.push(entry);
        self.cv.notify_one();
    }

    /// Blocks until the earliest entry is due, then pops and returns its
    /// actor. Returns `None` once the queue is closed.
    ///
    /// Wake conditions while sleeping: close requested, an insertion (which
    /// may carry an earlier deadline), or a spurious wakeup; every wake
    /// re-evaluates the current heap top.
    pub(crate) fn next_due(&self) -> Option<Arc<TaskActor>> {
        let mut inner = self.inner.lock();
        loop {
            if inner.closed {
                return None;
            }
            let Some(top) = inner.heap.peek() else {
                self.cv.wait(&mut inner);
                continue;
            };
            let deadline = top.deadline;
            if deadline <= clock::now() {
                if let Some(entry) = inner.heap.pop() {
                    return Some(entry.actor);
                }
                continue;
            }
            let _ = self.cv.wait_until(&mut inner, deadline);
        }
    }

    /// Closes the queue and wakes the timer thread. Remaining entries are
    /// released when the queue is dropped.
    pub(crate) fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        self.cv.notify_all();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().heap.len()
    }
}
