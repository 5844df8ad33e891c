//! # Ready queue: FIFO of due tasks feeding the worker pool.
//!
//! The timer thread pushes actors whose deadline has arrived; workers block in
//! [`ReadyQueue::pop`] until an entry or a close arrives. Entries are popped
//! first-in-first-out, which bounds how long any due task can be starved
//! regardless of which blocked worker the OS wakes.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::core::actor::TaskActor;

#[derive(Default)]
struct Inner {
    queue: VecDeque<Arc<TaskActor>>,
    closed: bool,
}

/// FIFO handoff between the timer thread and the workers.
pub(crate) struct ReadyQueue {
    inner: Mutex<Inner>,
    cv: Condvar,
}

impl ReadyQueue {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            cv: Condvar::new(),
        }
    }

    /// Enqueues a due actor and wakes one worker.
    pub(crate) fn push(&self, actor: Arc<TaskActor>) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.queue.push_back(actor);
        self.cv.notify_one();
    }

    /// Blocks until an entry is available and pops it.
    ///
    /// Returns `None` once the queue is closed **and** empty; entries still
    /// queued at close time are handed out normally, so a worker may run one
    /// final cycle during shutdown.
    pub(crate) fn pop(&self) -> Option<Arc<TaskActor>> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(actor) = inner.queue.pop_front() {
                return Some(actor);
            }
            if inner.closed {
                return None;
            }
            self.cv.wait(&mut inner);
        }
    }

    /// Closes the queue and wakes all workers.
    pub(crate) fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        self.cv.notify_all();
    }
}
