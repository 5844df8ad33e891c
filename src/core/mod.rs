//! # Scheduling core: timer, worker pool, registry, and lifecycle.
//!
//! This module contains the embedded implementation of the tickvisor runtime.
//! The public API re-exported from here is [`Scheduler`] and the per-task
//! record [`TaskActor`]; everything else is an internal building block the
//! scheduler wires together.
//!
//! ## Files & responsibilities
//! - **scheduler.rs**: public facade; owns the threads (one timer, N workers,
//!   one bus dispatcher), the registry, and both queues; drives shutdown.
//! - **registry.rs**: name → task map; the sole durable owner of task records.
//! - **actor.rs**: per-task record (config snapshot, liveness flag, channel
//!   state) and the cycle: snapshot → plan → signal channel → action channel.
//! - **timer.rs**: min-heap of `(deadline, actor)` entries with a condvar the
//!   timer thread sleeps on until the earliest deadline.
//! - **ready.rs**: FIFO of due actors with a condvar the workers block on.
//! - **clock.rs**: monotonic time helpers.
//!
//! ## Data flow
//! ```text
//! create(name, cfg, factory)
//!   └─► Registry::create ──► TimerQueue::push(now + interval)
//!
//! timer thread                         worker threads (N)
//! loop {                               loop {
//!   actor = TimerQueue::next_due()       actor = ReadyQueue::pop()
//!   if actor.is_active() {               if actor.is_active() {
//!     ReadyQueue::push(actor)              actor.run_cycle()   // guarded
//!   }                                      if actor.is_active() {
//! }                                          TimerQueue::push(now + interval)
//!                                          }
//!                                        }
//!                                      }
//! ```
//!
//! ## Rules
//! - A scheduled task is in exactly one place at a time: the timer queue, the
//!   ready queue, or executing in a worker. This queue discipline serializes
//!   cycles of one task without any per-task execution lock.
//! - Deletion is lazy: `stop` flips the actor's `active` flag and drops the
//!   registry entry; stale queue references are skipped when popped.
//! - Lock order: the registry lock may be taken before (never after) a queue
//!   lock; never hold both queue locks; the per-task config lock is leaf.
//! - A failing cycle (callback error or panic) is published as `CycleFailed`
//!   and the task is rescheduled; workers never die with a task.

pub(crate) mod actor;
pub(crate) mod clock;
pub(crate) mod ready;
pub(crate) mod registry;
mod scheduler;
pub(crate) mod timer;

pub use actor::TaskActor;
pub use scheduler::Scheduler;
