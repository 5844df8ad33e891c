//! # Runtime events emitted by the scheduler and task cycles.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Management events**: registry mutations (task added, updated, removed).
//! - **Channel events**: per-task channel edges (raised, cleared).
//! - **Runtime events**: cycle failures and scheduler shutdown progress.
//!
//! The [`Event`] struct carries a timestamp, an optional task name, and an
//! optional error message.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically, so stateful consumers can order events correctly even when
//! deliveries interleave across threads.
//!
//! ## Example
//! ```rust
//! use tickvisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::CycleFailed)
//!     .with_task("press-guard")
//!     .with_error("cycle failed: sensor offline");
//!
//! assert_eq!(ev.kind, EventKind::CycleFailed);
//! assert_eq!(ev.task.as_deref(), Some("press-guard"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering. Starts at 1 so consumers can
/// use 0 as a "never seen" sentinel.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Task management events ===
    /// Task was created and scheduled.
    TaskAdded,
    /// Task configuration was replaced.
    TaskUpdated,
    /// Task was stopped and removed from the registry.
    TaskRemoved,

    // === Channel events ===
    /// Signal channel rising edge.
    SignalRaised,
    /// Signal channel falling edge.
    SignalCleared,
    /// Action channel rising edge.
    ActionRaised,
    /// Action channel falling edge.
    ActionCleared,

    // === Runtime events ===
    /// A task cycle failed (callback error or panic). The task stays scheduled.
    CycleFailed,
    /// Shutdown has begun; queues are being drained.
    ShutdownRequested,
    /// All scheduler threads have stopped. Terminal event on the bus.
    SchedulerStopped,
}

/// Runtime event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp (may go backwards, use for display only).
    pub at: SystemTime,
    /// The kind of event.
    pub kind: EventKind,
    /// Name of the task, if applicable.
    pub task: Option<String>,
    /// Error message, if the event represents a failure.
    pub error: Option<String>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            error: None,
        }
    }

    /// Attaches a task name.
    pub fn with_task(mut self, name: impl Into<String>) -> Self {
        self.task = Some(name.into());
        self
    }

    /// Attaches an error message.
    pub fn with_error(mut self, msg: impl Into<String>) -> Self {
        self.error = Some(msg.into());
        self
    }
}
