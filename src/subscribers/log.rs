//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and the demos.
//!
//! ## Output format
//! ```text
//! [added] task=press-guard
//! [signal-raised] task=press-guard
//! [cycle-failed] task=press-guard err="cycle failed: sensor offline"
//! [removed] task=press-guard
//! [shutdown-requested]
//! [stopped]
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscriber;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use.
/// Implement a custom [`Subscriber`] for structured logging or metrics
/// collection.
pub struct LogWriter;

impl Subscriber for LogWriter {
    fn handle(&self, e: &Event) {
        match e.kind {
            EventKind::TaskAdded => println!("[added] task={:?}", e.task),
            EventKind::TaskUpdated => println!("[updated] task={:?}", e.task),
            EventKind::TaskRemoved => println!("[removed] task={:?}", e.task),
            EventKind::SignalRaised => println!("[signal-raised] task={:?}", e.task),
            EventKind::SignalCleared => println!("[signal-cleared] task={:?}", e.task),
            EventKind::ActionRaised => println!("[action-raised] task={:?}", e.task),
            EventKind::ActionCleared => println!("[action-cleared] task={:?}", e.task),
            EventKind::CycleFailed => {
                println!("[cycle-failed] task={:?} err={:?}", e.task, e.error);
            }
            EventKind::ShutdownRequested => println!("[shutdown-requested]"),
            EventKind::SchedulerStopped => println!("[stopped]"),
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
