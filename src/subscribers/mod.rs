//! # Event subscribers for the tickvisor runtime.
//!
//! This module provides the [`Subscriber`] trait and built-in implementations
//! for handling runtime events delivered through the event bus.
//!
//! ```text
//! Event flow:
//!   publisher ── publish(Event) ──► Bus ──► dispatcher thread
//!                                               │
//!                                        SubscriberSet::emit(&Event)
//!                                               │
//!                                          ┌────┴──────┬──────────┐
//!                                          ▼           ▼          ▼
//!                                      LogWriter  StatusTracker  Custom
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** observe and react (logging, metrics, alerts).
//! - **Stateful subscribers** fold events into queryable state
//!   ([`StatusTracker`]).
//!
//! ## Implementing custom subscribers
//! ```
//! use tickvisor::{Event, EventKind, Subscriber};
//!
//! struct FailureCounter;
//!
//! impl Subscriber for FailureCounter {
//!     fn handle(&self, event: &Event) {
//!         if event.kind == EventKind::CycleFailed {
//!             // increment a metric...
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;
mod track;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscriber;
pub use track::{StatusTracker, TaskStatus};
