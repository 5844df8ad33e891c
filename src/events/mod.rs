//! # Runtime events emitted by the scheduler.
//!
//! Components publish [`Event`]s to the [`Bus`]; a dedicated dispatcher thread
//! fans them out to the registered subscribers.
//!
//! ```text
//! Scheduler / TaskActor ── publish(Event) ──► Bus (bounded channel)
//!                                               │
//!                                        dispatcher thread
//!                                               │
//!                                        SubscriberSet::emit(&Event)
//!                                               ├──► LogWriter
//!                                               ├──► StatusTracker
//!                                               └──► custom subscribers
//! ```
//!
//! ## Rules
//! - Publishing never blocks the hot path: when the channel is full the event
//!   is dropped.
//! - Events carry a globally monotonic sequence number so stateful consumers
//!   can reject stale deliveries.
//! - Fan-out happens on the dispatcher thread; subscriber panics are isolated
//!   there and never reach the publisher.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};

pub(crate) use bus::spawn_dispatcher;
