//! # SubscriberSet: panic-isolated fan-out over multiple subscribers.
//!
//! [`SubscriberSet`] delivers each [`Event`] to every registered subscriber in
//! registration order, on the bus dispatcher thread.
//!
//! ## What it guarantees
//! - Per-set FIFO: subscribers see events in publish order.
//! - Panics inside subscribers are caught and reported to stderr (isolation);
//!   the remaining subscribers still receive the event.
//!
//! ## What it does **not** guarantee
//! - Concurrency between subscribers: fan-out is sequential, so one slow
//!   subscriber delays the rest.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::error::panic_message;
use crate::events::Event;

use super::Subscriber;

/// Composite fan-out over a fixed set of subscribers.
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscriber>>,
}

impl SubscriberSet {
    /// Creates a new set (maybe empty).
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscriber>>) -> Self {
        Self { subs }
    }

    /// Delivers one event to every subscriber, isolating panics.
    pub fn emit(&self, event: &Event) {
        for sub in &self.subs {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| sub.handle(event))) {
                eprintln!(
                    "[tickvisor] subscriber '{}' panicked: {}",
                    sub.name(),
                    panic_message(payload.as_ref()),
                );
            }
        }
    }
}
