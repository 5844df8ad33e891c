//! # Core subscriber trait.
//!
//! `Subscriber` is the extension point for plugging custom event handlers into
//! the runtime. Handlers run on the bus dispatcher thread, one event at a
//! time, in publish order.
//!
//! ## Contract
//! - Handlers should return quickly; a slow subscriber delays delivery to the
//!   other subscribers and can force the bus to drop events once its channel
//!   fills up.
//! - Panics inside a handler are caught by the
//!   [`SubscriberSet`](crate::subscribers::SubscriberSet) and do not disturb
//!   other subscribers or the runtime.

use crate::events::Event;

/// Contract for event subscribers.
pub trait Subscriber: Send + Sync + 'static {
    /// Handles a single event.
    fn handle(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
