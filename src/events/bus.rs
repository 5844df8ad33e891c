//! # Event bus for broadcasting runtime events.
//!
//! [`Bus`] is a cloneable handle over a bounded [`crossbeam_channel`] sender.
//! Task actors and the scheduler publish [`Event`]s through it; a single
//! dispatcher thread drains the channel and fans events out to subscribers.
//!
//! ## Key characteristics:
//! - **Non-blocking publish**: the hot path never waits on observers.
//! - **Bounded capacity**: events are dropped when the channel is full.
//! - **Non-persistent**: events published with no subscribers are consumed
//!   and discarded; the system operates fine without observers.

use crossbeam_channel::{Receiver, Sender};

use crate::events::event::{Event, EventKind};
use crate::subscribers::SubscriberSet;

/// Cloneable publishing handle for runtime events.
#[derive(Clone)]
pub struct Bus {
    tx: Sender<Event>,
}

impl Bus {
    /// Creates a bus with the given channel capacity, returning the handle and
    /// the receiving end for the dispatcher.
    pub(crate) fn new(capacity: usize) -> (Self, Receiver<Event>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Publishes an event without blocking.
    ///
    /// If the channel is full the event is dropped silently; observability
    /// must never stall the timer or a worker.
    pub fn publish(&self, event: Event) {
        let _ = self.tx.try_send(event);
    }

    /// Publishes the terminal [`EventKind::SchedulerStopped`] event, blocking
    /// until it is enqueued so the dispatcher is guaranteed to see it and
    /// drain out.
    pub(crate) fn publish_stop(&self) {
        let _ = self.tx.send(Event::now(EventKind::SchedulerStopped));
    }
}

/// Spawns the dispatcher thread: drains the channel and fans each event out to
/// the subscriber set until the terminal event arrives or all senders drop.
pub(crate) fn spawn_dispatcher(
    rx: Receiver<Event>,
    subscribers: SubscriberSet,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for event in rx.iter() {
            let stop = event.kind == EventKind::SchedulerStopped;
            subscribers.emit(&event);
            if stop {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::subscribers::Subscriber;

    struct Counter(AtomicUsize);

    impl Subscriber for Counter {
        fn handle(&self, _event: &Event) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn dispatcher_delivers_and_drains_on_stop() {
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let (bus, rx) = Bus::new(16);
        let subs = SubscriberSet::new(vec![counter.clone() as Arc<dyn Subscriber>]);
        let handle = spawn_dispatcher(rx, subs);

        bus.publish(Event::now(EventKind::TaskAdded));
        bus.publish(Event::now(EventKind::TaskRemoved));
        bus.publish_stop();
        handle.join().unwrap();

        // Two events plus the terminal one.
        assert_eq!(counter.0.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn publish_drops_when_full() {
        let (bus, rx) = Bus::new(1);
        bus.publish(Event::now(EventKind::TaskAdded));
        bus.publish(Event::now(EventKind::TaskAdded)); // dropped, no panic
        assert_eq!(rx.len(), 1);
    }
}
