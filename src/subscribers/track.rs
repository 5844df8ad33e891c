//! # Task status tracker with sequence-based ordering.
//!
//! [`StatusTracker`] folds bus events into an authoritative per-task view:
//! whether the task is registered, which channels are currently raised, and
//! how many cycles have failed. Event sequence numbers guard against
//! out-of-order delivery.
//!
//! ## Rules
//! - `TaskAdded` marks the entry registered; `TaskRemoved` unregisters it and
//!   clears both channels.
//! - Channel events toggle the `signaled` / `acting` flags.
//! - `CycleFailed` increments the failure count.
//! - Events with `seq <= last_seq` for the task are rejected as stale.
//! - Removed entries are kept (unregistered) so a late, stale event cannot
//!   resurrect them; reads are eventually consistent.

use dashmap::DashMap;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscriber;

/// Queryable status of one task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStatus {
    /// True while the task is present in the registry.
    pub registered: bool,
    /// True while the signal channel is raised.
    pub signaled: bool,
    /// True while the action channel is raised.
    pub acting: bool,
    /// Number of failed cycles observed.
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Entry {
    last_seq: u64,
    status: TaskStatus,
}

/// Concurrent tracker of per-task status, fed by bus events.
#[derive(Default)]
pub struct StatusTracker {
    state: DashMap<String, Entry>,
}

impl StatusTracker {
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status of a task, if it has ever been observed.
    pub fn status(&self, name: &str) -> Option<TaskStatus> {
        self.state.get(name).map(|e| e.status)
    }

    /// True if the task's signal channel is currently raised.
    pub fn is_signaled(&self, name: &str) -> bool {
        self.status(name).is_some_and(|s| s.signaled)
    }

    /// True if the task's action channel is currently raised.
    pub fn is_acting(&self, name: &str) -> bool {
        self.status(name).is_some_and(|s| s.acting)
    }

    /// Number of failed cycles observed for the task.
    pub fn failures(&self, name: &str) -> u64 {
        self.status(name).map_or(0, |s| s.failures)
    }

    /// Returns a sorted list of currently registered task names.
    pub fn snapshot(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .iter()
            .filter(|e| e.status.registered)
            .map(|e| e.key().clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Applies one event if it is newer than the last seen for its task.
    ///
    /// Returns `true` if the status changed, `false` otherwise (including
    /// stale rejections and events without a task name).
    pub fn update(&self, ev: &Event) -> bool {
        let Some(name) = ev.task.as_deref() else {
            return false;
        };

        let mut entry = self.state.entry(name.to_string()).or_default();
        if ev.seq <= entry.last_seq {
            return false;
        }

        let before = entry.status;
        match ev.kind {
            EventKind::TaskAdded => entry.status.registered = true,
            EventKind::TaskRemoved => {
                entry.status.registered = false;
                entry.status.signaled = false;
                entry.status.acting = false;
            }
            EventKind::SignalRaised => entry.status.signaled = true,
            EventKind::SignalCleared => entry.status.signaled = false,
            EventKind::ActionRaised => entry.status.acting = true,
            EventKind::ActionCleared => entry.status.acting = false,
            EventKind::CycleFailed => entry.status.failures += 1,
            _ => {}
        }
        entry.last_seq = ev.seq;
        entry.status != before
    }
}

impl Subscriber for StatusTracker {
    fn handle(&self, event: &Event) {
        self.update(event);
    }

    fn name(&self) -> &'static str {
        "status_tracker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_lifecycle_and_channel_events() {
        let tracker = StatusTracker::new();
        tracker.update(&Event::now(EventKind::TaskAdded).with_task("t"));
        tracker.update(&Event::now(EventKind::SignalRaised).with_task("t"));
        tracker.update(&Event::now(EventKind::ActionRaised).with_task("t"));
        tracker.update(&Event::now(EventKind::CycleFailed).with_task("t"));

        let status = tracker.status("t").unwrap();
        assert!(status.registered && status.signaled && status.acting);
        assert_eq!(status.failures, 1);
        assert_eq!(tracker.snapshot(), vec!["t".to_string()]);

        tracker.update(&Event::now(EventKind::TaskRemoved).with_task("t"));
        let status = tracker.status("t").unwrap();
        assert!(!status.registered && !status.signaled && !status.acting);
        assert!(tracker.snapshot().is_empty());
    }

    #[test]
    fn stale_events_are_rejected() {
        let tracker = StatusTracker::new();
        let raised = Event::now(EventKind::SignalRaised).with_task("t");
        let cleared = Event::now(EventKind::SignalCleared).with_task("t");

        tracker.update(&cleared);
        // The earlier-seq event arrives late and must not flip the flag back.
        assert!(!tracker.update(&raised));
        assert!(!tracker.is_signaled("t"));
    }

    #[test]
    fn events_without_task_are_ignored() {
        let tracker = StatusTracker::new();
        assert!(!tracker.update(&Event::now(EventKind::ShutdownRequested)));
    }
}
