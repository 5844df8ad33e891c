//! # TaskActor: per-task record and cycle driver.
//!
//! A [`TaskActor`] is what the registry owns and the queues carry: the task's
//! identity, its liveness flag, the mutex-guarded configuration, the two
//! channel state machines, and the user logic behind [`Task`].
//!
//! ## The cycle
//! ```text
//! run_cycle()
//!   ├─► active == false?  → return (lazy deletion)
//!   ├─► snapshot config   (brief lock, clone, unlock)
//!   ├─► plan()            → (want_signal, want_act)
//!   ├─► signal channel step → signal(true/false) on edges/heartbeats
//!   └─► action channel step → act(true/false)    on edges/heartbeats
//! ```
//!
//! ## Rules
//! - Cycles of one task never overlap: the queue discipline hands exclusive
//!   possession of the actor to one worker at a time, so the channel state
//!   mutex is uncontended.
//! - The configuration snapshot is taken once per cycle; an update published
//!   mid-cycle is observed from the next cycle on.
//! - Channel edges (not heartbeats) are published on the event bus.
//! - A callback error aborts the rest of the cycle; whatever channel state was
//!   already advanced stays advanced, and the caller reports the failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::tasks::channel::{ChannelState, Edge};
use crate::tasks::{TaskConfig, TaskRef};

#[derive(Default)]
struct Channels {
    signal: ChannelState,
    action: ChannelState,
}

/// Scheduler-owned record of one registered task.
///
/// Handles are shared: the registry keeps the durable one, the queues hold
/// transient clones, and [`Scheduler::lookup`](crate::Scheduler::lookup) hands
/// out inspection copies. The record is destroyed when the last handle drops.
pub struct TaskActor {
    name: String,
    /// False marks the task for lazy deletion: queue references are skipped
    /// when popped and the actor is never rescheduled.
    active: AtomicBool,
    config: Mutex<TaskConfig>,
    channels: Mutex<Channels>,
    task: TaskRef,
    bus: Bus,
}

impl TaskActor {
    pub(crate) fn new(name: impl Into<String>, config: TaskConfig, task: TaskRef, bus: Bus) -> Self {
        Self {
            name: name.into(),
            active: AtomicBool::new(true),
            config: Mutex::new(config),
            channels: Mutex::new(Channels::default()),
            task,
            bus,
        }
    }

    /// The task's registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True until the task is stopped.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Returns a copy of the current configuration (brief lock-and-clone).
    pub fn config(&self) -> TaskConfig {
        self.config.lock().clone()
    }

    /// Atomically replaces the configuration. A cycle that has already taken
    /// its snapshot finishes under the old value; the next cycle sees the new
    /// one.
    pub(crate) fn update_config(&self, config: TaskConfig) {
        *self.config.lock() = config;
    }

    /// Current interval, read fresh from the live configuration. Used by the
    /// workers when rescheduling, so an interval update takes effect on the
    /// next reschedule.
    pub(crate) fn interval(&self) -> Duration {
        self.config.lock().interval
    }

    /// Executes one cycle. See the module docs for the fixed sequence.
    pub(crate) fn run_cycle(&self) -> Result<(), TaskError> {
        if !self.is_active() {
            return Ok(());
        }

        let cfg = self.config();
        let plan = self.task.plan()?;

        let mut channels = self.channels.lock();
        let edge = channels
            .signal
            .step(&cfg.signal, plan.want_signal, |on| self.task.signal(on))?;
        self.publish_edge(edge, EventKind::SignalRaised, EventKind::SignalCleared);

        let edge = channels
            .action
            .step(&cfg.action, plan.want_act, |on| self.task.act(on))?;
        self.publish_edge(edge, EventKind::ActionRaised, EventKind::ActionCleared);

        Ok(())
    }

    fn publish_edge(&self, edge: Edge, raised: EventKind, cleared: EventKind) {
        let kind = match edge {
            Edge::Raised => raised,
            Edge::Cleared => cleared,
            Edge::None | Edge::Heartbeat => return,
        };
        self.bus.publish(Event::now(kind).with_task(&self.name));
    }

    /// True while the signal channel is raised. Exposed for inspection; the
    /// value is only stable between cycles.
    pub fn is_signaled(&self) -> bool {
        self.channels.lock().signal.latched()
    }

    /// True while the action channel is raised.
    pub fn is_acting(&self) -> bool {
        self.channels.lock().action.latched()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::tasks::{ChannelConfig, Plan, Task};

    /// Scriptable probe counting every callback, in the spirit of the mock
    /// tasks the integration suite uses.
    #[derive(Default)]
    struct Probe {
        want_signal: AtomicBool,
        want_act: AtomicBool,
        signal_on: AtomicU64,
        signal_off: AtomicU64,
        act_on: AtomicU64,
        act_off: AtomicU64,
    }

    impl Probe {
        fn set_plan(&self, want_signal: bool, want_act: bool) {
            self.want_signal.store(want_signal, Ordering::Relaxed);
            self.want_act.store(want_act, Ordering::Relaxed);
        }
    }

    impl Task for Probe {
        fn plan(&self) -> Result<Plan, TaskError> {
            Ok(Plan::new(
                self.want_signal.load(Ordering::Relaxed),
                self.want_act.load(Ordering::Relaxed),
            ))
        }

        fn signal(&self, active: bool) -> Result<(), TaskError> {
            if active {
                self.signal_on.fetch_add(1, Ordering::Relaxed);
            } else {
                self.signal_off.fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        }

        fn act(&self, active: bool) -> Result<(), TaskError> {
            if active {
                self.act_on.fetch_add(1, Ordering::Relaxed);
            } else {
                self.act_off.fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        }
    }

    fn config(tolerance: u32, repeat: u32) -> TaskConfig {
        TaskConfig {
            interval: Duration::from_millis(100),
            signal: ChannelConfig {
                tolerance,
                repeat,
                allow: true,
            },
            action: ChannelConfig {
                tolerance,
                repeat: 0,
                allow: true,
            },
        }
    }

    fn actor_with(cfg: TaskConfig) -> (Arc<TaskActor>, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        let (bus, _rx) = Bus::new(64);
        let task: TaskRef = probe.clone();
        (Arc::new(TaskActor::new("probe", cfg, task, bus)), probe)
    }

    fn cycles(actor: &TaskActor, n: u32) {
        for _ in 0..n {
            actor.run_cycle().unwrap();
        }
    }

    #[test]
    fn activates_at_tolerance_and_stays_single_shot() {
        let (actor, probe) = actor_with(config(10, 0));
        probe.set_plan(true, false);
        cycles(&actor, 9);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 0);
        cycles(&actor, 1);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 1);
        assert!(actor.is_signaled());
        // 100 cycles total: still exactly one activation.
        cycles(&actor, 90);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 1);
        assert_eq!(probe.signal_off.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn glitch_during_accumulation_restarts_it() {
        let (actor, probe) = actor_with(config(10, 0));
        probe.set_plan(true, false);
        cycles(&actor, 3);
        probe.set_plan(false, false);
        cycles(&actor, 1);
        probe.set_plan(true, false);
        cycles(&actor, 5);
        // Cycle 9: still nothing.
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 0);
        // Five more consecutive trues complete a fresh run of ten.
        cycles(&actor, 5);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn withdraws_immediately_on_false_intent() {
        let (actor, probe) = actor_with(config(10, 0));
        probe.set_plan(true, false);
        cycles(&actor, 10);
        probe.set_plan(false, false);
        cycles(&actor, 1);
        assert_eq!(probe.signal_off.load(Ordering::Relaxed), 1);
        assert!(!actor.is_signaled());
    }

    #[test]
    fn heartbeat_refires_on_schedule() {
        let (actor, probe) = actor_with(config(10, 5));
        probe.set_plan(true, false);
        cycles(&actor, 26);
        // Fired at cycles 10, 15, 20, 25; never deactivated.
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 4);
        assert_eq!(probe.signal_off.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn closing_gate_deactivates_and_demands_fresh_accumulation() {
        let (actor, probe) = actor_with(config(10, 5));
        probe.set_plan(true, false);
        cycles(&actor, 12);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 1);

        let mut cfg = actor.config();
        cfg.signal.allow = false;
        actor.update_config(cfg.clone());
        cycles(&actor, 1);
        assert_eq!(probe.signal_off.load(Ordering::Relaxed), 1);

        cfg.signal.allow = true;
        actor.update_config(cfg);
        cycles(&actor, 9);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 1);
        cycles(&actor, 1);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn channels_run_independently() {
        let (actor, probe) = actor_with(config(10, 0));
        probe.set_plan(true, true);
        cycles(&actor, 10);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 1);
        assert_eq!(probe.act_on.load(Ordering::Relaxed), 1);

        probe.set_plan(false, true);
        cycles(&actor, 1);
        assert_eq!(probe.signal_off.load(Ordering::Relaxed), 1);
        assert_eq!(probe.act_off.load(Ordering::Relaxed), 0);
        assert!(actor.is_acting());
    }

    #[test]
    fn inactive_actor_skips_callbacks() {
        let (actor, probe) = actor_with(config(0, 0));
        probe.set_plan(true, true);
        actor.set_active(false);
        cycles(&actor, 5);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 0);
        assert_eq!(probe.act_on.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn config_update_applies_on_next_cycle() {
        let (actor, probe) = actor_with(config(10, 0));
        probe.set_plan(true, false);
        cycles(&actor, 5);
        // Lower the tolerance mid-accumulation: the counter (5) already meets it.
        let mut cfg = actor.config();
        cfg.signal.tolerance = 3;
        actor.update_config(cfg);
        cycles(&actor, 1);
        assert_eq!(probe.signal_on.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn plan_error_aborts_cycle_without_unscheduling() {
        struct FailingPlan;

        impl Task for FailingPlan {
            fn plan(&self) -> Result<Plan, TaskError> {
                Err(TaskError::fail("sensor offline"))
            }
            fn signal(&self, _active: bool) -> Result<(), TaskError> {
                unreachable!("plan failed before the channels ran");
            }
            fn act(&self, _active: bool) -> Result<(), TaskError> {
                unreachable!("plan failed before the channels ran");
            }
        }

        let (bus, _rx) = Bus::new(8);
        let actor = TaskActor::new("flaky", config(0, 0), Arc::new(FailingPlan), bus);
        assert!(actor.run_cycle().is_err());
        assert!(actor.is_active());
    }

    #[test]
    fn edges_are_published_to_the_bus() {
        let probe = Arc::new(Probe::default());
        let (bus, rx) = Bus::new(64);
        let actor = TaskActor::new("edges", config(2, 0), probe.clone() as TaskRef, bus);

        probe.set_plan(true, true);
        cycles(&actor, 2);
        probe.set_plan(false, false);
        cycles(&actor, 1);

        let kinds: Vec<EventKind> = rx.try_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::SignalRaised,
                EventKind::ActionRaised,
                EventKind::SignalCleared,
                EventKind::ActionCleared,
            ]
        );
    }
}
