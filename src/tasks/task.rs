//! # Task contract and shared handle type.
//!
//! This module defines the [`Task`] trait implemented by user logic and the
//! common handle type [`TaskRef`], an `Arc<dyn Task>` suitable for sharing
//! across the runtime.
//!
//! A task never manages its own timing or debouncing: the scheduler drives one
//! cycle at a time and guarantees cycles of the same task are serialized, so
//! implementations only need interior mutability for state shared with code
//! outside the scheduler (an atomic sensor reading, a command flag).

use std::sync::Arc;

use crate::error::TaskError;

/// # Shared handle to a task object.
///
/// This is the primary type used by the registry and the task factories.
pub type TaskRef = Arc<dyn Task>;

/// Intent reported by [`Task::plan`] for the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    /// True if the signal channel should be driven toward active.
    pub want_signal: bool,
    /// True if the action channel should be driven toward active.
    pub want_act: bool,
}

impl Plan {
    /// Creates a plan from both channel intents.
    pub const fn new(want_signal: bool, want_act: bool) -> Self {
        Self {
            want_signal,
            want_act,
        }
    }

    /// A plan that drives neither channel.
    pub const fn idle() -> Self {
        Self::new(false, false)
    }
}

/// # Periodically cycled unit of user logic.
///
/// The scheduler calls [`plan`](Task::plan) once per cycle and routes the
/// returned intents through the per-channel debounce machines, invoking
/// [`signal`](Task::signal) / [`act`](Task::act) on rising edges, heartbeats,
/// and falling edges.
///
/// Callbacks should return promptly: a cycle occupies one worker thread for
/// its full duration. Errors are caught at the cycle boundary, reported on the
/// event bus, and do not unschedule the task.
///
/// # Example
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use tickvisor::{Plan, Task, TaskError};
///
/// struct DoorSensor {
///     open: AtomicBool,
/// }
///
/// impl Task for DoorSensor {
///     fn plan(&self) -> Result<Plan, TaskError> {
///         Ok(Plan::new(self.open.load(Ordering::Relaxed), false))
///     }
///
///     fn signal(&self, active: bool) -> Result<(), TaskError> {
///         println!("door alarm: {active}");
///         Ok(())
///     }
///
///     fn act(&self, _active: bool) -> Result<(), TaskError> {
///         Ok(())
///     }
/// }
/// ```
pub trait Task: Send + Sync + 'static {
    /// Reports the task's current intent for both channels.
    fn plan(&self) -> Result<Plan, TaskError>;

    /// Signal channel side-effect.
    ///
    /// Invoked with `true` on the rising edge and on each heartbeat re-fire,
    /// and with `false` on the falling edge (withdrawn intent or closed gate).
    fn signal(&self, active: bool) -> Result<(), TaskError>;

    /// Action channel side-effect; the analogue of [`signal`](Task::signal)
    /// for the second channel.
    fn act(&self, active: bool) -> Result<(), TaskError>;
}
