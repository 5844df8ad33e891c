//! # Function-backed task implementation.
//!
//! [`TaskFn`] builds a [`Task`] from a plan closure plus optional edge
//! handlers, for the common case where the callbacks cannot fail. Tasks with
//! fallible callbacks implement [`Task`] directly.

use std::sync::Arc;

use crate::error::TaskError;
use crate::tasks::task::{Plan, Task, TaskRef};

type EdgeHandler = Box<dyn Fn(bool) + Send + Sync>;

/// # Closure-backed task.
///
/// The plan closure runs once per cycle; `on_signal` / `on_act` handlers (if
/// installed) receive the channel edges. Missing handlers make the channel's
/// side-effect a no-op, which is convenient for single-channel tasks.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use tickvisor::{Plan, TaskFn, TaskRef};
///
/// let pressed = Arc::new(AtomicBool::new(false));
/// let watched = Arc::clone(&pressed);
///
/// let t: TaskRef = TaskFn::new(move || Plan::new(watched.load(Ordering::Relaxed), false))
///     .on_signal(|active| println!("button held: {active}"))
///     .arc();
/// ```
pub struct TaskFn<P>
where
    P: Fn() -> Plan + Send + Sync + 'static,
{
    plan: P,
    on_signal: Option<EdgeHandler>,
    on_act: Option<EdgeHandler>,
}

impl<P> TaskFn<P>
where
    P: Fn() -> Plan + Send + Sync + 'static,
{
    /// Creates a task from a plan closure with no edge handlers.
    pub fn new(plan: P) -> Self {
        Self {
            plan,
            on_signal: None,
            on_act: None,
        }
    }

    /// Installs the signal channel edge handler.
    pub fn on_signal(mut self, handler: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_signal = Some(Box::new(handler));
        self
    }

    /// Installs the action channel edge handler.
    pub fn on_act(mut self, handler: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_act = Some(Box::new(handler));
        self
    }

    /// Finishes the builder, returning a shared handle (`Arc<dyn Task>`).
    pub fn arc(self) -> TaskRef {
        Arc::new(self)
    }
}

impl<P> Task for TaskFn<P>
where
    P: Fn() -> Plan + Send + Sync + 'static,
{
    fn plan(&self) -> Result<Plan, TaskError> {
        Ok((self.plan)())
    }

    fn signal(&self, active: bool) -> Result<(), TaskError> {
        if let Some(handler) = &self.on_signal {
            handler(active);
        }
        Ok(())
    }

    fn act(&self, active: bool) -> Result<(), TaskError> {
        if let Some(handler) = &self.on_act {
            handler(active);
        }
        Ok(())
    }
}
