//! # Scheduler: composition root and thread lifecycle.
//!
//! [`Scheduler`] owns the registry, both queues, the event bus, and the
//! threads that drive them: one timer thread, N worker threads, and one bus
//! dispatcher.
//!
//! ```text
//! Scheduler::new(cfg, subscribers)
//!   ├─► spawn dispatcher (bus → SubscriberSet)
//!   ├─► spawn timer thread
//!   └─► spawn N worker threads
//!
//! shutdown()                       (idempotent; also runs on Drop)
//!   ├─► running := false, publish ShutdownRequested
//!   ├─► close timer + ready queues (wakes every blocked thread)
//!   ├─► join timer, join workers
//!   ├─► clear registry             (releases durable task handles)
//!   └─► publish SchedulerStopped, join dispatcher
//! ```
//!
//! ## Rules
//! - API calls after shutdown fail with [`RuntimeError::ShutDown`]; they never
//!   panic.
//! - `stop` cannot interrupt an in-flight cycle; it takes effect for
//!   subsequent cycles.
//! - Rescheduling reads the interval fresh from the task's live configuration,
//!   so an interval update applies to the next reschedule, never the in-flight
//!   one.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::config::Config;
use crate::core::actor::TaskActor;
use crate::core::clock;
use crate::core::ready::ReadyQueue;
use crate::core::registry::Registry;
use crate::core::timer::{TimerEntry, TimerQueue};
use crate::error::{RuntimeError, TaskError, panic_message};
use crate::events::{Bus, Event, EventKind, spawn_dispatcher};
use crate::subscribers::{Subscriber, SubscriberSet};
use crate::tasks::{TaskConfig, TaskRef};

/// Everything the scheduler threads share.
struct Core {
    running: AtomicBool,
    timer: TimerQueue,
    ready: ReadyQueue,
    registry: Registry,
    bus: Bus,
}

struct Threads {
    timer: JoinHandle<()>,
    workers: Vec<JoinHandle<()>>,
    dispatcher: JoinHandle<()>,
}

/// Thread-safe periodic task scheduler.
///
/// See the [crate docs](crate) for an end-to-end example. All methods take
/// `&self`; the scheduler is usually shared behind an `Arc`.
pub struct Scheduler {
    core: Arc<Core>,
    threads: Mutex<Option<Threads>>,
}

impl Scheduler {
    /// Builds the scheduler and starts its threads.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscriber>>) -> Self {
        let (bus, rx) = Bus::new(cfg.bus_capacity);
        let dispatcher = spawn_dispatcher(rx, SubscriberSet::new(subscribers));

        let core = Arc::new(Core {
            running: AtomicBool::new(true),
            timer: TimerQueue::new(),
            ready: ReadyQueue::new(),
            registry: Registry::new(),
            bus,
        });

        let timer = {
            let core = Arc::clone(&core);
            std::thread::spawn(move || timer_loop(&core))
        };
        let workers = (0..cfg.workers.max(1))
            .map(|_| {
                let core = Arc::clone(&core);
                std::thread::spawn(move || worker_loop(&core))
            })
            .collect();

        Self {
            core,
            threads: Mutex::new(Some(Threads {
                timer,
                workers,
                dispatcher,
            })),
        }
    }

    /// Creates and schedules a task.
    ///
    /// The factory is only invoked when `name` is free; its first cycle is due
    /// one interval from now. Fails with [`RuntimeError::InvalidConfig`] on an
    /// empty name or zero interval, [`RuntimeError::TaskAlreadyExists`] on
    /// collision, and [`RuntimeError::FactoryFailed`] when the factory returns
    /// `None`.
    pub fn create<F>(&self, name: &str, config: TaskConfig, factory: F) -> Result<(), RuntimeError>
    where
        F: FnOnce() -> Option<TaskRef>,
    {
        self.ensure_running()?;
        if name.is_empty() {
            return Err(RuntimeError::invalid("task name must be non-empty"));
        }
        config.validate()?;

        let actor = self
            .core
            .registry
            .create(name, config, factory, self.core.bus.clone())?;
        self.core
            .timer
            .push(TimerEntry::new(clock::deadline_after(actor.interval()), actor));
        self.core
            .bus
            .publish(Event::now(EventKind::TaskAdded).with_task(name));
        Ok(())
    }

    /// Stops a task: marks it inactive and removes it from the registry.
    ///
    /// Deletion is lazy; an in-flight cycle completes, stale queue references
    /// are dropped when popped, and no further cycle starts.
    pub fn stop(&self, name: &str) -> Result<(), RuntimeError> {
        self.ensure_running()?;
        self.core.registry.stop(name)?;
        self.core
            .bus
            .publish(Event::now(EventKind::TaskRemoved).with_task(name));
        Ok(())
    }

    /// Atomically replaces a task's configuration.
    ///
    /// A cycle that has already snapshotted sees the prior value for the rest
    /// of that cycle; the next cycle observes the new one. A changed interval
    /// applies from the next reschedule.
    pub fn update(&self, name: &str, config: TaskConfig) -> Result<(), RuntimeError> {
        self.ensure_running()?;
        config.validate()?;
        self.core.registry.update(name, config)?;
        self.core
            .bus
            .publish(Event::now(EventKind::TaskUpdated).with_task(name));
        Ok(())
    }

    /// Returns a handle to a registered task, for inspection.
    pub fn lookup(&self, name: &str) -> Option<Arc<TaskActor>> {
        self.core.registry.lookup(name)
    }

    /// Number of currently registered tasks.
    pub fn count(&self) -> usize {
        self.core.registry.count()
    }

    /// Blocking, idempotent terminate. Also runs on drop.
    ///
    /// Interrupts waiting threads but not in-flight cycles; returns once the
    /// timer thread, every worker, and the bus dispatcher have exited.
    pub fn shutdown(&self) {
        if self.core.running.swap(false, Ordering::AcqRel) {
            self.core
                .bus
                .publish(Event::now(EventKind::ShutdownRequested));
        }
        self.core.timer.close();
        self.core.ready.close();

        let threads = self.threads.lock().take();
        if let Some(threads) = threads {
            let _ = threads.timer.join();
            for worker in threads.workers {
                let _ = worker.join();
            }
            self.core.registry.clear();
            self.core.bus.publish_stop();
            let _ = threads.dispatcher.join();
        }
    }

    fn ensure_running(&self) -> Result<(), RuntimeError> {
        if self.core.running.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(RuntimeError::ShutDown)
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Timer thread: moves due entries to the ready queue, dropping stale ones.
fn timer_loop(core: &Core) {
    while core.running.load(Ordering::Acquire) {
        let Some(actor) = core.timer.next_due() else {
            break;
        };
        if actor.is_active() {
            core.ready.push(actor);
        }
        // Inactive: dropped here, completing the lazy deletion.
    }
}

/// Worker thread: executes cycles off the ready queue and reschedules.
fn worker_loop(core: &Core) {
    while core.running.load(Ordering::Acquire) {
        let Some(actor) = core.ready.pop() else {
            break;
        };
        if !actor.is_active() {
            continue;
        }
        run_guarded(&actor, &core.bus);
        if actor.is_active() {
            let deadline = clock::deadline_after(actor.interval());
            core.timer.push(TimerEntry::new(deadline, actor));
        }
    }
}

/// Runs one cycle with the failure boundary around it: callback errors and
/// panics are published as `CycleFailed` and the worker carries on.
fn run_guarded(actor: &Arc<TaskActor>, bus: &Bus) {
    let outcome = catch_unwind(AssertUnwindSafe(|| actor.run_cycle()));
    let error = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(err)) => err,
        Err(payload) => TaskError::Panicked {
            payload: panic_message(payload.as_ref()),
        },
    };
    bus.publish(
        Event::now(EventKind::CycleFailed)
            .with_task(actor.name())
            .with_error(error.to_string()),
    );
}
