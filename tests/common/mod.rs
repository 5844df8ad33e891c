//! Shared probe task and timing helpers for the integration suite.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tickvisor::{Plan, Task, TaskError, TaskRef};

/// Counting task whose plan is flipped from the test thread.
///
/// `cycles` increments inside `plan`, so waiting on it observes scheduler
/// progress without depending on wall-clock precision.
#[derive(Default)]
pub struct Probe {
    want_signal: AtomicBool,
    want_act: AtomicBool,
    pub cycles: AtomicU64,
    pub signal_on: AtomicU64,
    pub signal_off: AtomicU64,
    pub act_on: AtomicU64,
    pub act_off: AtomicU64,
}

impl Probe {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_plan(&self, want_signal: bool, want_act: bool) {
        self.want_signal.store(want_signal, Ordering::Relaxed);
        self.want_act.store(want_act, Ordering::Relaxed);
    }

    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    pub fn signal_on(&self) -> u64 {
        self.signal_on.load(Ordering::Relaxed)
    }

    pub fn signal_off(&self) -> u64 {
        self.signal_off.load(Ordering::Relaxed)
    }

    /// Task handle for a scheduler factory.
    pub fn task(probe: &Arc<Probe>) -> TaskRef {
        Arc::clone(probe) as TaskRef
    }
}

impl Task for Probe {
    fn plan(&self) -> Result<Plan, TaskError> {
        self.cycles.fetch_add(1, Ordering::Relaxed);
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

/// Polls `cond` until it holds or the deadline passes; true on success.
pub fn wait_until(timeout: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    cond()
}

/// Waits until the probe has executed at least `n` cycles.
pub fn wait_cycles(probe: &Probe, n: u64) -> bool {
    wait_until(Duration::from_secs(5), || probe.cycles() >= n)
}
