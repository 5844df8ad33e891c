//! End-to-end demo: a noisy sensor and a commanded actuator under one
//! scheduler, with runtime reconfiguration and a clean shutdown.
//!
//! Run with:
//! ```sh
//! cargo run --example demo --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;
use tickvisor::{
    ChannelConfig, Config, LogWriter, Plan, RuntimeError, Scheduler, StatusTracker, Subscriber,
    Task, TaskConfig, TaskError,
};

/// Simulated sensor: a noisy reading compared against a threshold drives the
/// signal channel. The debounce tolerance filters the noise.
struct SensorTask {
    threshold: f64,
}

impl Task for SensorTask {
    fn plan(&self) -> Result<Plan, TaskError> {
        let reading: f64 = rand::rng().random_range(0.0..100.0);
        Ok(Plan::new(reading > self.threshold, false))
    }

    fn signal(&self, active: bool) -> Result<(), TaskError> {
        if active {
            println!("    >> sensor above threshold (debounced)");
        } else {
            println!("    >> sensor back to normal");
        }
        Ok(())
    }

    fn act(&self, _active: bool) -> Result<(), TaskError> {
        Ok(())
    }
}

/// Simulated actuator: an external command flag drives the action channel,
/// with a heartbeat re-firing the action while the command is held.
struct ActuatorTask {
    commanded: Arc<AtomicBool>,
}

impl Task for ActuatorTask {
    fn plan(&self) -> Result<Plan, TaskError> {
        let commanded = self.commanded.load(Ordering::Relaxed);
        Ok(Plan::new(false, commanded))
    }

    fn signal(&self, _active: bool) -> Result<(), TaskError> {
        Ok(())
    }

    fn act(&self, active: bool) -> Result<(), TaskError> {
        if active {
            println!("    >> actuator engaged");
        } else {
            println!("    >> actuator released");
        }
        Ok(())
    }
}

fn main() -> Result<(), RuntimeError> {
    let tracker = Arc::new(StatusTracker::new());
    let scheduler = Scheduler::new(
        Config::default(),
        vec![Arc::new(LogWriter) as Arc<dyn Subscriber>, tracker.clone()],
    );

    println!("-- creating tasks");
    scheduler.create(
        "noisy-sensor",
        TaskConfig {
            interval: Duration::from_millis(100),
            signal: ChannelConfig {
                tolerance: 5,
                repeat: 0,
                allow: true,
            },
            action: ChannelConfig::default(),
        },
        || Some(Arc::new(SensorTask { threshold: 30.0 })),
    )?;

    let commanded = Arc::new(AtomicBool::new(false));
    let command = Arc::clone(&commanded);
    scheduler.create(
        "valve",
        TaskConfig {
            interval: Duration::from_millis(200),
            signal: ChannelConfig::default(),
            action: ChannelConfig {
                tolerance: 2,
                repeat: 10,
                allow: true,
            },
        },
        move || Some(Arc::new(ActuatorTask { commanded: command })),
    )?;
    println!("-- {} tasks registered", scheduler.count());

    std::thread::sleep(Duration::from_secs(2));

    println!("-- commanding the valve");
    commanded.store(true, Ordering::Relaxed);
    std::thread::sleep(Duration::from_secs(2));
    println!(
        "-- valve acting: {}, sensor signaled: {}",
        tracker.is_acting("valve"),
        tracker.is_signaled("noisy-sensor"),
    );

    println!("-- closing the sensor gate at runtime");
    let mut cfg = scheduler
        .lookup("noisy-sensor")
        .map(|actor| actor.config())
        .unwrap_or_default();
    cfg.signal.allow = false;
    scheduler.update("noisy-sensor", cfg)?;
    std::thread::sleep(Duration::from_secs(1));

    println!("-- stopping the valve");
    scheduler.stop("valve")?;
    println!("-- {} task(s) left", scheduler.count());
    std::thread::sleep(Duration::from_secs(1));

    println!("-- shutting down");
    scheduler.shutdown();
    Ok(())
}
