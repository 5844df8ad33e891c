//! Scheduler lifecycle: registration, lookup, lazy deletion, shutdown.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Probe, wait_cycles, wait_until};
use tickvisor::{Config, RuntimeError, Scheduler, TaskConfig};

fn scheduler() -> Scheduler {
    Scheduler::new(Config::default(), Vec::new())
}

fn fast_config() -> TaskConfig {
    TaskConfig::with_interval(Duration::from_millis(10))
}

#[test]
fn create_lookup_count_stop_roundtrip() {
    let scheduler = scheduler();
    let probe = Probe::arc();

    scheduler
        .create("ticker", fast_config(), || Some(Probe::task(&probe)))
        .unwrap();
    assert_eq!(scheduler.count(), 1);

    let actor = scheduler.lookup("ticker").expect("registered task");
    assert_eq!(actor.name(), "ticker");
    assert!(actor.is_active());
    assert_eq!(actor.config().interval, Duration::from_millis(10));
    assert!(scheduler.lookup("nobody").is_none());

    assert!(wait_cycles(&probe, 3), "task never cycled");

    scheduler.stop("ticker").unwrap();
    assert_eq!(scheduler.count(), 0);
    assert!(!actor.is_active());
    scheduler.shutdown();
}

#[test]
fn duplicate_names_are_rejected() {
    let scheduler = scheduler();
    let probe = Probe::arc();

    scheduler
        .create("one", fast_config(), || Some(Probe::task(&probe)))
        .unwrap();
    let second = scheduler.create("one", fast_config(), || Some(Probe::task(&probe)));
    assert!(matches!(second, Err(RuntimeError::TaskAlreadyExists { .. })));
    assert_eq!(scheduler.count(), 1);
    scheduler.shutdown();
}

#[test]
fn stopping_an_absent_task_is_a_failing_noop() {
    let scheduler = scheduler();
    assert!(matches!(
        scheduler.stop("ghost"),
        Err(RuntimeError::TaskNotFound { .. })
    ));
    assert_eq!(scheduler.count(), 0);
    scheduler.shutdown();
}

#[test]
fn lazy_deletion_stops_future_cycles() {
    let scheduler = scheduler();
    let probe = Probe::arc();

    scheduler
        .create("doomed", TaskConfig::with_interval(Duration::from_millis(50)), || {
            Some(Probe::task(&probe))
        })
        .unwrap();
    std::thread::sleep(Duration::from_millis(300));

    scheduler.stop("doomed").unwrap();
    assert_eq!(scheduler.count(), 0);

    // At most one in-flight cycle may still land; after a grace period the
    // count must stop moving for good.
    std::thread::sleep(Duration::from_millis(100));
    let settled = probe.cycles();
    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(probe.cycles(), settled);
    scheduler.shutdown();
}

#[test]
fn task_outlives_the_factory_scope() {
    let scheduler = scheduler();
    let probe = Probe::arc();

    {
        // The only handle created here dies with the scope; the registry's
        // clone must keep the task alive.
        let local = Probe::task(&probe);
        scheduler
            .create("survivor", fast_config(), move || Some(local))
            .unwrap();
    }

    let before = probe.cycles();
    assert!(
        wait_until(Duration::from_secs(5), || probe.cycles() > before + 3),
        "task stopped cycling after its creation scope ended"
    );
    scheduler.shutdown();
}

#[test]
fn shutdown_is_idempotent_and_blocks_the_api() {
    let scheduler = scheduler();
    let probe = Probe::arc();
    scheduler
        .create("t", fast_config(), || Some(Probe::task(&probe)))
        .unwrap();

    scheduler.shutdown();
    scheduler.shutdown();

    assert!(matches!(
        scheduler.create("late", fast_config(), || Some(Probe::task(&probe))),
        Err(RuntimeError::ShutDown)
    ));
    assert!(matches!(scheduler.stop("t"), Err(RuntimeError::ShutDown)));
    assert!(matches!(
        scheduler.update("t", fast_config()),
        Err(RuntimeError::ShutDown)
    ));
    assert!(scheduler.lookup("t").is_none());
    assert_eq!(scheduler.count(), 0);

    // No further cycles once shutdown has returned.
    let settled = probe.cycles();
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(probe.cycles(), settled);
}

#[test]
fn dropping_the_scheduler_shuts_it_down() {
    let probe = Probe::arc();
    {
        let scheduler = scheduler();
        scheduler
            .create("t", fast_config(), || Some(Probe::task(&probe)))
            .unwrap();
        assert!(wait_cycles(&probe, 1));
    }
    let settled = probe.cycles();
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(probe.cycles(), settled);
}

#[test]
fn single_worker_still_serves_many_tasks() {
    let scheduler = Scheduler::new(
        Config {
            workers: 1,
            ..Config::default()
        },
        Vec::new(),
    );
    let probes: Vec<Arc<Probe>> = (0..4).map(|_| Probe::arc()).collect();
    for (i, probe) in probes.iter().enumerate() {
        let task = Probe::task(&probe);
        scheduler
            .create(&format!("t{i}"), fast_config(), move || Some(task))
            .unwrap();
    }
    for probe in &probes {
        assert!(wait_cycles(probe, 3));
    }
    scheduler.shutdown();
}
