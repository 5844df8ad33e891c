//! Manifest hot-reload demo: the running task set follows a TOML file that
//! this demo edits while the scheduler runs.
//!
//! Run with:
//! ```sh
//! cargo run --example hot_reload --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use tickvisor::{
    Config, LogWriter, Plan, ReloadManager, Scheduler, Subscriber, TaskFn, TaskManifest, TaskRef,
};

/// Closed world of demo task kinds: everything is a ticker that logs edges.
fn build_task(manifest: &TaskManifest) -> Option<TaskRef> {
    match manifest.kind.as_str() {
        "ticker" => {
            let name = manifest.name.clone();
            Some(
                TaskFn::new(|| Plan::new(true, false))
                    .on_signal(move |active| println!("    >> [{name}] signal={active}"))
                    .arc(),
            )
        }
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join("tickvisor-hot-reload-demo");
    std::fs::create_dir_all(&dir)?;
    let manifest_path = dir.join("tasks.toml");

    std::fs::write(
        &manifest_path,
        r#"
[[task]]
name = "heartbeat"
kind = "ticker"
interval_ms = 250
sig_tolerance = 2
sig_repeat = 4
"#,
    )?;

    let scheduler = Arc::new(Scheduler::new(
        Config::default(),
        vec![Arc::new(LogWriter) as Arc<dyn Subscriber>],
    ));

    // A short debounce so the demo reacts within a couple of seconds; the
    // production default is minutes.
    let mut manager = ReloadManager::new(Arc::clone(&scheduler), &manifest_path, build_task)
        .with_debounce(Duration::from_millis(500))
        .with_poll_interval(Duration::from_millis(100));
    manager.start()?;
    println!("-- initial manifest applied: {} task(s)", scheduler.count());

    std::thread::sleep(Duration::from_secs(2));

    println!("-- editing the manifest: add one task, drop the other");
    std::fs::write(
        &manifest_path,
        r#"
[[task]]
name = "second"
kind = "ticker"
interval_ms = 200
sig_tolerance = 1
"#,
    )?;

    std::thread::sleep(Duration::from_secs(3));
    println!(
        "-- after reload: {} task(s), heartbeat present: {}",
        scheduler.count(),
        scheduler.lookup("heartbeat").is_some(),
    );

    manager.stop();
    scheduler.shutdown();
    std::fs::remove_dir_all(&dir).ok();
    Ok(())
}
