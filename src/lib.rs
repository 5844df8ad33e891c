//! # tickvisor
//!
//! **Tickvisor** is an in-process periodic task scheduler with per-task
//! dual-channel debouncing.
//!
//! Each registered task is cycled on its own interval by a shared worker pool.
//! Every cycle the task reports its intent through [`Task::plan`]; two
//! independent state machines (the *signal* and *action* channels) filter
//! transient noise, optionally re-fire on a steady-state heartbeat, and invoke
//! the task's [`signal`](Task::signal) / [`act`](Task::act) callbacks on the
//! resulting edges. Tasks can be created, reconfigured, and stopped
//! concurrently at runtime; a hot-reload layer keeps the running set in sync
//! with a TOML manifest on disk.
//!
//! ## Features
//!
//! | Area              | Description                                                      | Key types / traits                       |
//! |-------------------|------------------------------------------------------------------|------------------------------------------|
//! | **Scheduling**    | Timer thread + worker pool driving per-task cycles.              | [`Scheduler`], [`Config`]                |
//! | **Tasks**         | Define tasks as trait impls or closures.                         | [`Task`], [`TaskRef`], [`TaskFn`]        |
//! | **Debouncing**    | Tolerance / heartbeat / gate per channel.                        | [`TaskConfig`], [`ChannelConfig`]        |
//! | **Events**        | Lifecycle and channel-edge events with pluggable subscribers.    | [`Event`], [`EventKind`], [`Subscriber`] |
//! | **Status**        | Queryable per-task channel state folded from events.             | [`StatusTracker`]                        |
//! | **Hot reload**    | Manifest file watching with debounced create/update/stop sync.   | [`ReloadManager`], [`TaskManifest`]      |
//! | **Errors**        | Typed errors for the runtime and for task cycles.                | [`RuntimeError`], [`TaskError`]          |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::time::Duration;
//! use tickvisor::{ChannelConfig, Config, Plan, Scheduler, TaskConfig, TaskFn};
//!
//! let scheduler = Scheduler::new(Config::default(), Vec::new());
//!
//! let pressure_high = Arc::new(AtomicBool::new(false));
//! let watched = Arc::clone(&pressure_high);
//!
//! // Raise the alarm only after 10 consecutive high readings (50 ms apart),
//! // and re-fire it every 20 cycles while the condition holds.
//! let cfg = TaskConfig {
//!     interval: Duration::from_millis(50),
//!     signal: ChannelConfig { tolerance: 10, repeat: 20, allow: true },
//!     action: ChannelConfig::default(),
//! };
//!
//! scheduler.create("press-guard", cfg, || {
//!     Some(
//!         TaskFn::new(move || Plan::new(watched.load(Ordering::Relaxed), false))
//!             .on_signal(|active| println!("alarm: {active}"))
//!             .arc(),
//!     )
//! })?;
//!
//! std::thread::sleep(Duration::from_secs(2));
//! scheduler.shutdown();
//! # Ok::<(), tickvisor::RuntimeError>(())
//! ```

mod config;
mod core;
mod error;
mod events;
mod reload;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use crate::config::Config;
pub use crate::core::{Scheduler, TaskActor};
pub use crate::error::{RuntimeError, TaskError};
pub use crate::events::{Event, EventKind};
pub use crate::reload::{FileWatcher, ReloadError, ReloadManager, TaskFactory, TaskManifest};
pub use crate::subscribers::{StatusTracker, Subscriber, SubscriberSet, TaskStatus};
pub use crate::tasks::{ChannelConfig, Plan, Task, TaskConfig, TaskFn, TaskRef};

// Optional: expose a simple built-in logging subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use crate::subscribers::LogWriter;
