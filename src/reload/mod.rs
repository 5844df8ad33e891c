//! # Hot reload: manifest-driven task synchronization.
//!
//! This module keeps a running [`Scheduler`](crate::Scheduler) in sync with a
//! TOML manifest on disk:
//!
//! ```text
//! manifest.toml ──► FileWatcher (mtime poll)
//!                        │ change detected
//!                        ▼
//!                  ReloadManager ── debounce window ──► sync
//!                        │
//!                        ├─► names only in manifest      → Scheduler::create
//!                        ├─► names in both, config diff  → Scheduler::update
//!                        └─► registered, not in manifest → Scheduler::stop
//! ```
//!
//! ## Rules
//! - Bursty edits are debounced: the sync runs once the configured window has
//!   elapsed since the last detected change.
//! - A manifest that fails to parse (or parses to zero tasks) leaves the
//!   running configuration untouched.
//! - Invalid entries (empty name, zero interval, a kind the [`TaskFactory`]
//!   rejects) are skipped individually; the rest of the manifest still
//!   applies.

mod error;
mod manager;
mod manifest;
mod watcher;

pub use error::ReloadError;
pub use manager::{ReloadManager, TaskFactory};
pub use manifest::TaskManifest;
pub use watcher::FileWatcher;

pub(crate) use manifest::load_manifest;
