//! # ReloadManager: debounced manifest → scheduler synchronization.
//!
//! The manager owns a [`FileWatcher`] on the manifest plus a debounce thread.
//! A detected change only records a pending timestamp; the sync runs once the
//! debounce window has elapsed since the newest change, so a burst of edits
//! collapses into one reconfiguration instead of thrashing the scheduler.
//!
//! ## Rules
//! - The initial `start` parses the manifest and must yield at least one
//!   valid task; later reloads that fail to parse (or parse empty) keep the
//!   current task set untouched.
//! - Entries with the same name: the last one wins, matching TOML reading
//!   order.
//! - The manager only drives the scheduler's public API (`create` / `update`
//!   / `stop`); it holds no task handles of its own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::core::Scheduler;
use crate::reload::error::ReloadError;
use crate::reload::manifest::TaskManifest;
use crate::reload::watcher::FileWatcher;
use crate::reload::load_manifest;
use crate::tasks::TaskRef;

/// Maps manifest entries to task implementations.
///
/// The factory owns the closed world of task kinds; returning `None` rejects
/// the entry (unknown kind, unsatisfiable parameters) and the sync skips it.
pub trait TaskFactory: Send + Sync + 'static {
    /// Builds the task described by a manifest entry.
    fn build(&self, manifest: &TaskManifest) -> Option<TaskRef>;
}

impl<F> TaskFactory for F
where
    F: Fn(&TaskManifest) -> Option<TaskRef> + Send + Sync + 'static,
{
    fn build(&self, manifest: &TaskManifest) -> Option<TaskRef> {
        self(manifest)
    }
}

/// State shared with the debounce thread.
struct Inner {
    scheduler: Arc<Scheduler>,
    path: PathBuf,
    factory: Box<dyn TaskFactory>,
    /// Manifest entries currently applied, keyed by task name.
    current: Mutex<HashMap<String, TaskManifest>>,
    /// Newest detected change awaiting the debounce window.
    pending: Mutex<Option<Instant>>,
    running: AtomicBool,
}

impl Inner {
    /// Re-parses the manifest and syncs; parse failures keep the current set.
    fn apply_pending(&self) {
        match load_manifest(&self.path) {
            Ok(manifest) if !manifest.tasks.is_empty() => self.sync(manifest.tasks),
            Ok(_) => {
                eprintln!(
                    "[tickvisor] manifest {} has no tasks; keeping current set",
                    self.path.display()
                );
            }
            Err(err) => {
                eprintln!("[tickvisor] reload skipped: {err}");
            }
        }
    }

    /// Diffs the desired set against the applied set and drives the scheduler.
    fn sync(&self, entries: Vec<TaskManifest>) {
        let mut desired: HashMap<String, TaskManifest> = HashMap::new();
        for entry in entries {
            if let Err(reason) = entry.validate() {
                eprintln!("[tickvisor] manifest entry skipped: {reason}");
                continue;
            }
            desired.insert(entry.name.clone(), entry);
        }

        let mut current = self.current.lock();

        for (name, entry) in &desired {
            match current.get(name) {
                None => {
                    let result = self.scheduler.create(name, entry.task_config(), || {
                        self.factory.build(entry)
                    });
                    if let Err(err) = result {
                        eprintln!("[tickvisor] failed to create task '{name}': {err}");
                        continue;
                    }
                }
                Some(applied) if applied != entry => {
                    if let Err(err) = self.scheduler.update(name, entry.task_config()) {
                        eprintln!("[tickvisor] failed to update task '{name}': {err}");
                        continue;
                    }
                }
                Some(_) => {}
            }
        }

        for name in current.keys() {
            if !desired.contains_key(name) {
                if let Err(err) = self.scheduler.stop(name) {
                    eprintln!("[tickvisor] failed to stop task '{name}': {err}");
                }
            }
        }

        // The applied map tracks the manifest, not the scheduler: a failed
        // create is not retried until the manifest changes again.
        *current = desired;
    }
}

/// Keeps the scheduler's task set synchronized with a manifest file.
pub struct ReloadManager {
    inner: Arc<Inner>,
    debounce: Duration,
    poll_interval: Duration,
    watcher: Option<FileWatcher>,
    thread: Option<JoinHandle<()>>,
}

impl ReloadManager {
    /// Creates a manager with a 5-minute debounce window and 1-second polling.
    pub fn new(
        scheduler: Arc<Scheduler>,
        path: impl Into<PathBuf>,
        factory: impl TaskFactory,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                scheduler,
                path: path.into(),
                factory: Box::new(factory),
                current: Mutex::new(HashMap::new()),
                pending: Mutex::new(None),
                running: AtomicBool::new(false),
            }),
            debounce: Duration::from_secs(300),
            poll_interval: Duration::from_secs(1),
            watcher: None,
            thread: None,
        }
    }

    /// Overrides the debounce window (tests use milliseconds).
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Overrides the watcher's poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Path of the watched manifest.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Number of manifest entries currently applied.
    pub fn task_count(&self) -> usize {
        self.inner.current.lock().len()
    }

    /// Loads the initial manifest, syncs it, and starts the watcher and
    /// debounce threads.
    pub fn start(&mut self) -> Result<(), ReloadError> {
        if self.inner.running.load(Ordering::Acquire) {
            return Err(ReloadError::AlreadyRunning);
        }

        let manifest = load_manifest(&self.inner.path)?;
        if manifest.tasks.is_empty() {
            return Err(ReloadError::NoTasks {
                path: self.inner.path.clone(),
            });
        }
        self.inner.running.store(true, Ordering::Release);
        self.inner.sync(manifest.tasks);

        let on_change = Arc::clone(&self.inner);
        let mut watcher = FileWatcher::new(
            self.inner.path.clone(),
            move || {
                *on_change.pending.lock() = Some(Instant::now());
            },
            self.poll_interval,
        );
        watcher.start()?;
        self.watcher = Some(watcher);

        let inner = Arc::clone(&self.inner);
        let debounce = self.debounce;
        let tick = (debounce / 4).clamp(Duration::from_millis(10), Duration::from_secs(1));
        self.thread = Some(std::thread::spawn(move || {
            while inner.running.load(Ordering::Acquire) {
                let due = {
                    let mut pending = inner.pending.lock();
                    match *pending {
                        Some(changed_at) if changed_at.elapsed() >= debounce => {
                            *pending = None;
                            true
                        }
                        _ => false,
                    }
                };
                if due {
                    inner.apply_pending();
                }
                std::thread::sleep(tick);
            }
        }));
        Ok(())
    }

    /// Stops the watcher and the debounce thread. Idempotent; does not touch
    /// the tasks already registered with the scheduler.
    pub fn stop(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            watcher.stop();
        }
        self.inner.running.store(false, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ReloadManager {
    fn drop(&mut self) {
        self.stop();
    }
}
