//! # File watcher: modification-time polling.
//!
//! [`FileWatcher`] runs a background thread that polls a file's modification
//! time and invokes a callback when it changes. Polling keeps the watcher
//! portable and dependency-free; the reload layer debounces on top of it, so
//! sub-second detection latency is irrelevant.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime};

use crate::reload::error::ReloadError;

type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Background poller for one file's modification time.
pub struct FileWatcher {
    path: PathBuf,
    poll_interval: Duration,
    callback: ChangeCallback,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl FileWatcher {
    /// Creates a watcher; nothing happens until [`start`](FileWatcher::start).
    pub fn new(
        path: impl Into<PathBuf>,
        callback: impl Fn() + Send + Sync + 'static,
        poll_interval: Duration,
    ) -> Self {
        Self {
            path: path.into(),
            poll_interval,
            callback: Arc::new(callback),
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Spawns the polling thread.
    ///
    /// The modification time at start is the baseline: only subsequent changes
    /// fire the callback.
    pub fn start(&mut self) -> Result<(), ReloadError> {
        if self.thread.is_some() {
            return Err(ReloadError::AlreadyRunning);
        }
        self.running.store(true, Ordering::Release);

        let path = self.path.clone();
        let poll_interval = self.poll_interval;
        let running = Arc::clone(&self.running);
        let callback = Arc::clone(&self.callback);
        self.thread = Some(std::thread::spawn(move || {
            let mut last_seen = mod_time(&path);
            while running.load(Ordering::Acquire) {
                let current = mod_time(&path);
                if current.is_some() && current != last_seen {
                    last_seen = current;
                    callback();
                }
                std::thread::sleep(poll_interval);
            }
        }));
        Ok(())
    }

    /// Stops the polling thread and joins it. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    /// True while the polling thread is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Modification time of the file, or `None` while it does not exist.
fn mod_time(path: &std::path::Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
