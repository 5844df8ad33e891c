use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the hot-reload layer.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ReloadError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The manifest file is not valid TOML (or not a valid manifest shape).
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// The manifest parsed but contained no usable task entries.
    #[error("manifest {path} contains no valid tasks")]
    NoTasks { path: PathBuf },
    /// `start` was called twice.
    #[error("reload manager is already running")]
    AlreadyRunning,
}

impl ReloadError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReloadError::Io { .. } => "reload_io",
            ReloadError::Parse { .. } => "reload_parse",
            ReloadError::NoTasks { .. } => "reload_no_tasks",
            ReloadError::AlreadyRunning => "reload_already_running",
        }
    }
}
