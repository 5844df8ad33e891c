//! # Task manifest (`*.toml`).
//!
//! The manifest describes the desired task set as `[[task]]` tables. Every
//! field except `name` and `kind` has a default, so minimal entries stay
//! short.
//!
//! # Example manifest
//!
//! ```toml
//! [[task]]
//! name = "press-guard"
//! kind = "sensor"
//! interval_ms = 200
//! sig_tolerance = 10
//! sig_repeat = 5
//! allow_signal = true
//!
//! [[task]]
//! name = "valve"
//! kind = "actuator"
//! interval_ms = 500
//! act_tolerance = 3
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::reload::error::ReloadError;
use crate::tasks::{ChannelConfig, TaskConfig};

/// Parsed contents of a manifest file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub(crate) struct Manifest {
    /// The `[[task]]` tables.
    #[serde(default, rename = "task")]
    pub(crate) tasks: Vec<TaskManifest>,
}

/// One `[[task]]` entry of the manifest.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TaskManifest {
    /// Unique task name; doubles as the registry key.
    pub name: String,

    /// Task kind resolved by the application's
    /// [`TaskFactory`](crate::TaskFactory) (e.g. `"sensor"`, `"actuator"`).
    pub kind: String,

    /// Cycle interval in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Signal channel tolerance, in cycles.
    #[serde(default = "default_tolerance")]
    pub sig_tolerance: u32,

    /// Signal channel heartbeat period in cycles (0 = single-shot).
    #[serde(default)]
    pub sig_repeat: u32,

    /// Signal channel gate.
    #[serde(default = "default_allow")]
    pub allow_signal: bool,

    /// Action channel tolerance, in cycles.
    #[serde(default = "default_tolerance")]
    pub act_tolerance: u32,

    /// Action channel heartbeat period in cycles (0 = single-shot).
    #[serde(default)]
    pub act_repeat: u32,

    /// Action channel gate.
    #[serde(default = "default_allow")]
    pub allow_action: bool,
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_tolerance() -> u32 {
    10
}

fn default_allow() -> bool {
    true
}

impl TaskManifest {
    /// Per-entry validation; invalid entries are skipped by the sync.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("task name must be non-empty".into());
        }
        if self.kind.is_empty() {
            return Err(format!("task '{}': kind must be non-empty", self.name));
        }
        if self.interval_ms == 0 {
            return Err(format!("task '{}': interval_ms must be positive", self.name));
        }
        Ok(())
    }

    /// Converts the entry into the scheduler's configuration value.
    pub fn task_config(&self) -> TaskConfig {
        TaskConfig {
            interval: Duration::from_millis(self.interval_ms),
            signal: ChannelConfig {
                tolerance: self.sig_tolerance,
                repeat: self.sig_repeat,
                allow: self.allow_signal,
            },
            action: ChannelConfig {
                tolerance: self.act_tolerance,
                repeat: self.act_repeat,
                allow: self.allow_action,
            },
        }
    }
}

/// Reads and parses a manifest file.
pub(crate) fn load_manifest(path: &Path) -> Result<Manifest, ReloadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReloadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ReloadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
