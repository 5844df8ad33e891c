//! # Per-task configuration snapshots.
//!
//! [`TaskConfig`] bundles the cycle interval with one [`ChannelConfig`] per
//! channel. The scheduler keeps the live value behind a mutex and clones it at
//! the start of every cycle, so a running cycle always works against one
//! coherent snapshot and writers never observe a half-applied update.

use std::time::Duration;

use crate::error::RuntimeError;

/// Debounce settings for one channel.
///
/// Tolerance and repeat are counted in cycles, not wall-clock time; the
/// effective latency scales with the task interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Consecutive `true` intents required before the channel activates.
    pub tolerance: u32,
    /// Heartbeat period in cycles after activation; `0` disables re-fires.
    pub repeat: u32,
    /// Global enable gate. Closing it clears an active channel on the next
    /// cycle and blocks activation while closed.
    pub allow: bool,
}

impl Default for ChannelConfig {
    /// `tolerance = 10`, `repeat = 0` (single-shot), `allow = true`.
    fn default() -> Self {
        Self {
            tolerance: 10,
            repeat: 0,
            allow: true,
        }
    }
}

/// Complete configuration of one task.
///
/// Copyable value type; equality is used by the hot-reload sync to detect
/// changed entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskConfig {
    /// Period between cycle starts. Must be non-zero.
    pub interval: Duration,
    /// Signal channel settings.
    pub signal: ChannelConfig,
    /// Action channel settings.
    pub action: ChannelConfig,
}

impl Default for TaskConfig {
    /// One-second interval with default channels.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            signal: ChannelConfig::default(),
            action: ChannelConfig::default(),
        }
    }
}

impl TaskConfig {
    /// Creates a configuration with the given interval and default channels.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Boundary validation. Tolerance and repeat need no checks: the unsigned
    /// types already rule out negative values.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.interval.is_zero() {
            return Err(RuntimeError::invalid("interval must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_rejected() {
        let cfg = TaskConfig::with_interval(Duration::ZERO);
        assert!(cfg.validate().is_err());
        assert!(TaskConfig::default().validate().is_ok());
    }
}
