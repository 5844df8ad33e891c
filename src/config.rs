//! # Global runtime configuration.
//!
//! [`Config`] defines the scheduler's shape: how many worker threads execute
//! task cycles and how many events the bus may buffer before dropping.
//!
//! # Example
//! ```
//! use tickvisor::Config;
//!
//! let mut cfg = Config::default();
//! cfg.workers = 2;
//! cfg.bus_capacity = 256;
//!
//! assert_eq!(cfg.workers, 2);
//! ```

/// Global configuration for the scheduler runtime.
///
/// Controls the worker pool size and the event bus channel capacity.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of worker threads executing task cycles (clamped to at least 1).
    pub workers: usize,
    /// Capacity of the event bus channel; events published while the channel
    /// is full are dropped.
    pub bus_capacity: usize,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `workers = 4`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            workers: 4,
            bus_capacity: 1024,
        }
    }
}
