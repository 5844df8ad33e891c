//! # Per-channel debounce state machine.
//!
//! One [`ChannelState`] exists per channel per task and advances exactly once
//! per cycle. The machine filters transient noise (tolerance), re-fires on a
//! steady-state heartbeat (repeat with snap-back), and force-clears through
//! the `allow` gate.
//!
//! ## Transition table (one branch per cycle)
//! ```text
//! counter: want ? counter + 1 : 0          (always, first)
//!
//! withdrawal:  (!want || !gate) && latched → fire(false); latched = false; counter = 0
//! activation:  counter ≥ tolerance && gate && !latched → fire(true); latched = true
//! heartbeat:   counter ≥ tolerance && gate && latched && repeat > 0
//!              && counter - tolerance ≥ repeat → fire(true); counter = tolerance
//! otherwise:   no callback
//! ```
//!
//! ## Rules
//! - Withdrawal wins: a false intent or a closed gate deactivates in the same
//!   cycle, before activation or heartbeat are considered.
//! - The counter advances before the callback; the latch updates after the
//!   callback returns. A callback error therefore leaves the latch untouched
//!   and the transition is re-attempted on the next qualifying cycle.
//! - Snap-back: after a heartbeat the counter returns to `tolerance`, so the
//!   next re-fire lands exactly `repeat` cycles later.

use crate::error::TaskError;
use crate::tasks::config::ChannelConfig;

/// Observable outcome of one state machine step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Edge {
    /// No callback fired this cycle.
    None,
    /// Rising edge: the channel became active.
    Raised,
    /// Falling edge: the channel became inactive.
    Cleared,
    /// Steady-state re-fire while held active.
    Heartbeat,
}

/// Mutable per-channel state. Mutated only from within a cycle; the scheduler
/// serializes cycles of one task, so no lock is needed beyond the owner's.
#[derive(Debug, Default)]
pub(crate) struct ChannelState {
    /// Consecutive `true` intents observed (saturating).
    counter: u32,
    /// True while the channel is active (callback fired with `true`).
    latched: bool,
}

impl ChannelState {
    /// Advances the machine by one cycle.
    ///
    /// `fire` is the channel's side-effect callback; its error aborts the step
    /// with the latch unchanged.
    pub(crate) fn step<F>(
        &mut self,
        cfg: &ChannelConfig,
        want: bool,
        mut fire: F,
    ) -> Result<Edge, TaskError>
    where
        F: FnMut(bool) -> Result<(), TaskError>,
    {
        if want {
            self.counter = self.counter.saturating_add(1);
        } else {
            self.counter = 0;
        }

        let condition_met = self.counter >= cfg.tolerance;
        let gate_open = cfg.allow;

        if (!want || !gate_open) && self.latched {
            fire(false)?;
            self.latched = false;
            self.counter = 0;
            return Ok(Edge::Cleared);
        }

        if condition_met && gate_open && !self.latched {
            fire(true)?;
            self.latched = true;
            return Ok(Edge::Raised);
        }

        if condition_met && gate_open && self.latched && cfg.repeat > 0 {
            let past_tolerance = self.counter - cfg.tolerance;
            if past_tolerance >= cfg.repeat {
                fire(true)?;
                self.counter = cfg.tolerance;
                return Ok(Edge::Heartbeat);
            }
        }

        Ok(Edge::None)
    }

    /// True while the channel is active.
    pub(crate) fn latched(&self) -> bool {
        self.latched
    }

    #[cfg(test)]
    pub(crate) fn counter(&self) -> u32 {
        self.counter
    }
}
