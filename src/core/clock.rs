//! # Monotonic time helpers.
//!
//! All scheduling deadlines are computed from [`Instant`], never from the wall
//! clock: hot-reload can change intervals at any moment and NTP steps the wall
//! clock, either of which would otherwise produce negative sleep spans.

use std::time::{Duration, Instant};

/// Current monotonic time.
pub(crate) fn now() -> Instant {
    Instant::now()
}

/// Deadline one interval from now.
pub(crate) fn deadline_after(interval: Duration) -> Instant {
    now() + interval
}
