//! L4 Atomic Layer: animation progress
//!
//! Pure functions over durations read from a [`Clock`](super::Clock).

use std::time::Duration;

/// Progress in [0.0, 1.0] after `elapsed` of a `duration`-long animation.
/// A zero duration is always complete.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}
