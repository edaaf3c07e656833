//! L4 Atomic Layer: scroll configuration helpers

use std::time::Duration;

pub use crate::config::{EasingType, ScrollConfig};

const FALLBACK_FPS: u32 = 60;

/// Derived timings for [`ScrollConfig`]
pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Minimum spacing between applied animation frames
    fn frame_budget(&self) -> Duration;

    /// Minimum spacing between applied wheel updates
    fn wheel_frame_budget(&self) -> Duration;

    /// Whether programmatic scrolls animate at all
    fn is_smooth(&self) -> bool;
}

fn budget_for(fps: u32) -> Duration {
    let fps = if fps == 0 { FALLBACK_FPS } else { fps };
    Duration::from_secs_f64(1.0 / fps as f64)
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn frame_budget(&self) -> Duration {
        budget_for(self.animation_fps)
    }

    #[inline]
    fn wheel_frame_budget(&self) -> Duration {
        budget_for(self.wheel_throttle_fps)
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}
