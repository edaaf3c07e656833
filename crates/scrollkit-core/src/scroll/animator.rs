//! L3 Molecular Layer: programmatic scroll animation
//!
//! Combines easing, timing and the frame gate. The animator never owns the
//! scroll position: the caller passes the current transform into every call
//! and applies the returned delta itself, so the animation cooperates with
//! clamping and with any other input that moved the viewport meanwhile.

use std::time::Duration;

use tracing::trace;

use super::config::{EasingType, ScrollConfig, ScrollConfigExt};
use super::throttle::FrameGate;
use crate::geometry::Point;

/// In-flight animation
#[derive(Debug, Clone)]
struct ScrollAnimation {
    target: Point,
    start: Point,
    start_time: Duration,
    /// Distance already emitted, per axis
    transition: Point,
    duration: Duration,
    easing: EasingType,
}

impl ScrollAnimation {
    fn distance(&self) -> Point {
        self.target - self.start
    }
}

/// Drives at most one animation toward a target transform.
///
/// Call [`scroll_to`](Self::scroll_to) to start, then [`tick`](Self::tick)
/// every frame and add the returned delta to the transform.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ScrollAnimation>,
    /// Target the animation was started for. Cleared by manual input, which
    /// makes the next tick cancel the animation.
    scrolling_to: Option<Point>,
    gate: FrameGate,
    config: ScrollConfig,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            scrolling_to: None,
            gate: FrameGate::new(config.frame_budget()),
            config,
        }
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.gate = FrameGate::new(config.frame_budget());
        self.config = config;
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Target of the running animation
    pub fn target(&self) -> Option<Point> {
        self.animation.as_ref().map(|a| a.target)
    }

    /// Start a new animation from `current` to `target`, replacing any
    /// running one. With smooth scrolling off the next tick jumps straight
    /// to the target.
    pub fn scroll_to(&mut self, target: Point, current: Point, now: Duration) {
        self.cancel();

        let duration = if self.config.is_smooth() {
            self.config.animation_duration()
        } else {
            Duration::ZERO
        };

        trace!(
            from_x = current.x,
            from_y = current.y,
            to_x = target.x,
            to_y = target.y,
            duration_ms = duration.as_millis() as u64,
            "scroll animation started"
        );

        self.animation = Some(ScrollAnimation {
            target,
            start: current,
            start_time: now,
            transition: Point::ZERO,
            duration,
            easing: self.config.easing,
        });
        self.scrolling_to = Some(target);
        self.gate.reset();
    }

    /// Forget the in-flight target. The running animation notices on its
    /// next tick and stops without moving.
    pub fn invalidate(&mut self) {
        self.scrolling_to = None;
    }

    pub fn cancel(&mut self) {
        self.animation = None;
        self.scrolling_to = None;
    }

    /// Advance the animation and return the delta to apply this frame.
    ///
    /// Returns `None` when idle, when the frame budget has not elapsed since
    /// the last applied frame, or when the animation was invalidated.
    pub fn tick(&mut self, now: Duration, current: Point) -> Option<Point> {
        let animation = self.animation.as_mut()?;

        if self.scrolling_to != Some(animation.target) {
            trace!("scroll animation superseded by manual input");
            self.animation = None;
            self.scrolling_to = None;
            return None;
        }

        if !self.gate.try_pass(now) {
            return None;
        }

        let elapsed = now.saturating_sub(animation.start_time);
        let progress = super::timing::progress(elapsed, animation.duration);

        if progress >= 1.0 {
            let delta = animation.target - current;
            self.animation = None;
            self.scrolling_to = None;
            trace!(dx = delta.x, dy = delta.y, "scroll animation finished");
            return Some(delta);
        }

        let eased = animation.easing.apply(progress);
        let distance = animation.distance();
        let travelled = distance * eased;
        let step = travelled - animation.transition;
        animation.transition = travelled;

        Some(Point::new(
            axis_step(step.x, distance.x, current.x, animation.target.x),
            axis_step(step.y, distance.y, current.y, animation.target.y),
        ))
    }
}

/// Zero once `current` has reached or passed `target` in the direction of travel.
fn axis_step(step: f64, distance: f64, current: f64, target: f64) -> f64 {
    let arrived = if distance > 0.0 {
        current >= target
    } else if distance < 0.0 {
        current <= target
    } else {
        true
    };
    if arrived {
        0.0
    } else {
        step
    }
}
