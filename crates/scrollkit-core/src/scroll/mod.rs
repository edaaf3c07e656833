//! Scroll arithmetic and animation
//!
//! # Layers
//!
//! ## L4 Atomic Layer
//! - `math` - clamping, partition lookup, resize width
//! - `easing` - easing curves
//! - `timing` - animation progress
//! - `clock` - time source (`SystemClock`, `ManualClock`)
//! - `throttle` - frame gate and wheel coalescing
//! - `config` - derived timings for `ScrollConfig`
//!
//! ## L3 Molecular Layer
//! - `animator` - animation controller combining the atoms
//!
//! # Usage
//!
//! ```ignore
//! use scrollkit_core::{ManualClock, Point, ScrollAnimator, ScrollConfig};
//!
//! let clock = ManualClock::new();
//! let mut animator = ScrollAnimator::new(ScrollConfig::default());
//! animator.scroll_to(Point::new(0.0, 400.0), current, clock.now());
//!
//! // every frame
//! if let Some(delta) = animator.tick(clock.now(), current) {
//!     current += delta;
//! }
//! ```

// L4 Atomic Layer
pub mod clock;
pub mod config;
pub mod easing;
pub mod math;
pub mod throttle;
pub mod timing;

// L3 Molecular Layer
pub mod animator;

pub use animator::ScrollAnimator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ScrollConfigExt;
pub use throttle::{FrameGate, WheelAccumulator};
