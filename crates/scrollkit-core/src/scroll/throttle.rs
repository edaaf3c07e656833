//! L4 Atomic Layer: frame throttling and wheel coalescing

use std::time::Duration;

use crate::geometry::Point;

/// Leading-edge throttle: at most one pass per interval.
#[derive(Debug, Clone)]
pub struct FrameGate {
    interval: Duration,
    last_pass: Option<Duration>,
}

impl FrameGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: None,
        }
    }

    /// Whether a pass at `now` would be allowed.
    pub fn is_open(&self, now: Duration) -> bool {
        match self.last_pass {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        }
    }

    /// Record a pass at `now` if the interval has elapsed.
    pub fn try_pass(&mut self, now: Duration) -> bool {
        if self.is_open(now) {
            self.last_pass = Some(now);
            true
        } else {
            false
        }
    }

    /// Forget the last pass so the next one goes through immediately.
    pub fn reset(&mut self) {
        self.last_pass = None;
    }
}

/// Sums wheel deltas and releases them at most once per frame.
///
/// The first event of a quiet period is applied immediately; events that
/// arrive inside the same frame are added to the pending total and released
/// by the next `flush` once the frame has elapsed. Nothing is dropped.
#[derive(Debug, Clone)]
pub struct WheelAccumulator {
    gate: FrameGate,
    pending: Point,
}

impl WheelAccumulator {
    pub fn new(interval: Duration) -> Self {
        Self {
            gate: FrameGate::new(interval),
            pending: Point::ZERO,
        }
    }

    /// Add a delta; returns the total to apply now, if the frame allows it.
    pub fn push(&mut self, delta: Point, now: Duration) -> Option<Point> {
        self.pending += delta;
        self.release(now)
    }

    /// Release the pending total (trailing edge), if any and if the frame allows it.
    pub fn flush(&mut self, now: Duration) -> Option<Point> {
        if self.pending.is_zero() {
            return None;
        }
        self.release(now)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_zero()
    }

    pub fn clear(&mut self) {
        self.pending = Point::ZERO;
    }

    fn release(&mut self, now: Duration) -> Option<Point> {
        if self.gate.try_pass(now) {
            let total = self.pending;
            self.pending = Point::ZERO;
            Some(total)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(8);

    #[test]
    fn test_gate_leading_edge() {
        let mut gate = FrameGate::new(FRAME);
        assert!(gate.try_pass(Duration::ZERO));
        assert!(!gate.try_pass(Duration::from_millis(4)));
        assert!(gate.try_pass(Duration::from_millis(8)));
        gate.reset();
        assert!(gate.try_pass(Duration::from_millis(9)));
    }

    #[test]
    fn test_wheel_deltas_within_frame_are_summed() {
        let mut wheel = WheelAccumulator::new(FRAME);
        assert_eq!(
            wheel.push(Point::new(0.0, 10.0), Duration::ZERO),
            Some(Point::new(0.0, 10.0))
        );
        assert_eq!(wheel.push(Point::new(0.0, 5.0), Duration::from_millis(2)), None);
        assert_eq!(wheel.push(Point::new(1.0, 7.0), Duration::from_millis(4)), None);
        assert!(wheel.has_pending());

        assert_eq!(wheel.flush(Duration::from_millis(6)), None);
        assert_eq!(
            wheel.flush(Duration::from_millis(8)),
            Some(Point::new(1.0, 12.0))
        );
        assert!(!wheel.has_pending());
        assert_eq!(wheel.flush(Duration::from_millis(30)), None);
    }

    #[test]
    fn test_wheel_clear_drops_pending() {
        let mut wheel = WheelAccumulator::new(FRAME);
        wheel.push(Point::new(0.0, 1.0), Duration::ZERO);
        wheel.push(Point::new(0.0, 1.0), Duration::from_millis(1));
        wheel.clear();
        assert_eq!(wheel.flush(Duration::from_millis(20)), None);
    }
}
