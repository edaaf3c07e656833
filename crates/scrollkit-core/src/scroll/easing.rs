//! L4 Atomic Layer: easing curves for scroll animation
//!
//! Each curve maps progress in [0, 1] to eased progress in [0, 1], is
//! monotonic, and hits exactly 0 and 1 at the ends.

pub use crate::config::EasingType;

impl EasingType {
    /// Apply the curve to a progress value. Input is clamped to [0, 1].
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => out_power(t, 3),
            EasingType::Quintic => out_power(t, 5),
            EasingType::EaseOut => out_expo(t),
        }
    }
}

/// 1 - (1-t)^n
#[inline]
fn out_power(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// 1 - 2^(-10t), snapped to 1 at the end
#[inline]
fn out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 4] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_endpoints_exact() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at t=0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at t=1", easing);
        }
        assert_eq!(EasingType::None.apply(0.99), 0.0);
        assert_eq!(EasingType::None.apply(1.0), 1.0);
    }

    #[test]
    fn test_out_cubic_values() {
        assert!((EasingType::Cubic.apply(0.5) - 0.875).abs() < 1e-12);
        assert!((EasingType::Cubic.apply(0.25) - 0.578125).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        for easing in CURVES {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = easing.apply(i as f64 / 100.0);
                assert!(v >= prev, "{:?} not monotonic at step {}", easing, i);
                assert!(v <= 1.0);
                prev = v;
            }
        }
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(EasingType::Cubic.apply(-1.0), 0.0);
        assert_eq!(EasingType::Cubic.apply(3.0), 1.0);
    }
}
