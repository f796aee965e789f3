//! Exponential smoothing toward a moving target.
//!
//! Every frame: `current += (target - current) * factor`. With `factor` in
//! (0, 1] this approaches the target geometrically and never overshoots.

/// One smoothing step.
#[inline]
#[must_use]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// A scalar that eases toward whatever target it is given each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed {
    value: f32,
    factor: f32,
}

impl Smoothed {
    /// Creates a smoothed value. `factor` is clamped to (0, 1].
    #[must_use]
    pub fn new(value: f32, factor: f32) -> Self {
        Self {
            value,
            factor: factor.clamp(f32::EPSILON, 1.0),
        }
    }

    /// Returns the current value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Returns the smoothing factor.
    #[inline]
    #[must_use]
    pub const fn factor(&self) -> f32 {
        self.factor
    }

    /// Advances one frame toward `target` and returns the new value.
    pub fn step_toward(&mut self, target: f32) -> f32 {
        self.value = approach(self.value, target, self.factor);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overshoot() {
        let mut s = Smoothed::new(0.0, 0.05);
        for _ in 0..1000 {
            let v = s.step_toward(100.0);
            assert!(v <= 100.0);
        }
        assert!((s.value() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_monotonic_descent() {
        let mut s = Smoothed::new(2500.0, 0.05);
        let mut last = s.value();
        for _ in 0..200 {
            let v = s.step_toward(800.0);
            assert!(v <= last);
            assert!(v >= 800.0);
            last = v;
        }
    }

    #[test]
    fn test_factor_one_is_a_jump() {
        let mut s = Smoothed::new(3.0, 1.0);
        assert_eq!(s.step_toward(7.0), 7.0);
    }
}
