//! Easing curves and fixed-duration tweens.
//!
//! Tweens are stateless: they are sampled at an elapsed time, so an effect
//! only stores when it started.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Cubic ease-in, `t^3`.
    CubicIn,
    /// Cubic ease-out, `1 - (1 - t)^3`.
    CubicOut,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A value moving from `from` to `to` over `duration` seconds after `delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Start value.
    pub from: f32,
    /// End value.
    pub to: f32,
    /// Duration in seconds.
    pub duration: f32,
    /// Delay before the tween starts, in seconds.
    pub delay: f32,
    /// Easing curve.
    pub easing: Easing,
}

impl Tween {
    /// Creates a linear tween with no delay.
    #[must_use]
    pub const fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Sets the start delay.
    #[must_use]
    pub const fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the easing curve.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in [0, 1] at `elapsed` seconds.
    #[must_use]
    pub fn progress(&self, elapsed: f32) -> f32 {
        let local = elapsed - self.delay;
        if local < 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (local / self.duration).min(1.0)
    }

    /// Value at `elapsed` seconds using the tween's own easing.
    #[must_use]
    pub fn sample(&self, elapsed: f32) -> f32 {
        self.sample_with(elapsed, |t| self.easing.apply(t))
    }

    /// Value at `elapsed` seconds using a custom curve.
    #[must_use]
    pub fn sample_with(&self, elapsed: f32, curve: impl Fn(f32) -> f32) -> f32 {
        self.from + (self.to - self.from) * curve(self.progress(elapsed))
    }

    /// Time at which the tween settles.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.delay + self.duration.max(0.0)
    }

    /// True once the tween has settled at `to`.
    #[must_use]
    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.end_time()
    }
}

/// Samples evenly spaced keyframes at progress `t` in [0, 1].
///
/// `keyframes(&[0.0, 1.0, 0.0], 0.5) == 1.0`
#[must_use]
pub fn keyframes(values: &[f32], t: f32) -> f32 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (values.len() - 1) as f32;
            let scaled = t.clamp(0.0, 1.0) * segments;
            let index = (scaled.floor() as usize).min(values.len() - 2);
            let local = scaled - index as f32;
            values[index] + (values[index + 1] - values[index]) * local
        }
    }
}
