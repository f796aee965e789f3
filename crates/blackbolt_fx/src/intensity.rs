//! Intensity blending between an idle and a scanning preset.
//!
//! Intensity, particle budget, fade-zone width and glow strength all ease
//! toward whichever preset is active, one smoothing step per frame. A flip
//! of the scan flag therefore never produces a visible jump.

use blackbolt_core::Smoothed;

/// Target values for one state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityPreset {
    /// Spawn probability per frame (may exceed 1).
    pub intensity: f32,
    /// Live particle budget.
    pub max_particles: f32,
    /// Height of the top/bottom fade band in pixels.
    pub fade_zone: f32,
    /// Glow strength multiplier.
    pub glow: f32,
}

/// Extra spawn attempts at high intensity: `(ratio threshold, multiplier)`.
///
/// Above each threshold one more particle spawns with probability
/// `(ratio - threshold) * multiplier`.
pub const BURST_THRESHOLDS: [(f32, f32); 4] = [(1.1, 1.2), (1.3, 1.4), (1.5, 1.8), (2.0, 2.0)];

/// Smoothed scanner parameters.
#[derive(Debug, Clone, Copy)]
pub struct IntensityBlend {
    idle: IntensityPreset,
    scan: IntensityPreset,
    intensity: Smoothed,
    max_particles: Smoothed,
    fade_zone: Smoothed,
    glow: Smoothed,
}

impl IntensityBlend {
    /// Starts at the idle preset.
    #[must_use]
    pub fn new(idle: IntensityPreset, scan: IntensityPreset, smoothing: f32) -> Self {
        Self {
            idle,
            scan,
            intensity: Smoothed::new(idle.intensity, smoothing),
            max_particles: Smoothed::new(idle.max_particles, smoothing),
            fade_zone: Smoothed::new(idle.fade_zone, smoothing),
            glow: Smoothed::new(idle.glow, smoothing),
        }
    }

    /// One smoothing step toward the scan or idle preset.
    pub fn step(&mut self, scanning: bool) {
        let target = if scanning { self.scan } else { self.idle };
        self.intensity.step_toward(target.intensity);
        self.max_particles.step_toward(target.max_particles);
        self.fade_zone.step_toward(target.fade_zone);
        self.glow.step_toward(target.glow);
    }

    /// Current intensity.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity.value()
    }

    /// Current particle budget, floored.
    #[must_use]
    pub fn max_particles(&self) -> usize {
        self.max_particles.value().max(0.0).floor() as usize
    }

    /// Current fade-zone height.
    #[must_use]
    pub fn fade_zone(&self) -> f32 {
        self.fade_zone.value()
    }

    /// Current glow multiplier.
    #[must_use]
    pub fn glow(&self) -> f32 {
        self.glow.value()
    }

    /// The idle preset.
    #[must_use]
    pub const fn idle(&self) -> IntensityPreset {
        self.idle
    }

    /// The scanning preset.
    #[must_use]
    pub const fn scan(&self) -> IntensityPreset {
        self.scan
    }

    /// Current intensity relative to idle.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.idle.intensity > 0.0 {
            self.intensity() / self.idle.intensity
        } else {
            1.0
        }
    }

    /// Scale factors applied to freshly spawned particles.
    #[must_use]
    pub fn spawn_scale(&self) -> SpawnScale {
        SpawnScale::from_ratio(self.ratio())
    }
}

/// Multipliers applied to spawn distributions at a given intensity ratio.
///
/// The distributions keep their shape; only their scale changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnScale {
    /// Velocity and twinkle-speed multiplier.
    pub speed: f32,
    /// Radius multiplier.
    pub size: f32,
    /// Life decay multiplier.
    pub decay: f32,
}

impl SpawnScale {
    /// Scale at idle intensity.
    pub const IDLE: Self = Self {
        speed: 1.0,
        size: 1.0,
        decay: 1.5,
    };

    /// Computes the multipliers for an intensity ratio.
    #[must_use]
    pub fn from_ratio(ratio: f32) -> Self {
        Self {
            speed: 1.0 + (ratio - 1.0) * 1.2,
            size: 1.0 + (ratio - 1.0) * 0.7,
            decay: (2.0 - ratio * 0.5).max(0.05),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blend() -> IntensityBlend {
        IntensityBlend::new(
            IntensityPreset {
                intensity: 0.8,
                max_particles: 800.0,
                fade_zone: 60.0,
                glow: 1.0,
            },
            IntensityPreset {
                intensity: 1.8,
                max_particles: 2500.0,
                fade_zone: 35.0,
                glow: 3.5,
            },
            0.05,
        )
    }

    #[test]
    fn test_first_step_is_small() {
        let mut b = blend();
        b.step(true);
        assert!((b.intensity() - 0.85).abs() < 1e-5);
        assert_eq!(b.max_particles(), 885);
    }

    #[test]
    fn test_converges_both_ways() {
        let mut b = blend();
        for _ in 0..400 {
            b.step(true);
        }
        assert!((b.intensity() - 1.8).abs() < 1e-3);
        assert!(b.max_particles() >= 2499);
        assert!((b.glow() - 3.5).abs() < 1e-3);

        for _ in 0..400 {
            b.step(false);
        }
        assert!((b.fade_zone() - 60.0).abs() < 1e-3);
        assert!(b.max_particles() <= 800);
    }

    #[test]
    fn test_idle_scale_matches_ratio_one() {
        assert_eq!(SpawnScale::from_ratio(1.0), SpawnScale::IDLE);
    }
}
