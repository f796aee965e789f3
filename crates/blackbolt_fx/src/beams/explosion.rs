//! Impact burst: two flashes and a spray of fragments.

use blackbolt_core::{keyframes, EffectRng, Easing};

/// One spray fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Final x offset from the impact point.
    pub dx: f32,
    /// Final y offset (always upward).
    pub dy: f32,
    /// Seconds of flight.
    pub lifetime: f32,
}

/// Animated values of a fragment at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentState {
    /// Offset from the impact point.
    pub offset: (f32, f32),
    /// Scale, 1 down to 0.4.
    pub scale: f32,
    /// Opacity, 1 down to 0.
    pub opacity: f32,
}

/// An impact burst. Reused across collisions of the same beam.
#[derive(Debug, Clone)]
pub struct Explosion {
    origin: (f32, f32),
    started_at: f64,
    fragments: Vec<Fragment>,
    active: bool,
}

impl Explosion {
    /// An inactive burst with room for `capacity` fragments.
    #[must_use]
    pub fn idle(capacity: usize) -> Self {
        Self {
            origin: (0.0, 0.0),
            started_at: 0.0,
            fragments: Vec::with_capacity(capacity),
            active: false,
        }
    }

    /// Starts a burst at `origin`.
    pub fn trigger(&mut self, origin: (f32, f32), now: f64, count: usize, rng: &mut EffectRng) {
        self.origin = origin;
        self.started_at = now;
        self.active = true;
        self.fragments.clear();
        self.fragments.extend((0..count).map(|_| Fragment {
            dx: rng.range(-50.0, 50.0).floor(),
            dy: rng.range(-70.0, -10.0).floor(),
            lifetime: rng.range(0.4, 1.6),
        }));
    }

    /// Removes the burst.
    pub fn clear(&mut self) {
        self.active = false;
        self.fragments.clear();
    }

    /// True while shown.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Impact point.
    #[must_use]
    pub const fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Fragments of the current burst.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    fn elapsed(&self, now: f64) -> f32 {
        (now - self.started_at).max(0.0) as f32
    }

    /// State of `fragment` at `now`.
    #[must_use]
    pub fn fragment_state(&self, fragment: &Fragment, now: f64) -> FragmentState {
        let t = if fragment.lifetime > 0.0 {
            self.elapsed(now) / fragment.lifetime
        } else {
            1.0
        };
        let e = Easing::CubicOut.apply(t);
        FragmentState {
            offset: (fragment.dx * e, fragment.dy * e),
            scale: 1.0 - 0.6 * e,
            opacity: 1.0 - e,
        }
    }

    /// Flash value at `now`: rises 0 to 1 and falls back over `duration`.
    #[must_use]
    pub fn flash(&self, now: f64, duration: f32) -> f32 {
        if duration <= 0.0 {
            return 0.0;
        }
        let t = Easing::CubicOut.apply(self.elapsed(now) / duration);
        keyframes(&[0.0, 1.0, 0.0], t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_envelope() {
        let mut e = Explosion::idle(24);
        e.trigger((100.0, 600.0), 1.0, 24, &mut EffectRng::seeded(12));
        assert_eq!(e.fragments().len(), 24);
        for f in e.fragments() {
            assert!((-50.0..50.0).contains(&f.dx));
            assert!((-70.0..=-10.0).contains(&f.dy));
            assert!((0.4..1.6).contains(&f.lifetime));
            assert_eq!(f.dx.fract(), 0.0);
        }
    }

    #[test]
    fn test_fragment_fades_out() {
        let mut e = Explosion::idle(1);
        e.trigger((0.0, 0.0), 0.0, 1, &mut EffectRng::seeded(1));
        let f = e.fragments()[0];
        let start = e.fragment_state(&f, 0.0);
        assert_eq!(start.opacity, 1.0);
        assert_eq!(start.scale, 1.0);
        let end = e.fragment_state(&f, 2.0);
        assert_eq!(end.opacity, 0.0);
        assert!((end.scale - 0.4).abs() < 1e-6);
        assert_eq!(end.offset, (f.dx, f.dy));
    }

    #[test]
    fn test_flash_peaks_and_returns() {
        let mut e = Explosion::idle(0);
        e.trigger((0.0, 0.0), 0.0, 0, &mut EffectRng::seeded(1));
        assert_eq!(e.flash(0.0, 0.6), 0.0);
        assert_eq!(e.flash(0.6, 0.6), 0.0);
        assert!(e.flash(0.1, 0.6) > 0.5);
    }

    #[test]
    fn test_clear_deactivates() {
        let mut e = Explosion::idle(4);
        e.trigger((0.0, 0.0), 0.0, 4, &mut EffectRng::seeded(1));
        e.clear();
        assert!(!e.is_active());
        assert!(e.fragments().is_empty());
    }
}
