//! Inertial scroll controller.
//!
//! ```text
//!              pointer down              pointer up (|v| > threshold)
//! Autoscroll ───────────────► Dragging ──────────────────────────────► Released
//!     ▲                          │                                       │
//!     │   pointer up (slow)      │            velocity reaches floor     │
//!     └──────────────────────────┘◄──────────────────────────────────────┘
//! ```
//!
//! Outside of `Dragging` the track moves every frame; velocity decays
//! multiplicatively toward a floor it never drops below.

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Moving at or above the floor velocity.
    Autoscroll,
    /// Following the pointer 1:1.
    Dragging,
    /// Coasting on a fling velocity, decaying toward the floor.
    Released,
}

/// Controller tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTuning {
    /// Autoscroll velocity after a slow release (px/s).
    pub default_velocity: f32,
    /// Direction after a slow release (-1 or 1).
    pub default_direction: f32,
    /// Velocity floor (px/s).
    pub min_velocity: f32,
    /// Per-frame velocity multiplier.
    pub decay: f32,
    /// Release velocity magnitude needed for a fling (px/s).
    pub release_threshold: f32,
    /// Position nudge per wheel event (px).
    pub wheel_step: f32,
    /// Largest frame delta honoured (s).
    pub max_dt: f32,
    /// Pointer deltas are scaled by this to estimate px/s.
    pub sample_rate: f32,
    /// Weight of the newest pointer sample in the velocity estimate.
    pub sample_weight: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            default_velocity: 120.0,
            default_direction: -1.0,
            min_velocity: 30.0,
            decay: 0.999,
            release_threshold: 30.0,
            wheel_step: 20.0,
            max_dt: 0.05,
            sample_rate: 60.0,
            sample_weight: 0.5,
        }
    }
}

/// What a pointer release did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Fast release; the track coasts at `velocity` in `direction`.
    Fling {
        /// Speed (px/s).
        velocity: f32,
        /// Sign of the release velocity.
        direction: f32,
    },
    /// Slow release; defaults restored.
    Reset,
    /// No drag was in progress.
    Ignored,
}

/// Position, velocity and drag state of the card strip.
#[derive(Debug, Clone)]
pub struct ScrollController {
    tuning: ScrollTuning,
    phase: ScrollPhase,
    position: f32,
    velocity: f32,
    direction: f32,
    container_width: f32,
    track_width: f32,
    last_pointer_x: f32,
    pointer_velocity: f32,
    wraps: u64,
}

impl ScrollController {
    /// Starts autoscrolling from the right edge of the container.
    #[must_use]
    pub fn new(tuning: ScrollTuning, container_width: f32, track_width: f32) -> Self {
        Self {
            phase: ScrollPhase::Autoscroll,
            position: container_width,
            velocity: tuning.default_velocity,
            direction: tuning.default_direction,
            container_width,
            track_width,
            last_pointer_x: 0.0,
            pointer_velocity: 0.0,
            wraps: 0,
            tuning,
        }
    }

    /// Advances one frame. Does nothing while dragging.
    pub fn step(&mut self, dt: f32) {
        if self.phase == ScrollPhase::Dragging {
            return;
        }
        let dt = dt.clamp(0.0, self.tuning.max_dt);

        self.velocity = (self.velocity * self.tuning.decay).max(self.tuning.min_velocity);
        if self.phase == ScrollPhase::Released && self.velocity <= self.tuning.min_velocity {
            self.phase = ScrollPhase::Autoscroll;
        }

        self.position += self.velocity * self.direction * dt;
        self.wrap();
    }

    /// Teleports the position to the opposite boundary once it passes one.
    pub fn wrap(&mut self) {
        if self.position < -self.track_width {
            self.position = self.container_width;
            self.wraps += 1;
        } else if self.position > self.container_width {
            self.position = -self.track_width;
            self.wraps += 1;
        }
    }

    /// Starts a drag at pointer `x`.
    pub fn pointer_down(&mut self, x: f32) {
        self.phase = ScrollPhase::Dragging;
        self.last_pointer_x = x;
        self.pointer_velocity = 0.0;
    }

    /// Moves the strip by the pointer delta. Returns false if not dragging.
    pub fn pointer_move(&mut self, x: f32) -> bool {
        if self.phase != ScrollPhase::Dragging {
            return false;
        }
        let dx = x - self.last_pointer_x;
        self.last_pointer_x = x;
        self.position += dx;

        let sample = dx * self.tuning.sample_rate;
        self.pointer_velocity += (sample - self.pointer_velocity) * self.tuning.sample_weight;
        self.wrap();
        true
    }

    /// Ends a drag and picks the post-release motion.
    pub fn pointer_up(&mut self) -> Release {
        if self.phase != ScrollPhase::Dragging {
            return Release::Ignored;
        }
        let v = self.pointer_velocity;
        if v.abs() > self.tuning.release_threshold {
            self.velocity = v.abs();
            self.direction = v.signum();
            self.phase = ScrollPhase::Released;
            Release::Fling {
                velocity: self.velocity,
                direction: self.direction,
            }
        } else {
            self.velocity = self.tuning.default_velocity;
            self.direction = self.tuning.default_direction;
            self.phase = ScrollPhase::Autoscroll;
            Release::Reset
        }
    }

    /// Nudges the strip by a fixed step. Only the sign of `delta_y` matters.
    pub fn wheel(&mut self, delta_y: f32) {
        self.position += if delta_y > 0.0 {
            self.tuning.wheel_step
        } else {
            -self.tuning.wheel_step
        };
        self.wrap();
    }

    /// Updates the container width after a resize.
    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = width;
    }

    /// Places the strip at `position` without wrapping.
    pub fn set_position(&mut self, position: f32) {
        self.position = position;
    }

    /// Strip offset in pixels.
    #[must_use]
    pub const fn position(&self) -> f32 {
        self.position
    }

    /// Current speed.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Current direction (-1 or 1).
    #[must_use]
    pub const fn direction(&self) -> f32 {
        self.direction
    }

    /// Current state.
    #[must_use]
    pub const fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Estimated pointer velocity during a drag.
    #[must_use]
    pub const fn pointer_velocity(&self) -> f32 {
        self.pointer_velocity
    }

    /// Width of the whole strip.
    #[must_use]
    pub const fn track_width(&self) -> f32 {
        self.track_width
    }

    /// Container width.
    #[must_use]
    pub const fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Number of boundary teleports so far.
    #[must_use]
    pub const fn wrap_count(&self) -> u64 {
        self.wraps
    }

    /// Tuning.
    #[must_use]
    pub const fn tuning(&self) -> &ScrollTuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackbolt_core::FRAME_DT;

    fn controller() -> ScrollController {
        ScrollController::new(ScrollTuning::default(), 1440.0, 13_800.0)
    }

    #[test]
    fn test_starts_at_container_edge() {
        let c = controller();
        assert_eq!(c.position(), 1440.0);
        assert_eq!(c.phase(), ScrollPhase::Autoscroll);
        assert_eq!(c.direction(), -1.0);
    }

    #[test]
    fn test_velocity_decays_to_floor() {
        let mut c = controller();
        for _ in 0..10_000 {
            c.step(FRAME_DT);
            assert!(c.velocity() >= 30.0);
        }
        assert_eq!(c.velocity(), 30.0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut c = controller();
        let before = c.position();
        c.step(10.0);
        let moved = before - c.position();
        assert!((moved - 120.0 * 0.999 * 0.05).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_is_exact() {
        let mut c = controller();
        c.set_position(-13_800.5);
        c.wrap();
        assert_eq!(c.position(), 1440.0);

        c.set_position(1440.5);
        c.wrap();
        assert_eq!(c.position(), -13_800.0);
        assert_eq!(c.wrap_count(), 2);
    }

    #[test]
    fn test_drag_tracks_pointer() {
        let mut c = controller();
        c.set_position(0.0);
        c.pointer_down(100.0);
        let start = c.position();
        assert!(c.pointer_move(130.0));
        assert!(c.pointer_move(120.0));
        assert!((c.position() - (start + 20.0)).abs() < 1e-3);

        c.step(FRAME_DT);
        assert!((c.position() - (start + 20.0)).abs() < 1e-3);
    }

    #[test]
    fn test_fast_release_flings_in_sign_direction() {
        let mut c = controller();
        c.pointer_down(500.0);
        c.pointer_move(520.0);
        c.pointer_move(540.0);
        match c.pointer_up() {
            Release::Fling { velocity, direction } => {
                assert_eq!(direction, 1.0);
                assert!((velocity - 900.0).abs() < 1e-3);
            }
            other => panic!("expected fling, got {other:?}"),
        }
        assert_eq!(c.phase(), ScrollPhase::Released);

        for _ in 0..5_000 {
            c.step(FRAME_DT);
        }
        assert_eq!(c.phase(), ScrollPhase::Autoscroll);
        assert_eq!(c.direction(), 1.0);
    }

    #[test]
    fn test_slow_release_resets_defaults() {
        let mut c = controller();
        c.pointer_down(500.0);
        c.pointer_move(500.2);
        assert_eq!(c.pointer_up(), Release::Reset);
        assert_eq!(c.velocity(), 120.0);
        assert_eq!(c.direction(), -1.0);
    }

    #[test]
    fn test_release_without_drag_is_ignored() {
        let mut c = controller();
        assert_eq!(c.pointer_up(), Release::Ignored);
        assert!(!c.pointer_move(10.0));
    }

    #[test]
    fn test_wheel_nudges_by_sign() {
        let mut c = controller();
        c.set_position(0.0);
        c.wheel(3.0);
        assert_eq!(c.position(), 20.0);
        c.wheel(-250.0);
        c.wheel(0.0);
        assert_eq!(c.position(), -20.0);
        assert_eq!(c.phase(), ScrollPhase::Autoscroll);
    }
}
