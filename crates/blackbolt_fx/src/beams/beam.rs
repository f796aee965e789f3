//! A single falling beam and its sticky collision state.

use blackbolt_core::Rect;
use serde::Deserialize;

fn default_height() -> f32 {
    64.0
}

/// Placement and timing of one beam.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeamSpec {
    /// Horizontal offset from the left edge.
    pub x: f32,
    /// Seconds per fall.
    pub duration: f32,
    /// Seconds held at the bottom between falls.
    #[serde(default)]
    pub repeat_delay: f32,
    /// Seconds before the first fall.
    #[serde(default)]
    pub delay: f32,
    /// Beam length.
    #[serde(default = "default_height")]
    pub height: f32,
}

impl BeamSpec {
    /// Beam with the default length.
    #[must_use]
    pub fn new(x: f32, duration: f32, repeat_delay: f32, delay: f32) -> Self {
        Self {
            x,
            duration,
            repeat_delay,
            delay,
            height: default_height(),
        }
    }

    /// Overrides the length.
    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

/// Vertical travel shared by every beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallPath {
    /// Top edge at the start of a fall.
    pub start_y: f32,
    /// Top edge at the end of a fall.
    pub end_y: f32,
    /// Beam width.
    pub width: f32,
}

/// A beam and its collision state.
#[derive(Debug, Clone)]
pub struct Beam {
    spec: BeamSpec,
    render_key: u32,
    started_at: f64,
    collided: bool,
    impact: Option<(f32, f32)>,
    collisions: u32,
}

impl Beam {
    /// A beam whose fall cycle starts at `now`.
    #[must_use]
    pub fn new(spec: BeamSpec, now: f64) -> Self {
        Self {
            spec,
            render_key: 0,
            started_at: now,
            collided: false,
            impact: None,
            collisions: 0,
        }
    }

    /// Top edge at `now`. Linear fall, held at the bottom during the
    /// repeat delay, parked above the viewport before the initial delay.
    #[must_use]
    pub fn top(&self, now: f64, path: FallPath) -> f32 {
        let local = (now - self.started_at) as f32 - self.spec.delay;
        if local < 0.0 || self.spec.duration <= 0.0 {
            return path.start_y;
        }
        let period = self.spec.duration + self.spec.repeat_delay.max(0.0);
        let phase = local % period;
        let t = (phase / self.spec.duration).min(1.0);
        path.start_y + (path.end_y - path.start_y) * t
    }

    /// Bounding rectangle at `now`.
    #[must_use]
    pub fn rect(&self, now: f64, path: FallPath) -> Rect {
        Rect::new(self.spec.x, self.top(now, path), path.width, self.spec.height)
    }

    /// Marks a collision if `rect` reached `floor_top` and none is pending.
    /// Returns the impact point (bottom centre) on the transition.
    pub fn try_collide(&mut self, rect: Rect, floor_top: f32) -> Option<(f32, f32)> {
        if self.collided || rect.bottom() < floor_top {
            return None;
        }
        let impact = (rect.x + rect.width * 0.5, rect.bottom());
        self.collided = true;
        self.impact = Some(impact);
        self.collisions += 1;
        Some(impact)
    }

    /// Ends the cooldown: clears the collision, bumps the render key and
    /// restarts the fall cycle from the top at `now`.
    pub fn reset(&mut self, now: f64) {
        self.collided = false;
        self.impact = None;
        self.render_key = self.render_key.wrapping_add(1);
        self.started_at = now;
    }

    /// Placement and timing.
    #[must_use]
    pub const fn spec(&self) -> &BeamSpec {
        &self.spec
    }

    /// True between a collision and its cooldown expiry.
    #[must_use]
    pub const fn is_collided(&self) -> bool {
        self.collided
    }

    /// Impact point of the pending collision.
    #[must_use]
    pub const fn impact(&self) -> Option<(f32, f32)> {
        self.impact
    }

    /// Incremented on every reset so a renderer can rebuild the element.
    #[must_use]
    pub const fn render_key(&self) -> u32 {
        self.render_key
    }

    /// Collisions so far.
    #[must_use]
    pub const fn collisions(&self) -> u32 {
        self.collisions
    }
}
