//! # Beam Field
//!
//! Thin vertical beams fall across the page and burst when they hit a one
//! pixel floor at the bottom of the viewport.
//!
//! Collision is polled on a short interval rather than every frame. A hit
//! is sticky for the cooldown window: the beam keeps falling through the
//! floor without retriggering, and when the cooldown timer fires the beam
//! resets and starts over from the top.

mod beam;
mod explosion;

pub use beam::{Beam, BeamSpec, FallPath};
pub use explosion::{Explosion, Fragment, FragmentState};

use blackbolt_core::{EffectRng, Rect, Viewport};
use serde::Deserialize;
use tracing::debug;

use crate::draw::{BlendMode, Color, DrawCommand, DrawList, Gradient, GradientAxis};
use crate::effect::{Effect, EffectCtx, SurfaceKind};

/// Timer tag of the collision poll. Cooldown timers use the beam index.
const POLL_TAG: u32 = u32::MAX;

/// Beam field parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// The beams.
    pub beams: Vec<BeamSpec>,
    /// Beam width.
    pub width: f32,
    /// Top edge at the start of a fall.
    pub start_y: f32,
    /// Fall end as a fraction of the viewport height.
    pub end_factor: f32,
    /// Seconds between collision polls.
    pub poll_secs: f32,
    /// Seconds a collision stays latched.
    pub cooldown_secs: f32,
    /// Fragments per burst.
    pub fragment_count: usize,
    /// Horizontal flash duration.
    pub horizontal_flash_secs: f32,
    /// Vertical flash duration.
    pub vertical_flash_secs: f32,
    /// Layer opacity.
    pub opacity: f32,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            beams: default_beams(),
            width: 2.0,
            start_y: -220.0,
            end_factor: 1.1,
            poll_secs: 0.05,
            cooldown_secs: 2.0,
            fragment_count: 24,
            horizontal_flash_secs: 0.6,
            vertical_flash_secs: 0.4,
            opacity: 1.0,
        }
    }
}

/// The fifteen beams of the landing page hero.
#[must_use]
pub fn default_beams() -> Vec<BeamSpec> {
    vec![
        BeamSpec::new(60.0, 9.0, 2.0, 0.0),
        BeamSpec::new(180.0, 6.0, 5.0, 1.5).with_height(32.0),
        BeamSpec::new(320.0, 8.0, 3.0, 0.5),
        BeamSpec::new(480.0, 5.0, 7.0, 3.0).with_height(40.0),
        BeamSpec::new(640.0, 11.0, 2.0, 0.0),
        BeamSpec::new(780.0, 7.0, 4.0, 2.0).with_height(24.0),
        BeamSpec::new(920.0, 4.0, 6.0, 1.0).with_height(48.0),
        BeamSpec::new(1080.0, 9.0, 3.0, 4.0),
        BeamSpec::new(1220.0, 6.0, 5.0, 0.5).with_height(32.0),
        BeamSpec::new(1380.0, 8.0, 2.0, 2.0).with_height(56.0),
        BeamSpec::new(1520.0, 5.0, 8.0, 3.5),
        BeamSpec::new(240.0, 12.0, 1.0, 1.0),
        BeamSpec::new(860.0, 7.0, 4.0, 5.0).with_height(40.0),
        BeamSpec::new(1150.0, 10.0, 3.0, 2.5),
        BeamSpec::new(420.0, 6.0, 6.0, 0.0),
    ]
}

/// The beam field effect.
#[derive(Debug)]
pub struct BeamField {
    config: BeamConfig,
    beams: Vec<Beam>,
    explosions: Vec<Explosion>,
    viewport: Viewport,
    rng: EffectRng,
    now: f64,
}

impl BeamField {
    /// Creates the field with every fall cycle starting at time zero.
    #[must_use]
    pub fn new(config: BeamConfig, viewport: Viewport, rng: EffectRng) -> Self {
        let beams = config.beams.iter().cloned().map(|spec| Beam::new(spec, 0.0)).collect();
        let explosions = (0..config.beams.len())
            .map(|_| Explosion::idle(config.fragment_count))
            .collect();
        Self {
            config,
            beams,
            explosions,
            viewport,
            rng,
            now: 0.0,
        }
    }

    /// Vertical travel for the current viewport.
    #[must_use]
    pub fn path(&self) -> FallPath {
        FallPath {
            start_y: self.config.start_y,
            end_y: self.viewport.height * self.config.end_factor,
            width: self.config.width,
        }
    }

    /// The collision floor: one pixel at the bottom of the viewport.
    #[must_use]
    pub fn floor(&self) -> Rect {
        Rect::new(0.0, self.viewport.height - 1.0, self.viewport.width, 1.0)
    }

    /// Restarts every fall cycle at `now`.
    pub fn restart(&mut self, now: f64) {
        self.now = now;
        for (beam, explosion) in self.beams.iter_mut().zip(&mut self.explosions) {
            *beam = Beam::new(beam.spec().clone(), now);
            explosion.clear();
        }
    }

    /// Checks every beam against the floor at `now`. `on_hit` receives the
    /// index of each beam that collided on this poll.
    pub fn poll(&mut self, now: f64, mut on_hit: impl FnMut(usize)) -> usize {
        self.now = now;
        let path = self.path();
        let floor_top = self.floor().y;
        let mut hits = 0;

        for (index, (beam, explosion)) in self.beams.iter_mut().zip(&mut self.explosions).enumerate() {
            let rect = beam.rect(now, path);
            if let Some(impact) = beam.try_collide(rect, floor_top) {
                explosion.trigger(impact, now, self.config.fragment_count, &mut self.rng);
                debug!(beam = index, x = impact.0, y = impact.1, "beam collision");
                on_hit(index);
                hits += 1;
            }
        }
        hits
    }

    /// Ends the cooldown of beam `index`. Returns false for an unknown index.
    pub fn release(&mut self, index: usize, now: f64) -> bool {
        self.now = now;
        match (self.beams.get_mut(index), self.explosions.get_mut(index)) {
            (Some(beam), Some(explosion)) => {
                beam.reset(now);
                explosion.clear();
                true
            }
            _ => false,
        }
    }

    /// Moves the draw clock.
    pub fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    /// Beams.
    #[must_use]
    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    /// Bursts, one slot per beam.
    #[must_use]
    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Parameters.
    #[must_use]
    pub const fn config(&self) -> &BeamConfig {
        &self.config
    }

    fn draw_explosion(&self, explosion: &Explosion, list: &mut DrawList) {
        let (x, y) = explosion.origin();
        let opacity = self.config.opacity;
        let clear = Color::EMERALD_300.with_alpha(0.0);

        let h = explosion.flash(self.now, self.config.horizontal_flash_secs);
        if h > 0.0 {
            list.push(DrawCommand::GradientRect {
                bounds: Rect::centered(x, y, 64.0 * h, 2.0),
                gradient: Gradient::new(
                    GradientAxis::Horizontal,
                    &[(0.0, clear), (0.5, Color::EMERALD_300), (1.0, clear)],
                ),
                corner_radius: 1.0,
                alpha: h * opacity,
                blend: BlendMode::SourceOver,
            });
        }

        let v = explosion.flash(self.now, self.config.vertical_flash_secs);
        if v > 0.0 {
            list.push(DrawCommand::FillRect {
                bounds: Rect::new(x - 1.0, y, 2.0, 24.0),
                color: Color::EMERALD_300,
                corner_radius: 1.0,
                alpha: v * opacity,
                blend: BlendMode::SourceOver,
            });
        }

        for fragment in explosion.fragments() {
            let state = explosion.fragment_state(fragment, self.now);
            if state.opacity <= 0.0 {
                continue;
            }
            list.push(DrawCommand::Circle {
                center: (x + state.offset.0, y + state.offset.1),
                radius: 2.0 * state.scale,
                color: Color::EMERALD_400,
                alpha: state.opacity * opacity,
            });
        }
    }
}

impl Effect for BeamField {
    fn name(&self) -> &'static str {
        "beams"
    }

    fn surface(&self) -> SurfaceKind {
        SurfaceKind::Dom
    }

    fn z_index(&self) -> i32 {
        1
    }

    fn mount(&mut self, ctx: &mut EffectCtx<'_>) {
        self.restart(ctx.now());
        ctx.request_frame();
        ctx.set_interval(self.config.poll_secs, POLL_TAG);
    }

    fn frame(&mut self, _dt: f32, ctx: &mut EffectCtx<'_>) {
        self.set_now(ctx.now());
    }

    fn timer(&mut self, tag: u32, ctx: &mut EffectCtx<'_>) {
        let now = ctx.now();
        if tag == POLL_TAG {
            let cooldown = self.config.cooldown_secs;
            self.poll(now, |index| {
                ctx.set_timeout(cooldown, index as u32);
            });
        } else {
            self.release(tag as usize, now);
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn draw(&self, list: &mut DrawList) {
        let path = self.path();
        let clear = Color::EMERALD_400.with_alpha(0.0);
        for beam in &self.beams {
            let rect = beam.rect(self.now, path);
            if rect.bottom() > 0.0 && rect.y < self.viewport.height {
                list.push(DrawCommand::GradientRect {
                    bounds: rect,
                    gradient: Gradient::new(
                        GradientAxis::Vertical,
                        &[(0.0, Color::EMERALD_300), (0.5, Color::EMERALD_400), (1.0, clear)],
                    ),
                    corner_radius: path.width * 0.5,
                    alpha: 0.7 * self.config.opacity,
                    blend: BlendMode::SourceOver,
                });
            }
        }
        for explosion in self.explosions.iter().filter(|e| e.is_active()) {
            self.draw_explosion(explosion, list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(duration: f32) -> BeamField {
        let config = BeamConfig {
            beams: vec![BeamSpec::new(100.0, duration, 0.0, 0.0)],
            ..BeamConfig::default()
        };
        BeamField::new(config, Viewport::new(800.0, 600.0), EffectRng::seeded(3))
    }

    #[test]
    fn test_default_field() {
        let config = BeamConfig::default();
        assert_eq!(config.beams.len(), 15);
        assert_eq!(config.beams[0].height, 64.0);
        assert_eq!(config.beams[9].height, 56.0);
    }

    #[test]
    fn test_floor_is_bottom_pixel() {
        let field = single(2.0);
        assert_eq!(field.floor(), Rect::new(0.0, 599.0, 800.0, 1.0));
        assert_eq!(field.path().end_y, 660.0);
    }

    #[test]
    fn test_poll_latches_until_release() {
        let mut field = single(2.0);
        let mut hit_times = Vec::new();
        for k in 0..=200_u32 {
            let now = f64::from(k) * 0.05;
            if field.poll(now, |_| {}) > 0 {
                hit_times.push(k);
            }
            if hit_times.len() == 1 && k == hit_times[0] + 40 {
                field.release(0, now);
            }
        }
        // Falls 880 px in 2 s; bottom reaches y = 599 at ~1.716 s.
        assert_eq!(hit_times[0], 35);
        assert_eq!(hit_times[1], 35 + 40 + 35);
        assert_eq!(field.beams()[0].collisions(), 2);
    }

    #[test]
    fn test_hit_triggers_explosion() {
        let mut field = single(2.0);
        let mut hit = None;
        field.poll(1.8, |i| hit = Some(i));
        assert_eq!(hit, Some(0));
        let e = &field.explosions()[0];
        assert!(e.is_active());
        assert_eq!(e.fragments().len(), 24);
        assert_eq!(e.origin().0, 101.0);

        let mut list = DrawList::new();
        field.draw(&mut list);
        assert!(list.count_where(|c| matches!(c, DrawCommand::Circle { .. })) > 0);

        assert!(field.release(0, 3.8));
        assert!(!field.explosions()[0].is_active());
        assert!(!field.release(7, 3.8));
    }
}
