//! # Ambient Drift
//!
//! A fixed band of soft glow points drifting rightward behind the hero,
//! rendered as point sprites by a 3D context with an orthographic camera
//! centred on the origin.
//!
//! The pool never grows: a point leaving the right edge re-enters at the
//! left edge with a fresh height. Each frame rewrites the instance buffer
//! in place for upload.

use blackbolt_core::{EffectRng, TailPool, Viewport};
use serde::Deserialize;

use crate::draw::{BlendMode, DrawCommand, DrawList, SpriteId};
use crate::effect::{Effect, EffectCtx, SurfaceKind};
use crate::instance::SpriteInstance;

/// Ambient drift parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Number of points.
    pub count: usize,
    /// Height of the band the points live in.
    pub band_height: f32,
    /// Minimum horizontal speed (px/s).
    pub speed_min: f32,
    /// Maximum horizontal speed (px/s).
    pub speed_max: f32,
    /// Distance past each edge before wrapping.
    pub margin: f32,
    /// Point sprite size in pixels.
    pub sprite_size: f32,
    /// Vertical wobble amplitude per frame.
    pub wobble: f32,
    /// Alpha random-walk step.
    pub twinkle_step: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            count: 400,
            band_height: 250.0,
            speed_min: 30.0,
            speed_max: 90.0,
            margin: 100.0,
            sprite_size: 15.0,
            wobble: 0.5,
            twinkle_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drifter {
    x: f32,
    y: f32,
    speed: f32,
    alpha: f32,
}

/// The ambient drift effect.
#[derive(Debug)]
pub struct AmbientDrift {
    config: AmbientConfig,
    pool: TailPool<Drifter>,
    instances: Vec<SpriteInstance>,
    rng: EffectRng,
    half_width: f32,
    elapsed: f32,
}

impl AmbientDrift {
    /// Scatters the points over twice the viewport width.
    #[must_use]
    pub fn new(config: AmbientConfig, viewport: Viewport, mut rng: EffectRng) -> Self {
        let half_band = config.band_height * 0.5;
        let (speed_min, speed_max) = (config.speed_min, config.speed_max);
        let pool = TailPool::with_live(config.count, config.count, |_| Drifter {
            x: rng.range(-viewport.width, viewport.width),
            y: rng.range(-half_band, half_band),
            speed: rng.range(speed_min, speed_max),
            alpha: rng.range(0.2, 1.0),
        });
        let mut drift = Self {
            instances: Vec::with_capacity(config.count),
            config,
            pool,
            rng,
            half_width: viewport.width * 0.5,
            elapsed: 0.0,
        };
        drift.write_instances();
        drift
    }

    /// Advances all points by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt;
        let right = self.half_width + self.config.margin;
        let left = -right;
        let half_band = self.config.band_height * 0.5;
        let step = self.config.twinkle_step;

        for (i, d) in self.pool.iter_mut().enumerate() {
            d.x += d.speed * dt;
            if d.x > right {
                d.x = left;
                d.y = self.rng.range(-half_band, half_band);
            }
            d.y += (self.elapsed + i as f32 * 0.1).sin() * self.config.wobble;

            match self.rng.below(10) {
                1 if d.alpha > 0.0 => d.alpha -= step,
                2 if d.alpha < 1.0 => d.alpha += step,
                _ => {}
            }
            d.alpha = d.alpha.clamp(0.0, 1.0);
        }

        self.write_instances();
    }

    fn write_instances(&mut self) {
        let size = self.config.sprite_size;
        self.instances.clear();
        self.instances
            .extend(self.pool.iter().map(|d| SpriteInstance::white(d.x, d.y, d.alpha, size)));
    }

    /// Instance buffer for the current frame.
    #[must_use]
    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    /// Camera half-width.
    #[must_use]
    pub const fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Parameters.
    #[must_use]
    pub const fn config(&self) -> &AmbientConfig {
        &self.config
    }
}

impl Effect for AmbientDrift {
    fn name(&self) -> &'static str {
        "ambient"
    }

    fn surface(&self) -> SurfaceKind {
        SurfaceKind::Webgl
    }

    fn mount(&mut self, ctx: &mut EffectCtx<'_>) {
        ctx.request_frame();
    }

    fn frame(&mut self, dt: f32, _ctx: &mut EffectCtx<'_>) {
        self.step(dt);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.half_width = viewport.width * 0.5;
    }

    fn draw(&self, list: &mut DrawList) {
        let half_band = self.config.band_height * 0.5;
        let radius = self.config.sprite_size * 0.5;
        for instance in &self.instances {
            list.push(DrawCommand::Sprite {
                sprite: SpriteId::AmbientGlow,
                center: (instance.position[0] + self.half_width, half_band - instance.position[1]),
                radius,
                alpha: instance.alpha,
                blend: BlendMode::Additive,
            });
        }
    }
}
