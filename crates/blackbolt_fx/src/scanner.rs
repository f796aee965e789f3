//! # Scanner
//!
//! Vertical light bar at the viewport centre with particles streaming to
//! the right. While a carousel card sits under the scan line the intensity
//! preset switches to "scanning" and every parameter eases toward it.
//!
//! Frame order:
//! 1. Blend intensity, budget, fade zone and glow toward the active preset
//! 2. Advance live particles, recycling dead or escaped ones in place
//! 3. Spawn (one base attempt plus threshold bursts)
//! 4. Trim from the tail only when far over budget
//!
//! Drawing: stacked glow bands (additive), a vertical fade mask
//! (destination-in), then the particles (additive).

use blackbolt_core::{frames_elapsed, EffectRng, Rect, ScanReader, TailPool, Viewport};
use serde::Deserialize;

use crate::draw::{BlendMode, Color, DrawCommand, DrawList, Gradient, GradientAxis, SpriteId};
use crate::effect::{Effect, EffectCtx, SurfaceKind};
use crate::intensity::{IntensityBlend, IntensityPreset, BURST_THRESHOLDS};
use crate::particle::Particle;

/// Scanner parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Canvas height in pixels.
    pub height: f32,
    /// Width of the bright core line.
    pub light_bar_width: f32,
    /// Idle spawn probability per frame.
    pub base_intensity: f32,
    /// Idle particle budget.
    pub base_max_particles: usize,
    /// Idle fade-zone height.
    pub base_fade_zone: f32,
    /// Scanning spawn probability per frame.
    pub scan_intensity: f32,
    /// Scanning particle budget.
    pub scan_max_particles: usize,
    /// Scanning fade-zone height.
    pub scan_fade_zone: f32,
    /// Idle glow multiplier.
    pub idle_glow: f32,
    /// Scanning glow multiplier.
    pub scan_glow: f32,
    /// Per-frame smoothing factor.
    pub smoothing: f32,
    /// How far over budget the pool may run before trimming.
    pub trim_slack: usize,
    /// Maximum particles trimmed per frame.
    pub trim_batch: usize,
    /// Particles recycle once `x > width + exit_margin`.
    pub exit_margin: f32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            light_bar_width: 3.0,
            base_intensity: 0.8,
            base_max_particles: 800,
            base_fade_zone: 60.0,
            scan_intensity: 1.8,
            scan_max_particles: 2500,
            scan_fade_zone: 35.0,
            idle_glow: 1.0,
            scan_glow: 3.5,
            smoothing: 0.05,
            trim_slack: 200,
            trim_batch: 15,
            exit_margin: 10.0,
        }
    }
}

impl ScannerConfig {
    /// Hard pool capacity: the larger budget, the trim slack, and headroom
    /// for one frame of burst spawns.
    #[must_use]
    pub fn pool_capacity(&self) -> usize {
        self.base_max_particles.max(self.scan_max_particles) + self.trim_slack + BURST_THRESHOLDS.len() + 1
    }

    fn idle_preset(&self) -> IntensityPreset {
        IntensityPreset {
            intensity: self.base_intensity,
            max_particles: self.base_max_particles as f32,
            fade_zone: self.base_fade_zone,
            glow: self.idle_glow,
        }
    }

    fn scan_preset(&self) -> IntensityPreset {
        IntensityPreset {
            intensity: self.scan_intensity,
            max_particles: self.scan_max_particles as f32,
            fade_zone: self.scan_fade_zone,
            glow: self.scan_glow,
        }
    }
}

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerStats {
    /// Live particles after the frame.
    pub live: usize,
    /// Particles spawned this frame.
    pub spawned: usize,
    /// Particles recycled in place this frame.
    pub recycled: usize,
    /// Particles trimmed from the tail this frame.
    pub trimmed: usize,
}

/// The scanner effect.
#[derive(Debug)]
pub struct Scanner {
    config: ScannerConfig,
    pool: TailPool<Particle>,
    blend: IntensityBlend,
    rng: EffectRng,
    signal: ScanReader,
    width: f32,
    bar_x: f32,
    scanning: bool,
    stats: ScannerStats,
}

impl Scanner {
    /// Creates a scanner with its idle pool already populated.
    #[must_use]
    pub fn new(config: ScannerConfig, viewport: Viewport, signal: ScanReader, mut rng: EffectRng) -> Self {
        let blend = IntensityBlend::new(config.idle_preset(), config.scan_preset(), config.smoothing);
        let bar_x = viewport.center_x();
        let scale = blend.spawn_scale();
        let (bar_width, height) = (config.light_bar_width, config.height);
        let pool = TailPool::with_live(config.pool_capacity(), config.base_max_particles, |_| {
            Particle::spawn(&mut rng, bar_x, bar_width, height, scale)
        });

        Self {
            config,
            pool,
            blend,
            rng,
            signal,
            width: viewport.width,
            bar_x,
            scanning: false,
            stats: ScannerStats::default(),
        }
    }

    /// Advances one frame using the scan signal.
    pub fn step(&mut self, dt: f32) -> ScannerStats {
        let scanning = self.signal.is_active();
        self.step_with(dt, scanning)
    }

    /// Advances one frame with an explicit scan state.
    pub fn step_with(&mut self, dt: f32, scanning: bool) -> ScannerStats {
        self.scanning = scanning;
        self.blend.step(scanning);

        let frames = frames_elapsed(dt);
        let right_bound = self.width + self.config.exit_margin;
        let scale = self.blend.spawn_scale();
        let mut stats = ScannerStats::default();

        for particle in self.pool.iter_mut() {
            if !particle.advance(frames, right_bound) {
                *particle = Particle::spawn(
                    &mut self.rng,
                    self.bar_x,
                    self.config.light_bar_width,
                    self.config.height,
                    scale,
                );
                stats.recycled += 1;
            }
        }

        let max = self.blend.max_particles();
        if self.rng.chance(self.blend.intensity()) && self.pool.live_count() < max && self.spawn_one() {
            stats.spawned += 1;
        }

        let ratio = self.blend.ratio();
        for (threshold, mult) in BURST_THRESHOLDS {
            if ratio > threshold && self.rng.chance((ratio - threshold) * mult) && self.spawn_one() {
                stats.spawned += 1;
            }
        }

        let live = self.pool.live_count();
        if live > max + self.config.trim_slack {
            let excess = self.config.trim_batch.min(live - max);
            stats.trimmed = self.pool.trim_tail(excess);
        }

        stats.live = self.pool.live_count();
        self.stats = stats;
        stats
    }

    fn spawn_one(&mut self) -> bool {
        let particle = Particle::spawn(
            &mut self.rng,
            self.bar_x,
            self.config.light_bar_width,
            self.config.height,
            self.blend.spawn_scale(),
        );
        self.pool.spawn(particle).is_some()
    }

    /// Live particle count.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.pool.as_slice()
    }

    /// Smoothed parameters.
    #[must_use]
    pub const fn blend(&self) -> &IntensityBlend {
        &self.blend
    }

    /// Scan state seen on the last frame.
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Counters from the last frame.
    #[must_use]
    pub const fn stats(&self) -> ScannerStats {
        self.stats
    }

    /// Light bar x position.
    #[must_use]
    pub const fn bar_x(&self) -> f32 {
        self.bar_x
    }

    /// Parameters.
    #[must_use]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }

    fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.config.height)
    }

    fn glow_band(&self, list: &mut DrawList, half_width: f32, stops: &[(f32, Color)], corner: f32, alpha: f32) {
        list.push(DrawCommand::GradientRect {
            bounds: Rect::new(self.bar_x - half_width, 0.0, half_width * 2.0, self.config.height),
            gradient: Gradient::new(GradientAxis::Horizontal, stops),
            corner_radius: corner,
            alpha,
            blend: BlendMode::Additive,
        });
    }
}

impl Effect for Scanner {
    fn name(&self) -> &'static str {
        "scanner"
    }

    fn surface(&self) -> SurfaceKind {
        SurfaceKind::Canvas2d
    }

    fn z_index(&self) -> i32 {
        15
    }

    fn mount(&mut self, ctx: &mut EffectCtx<'_>) {
        ctx.request_frame();
    }

    fn frame(&mut self, dt: f32, _ctx: &mut EffectCtx<'_>) {
        self.step(dt);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width;
        self.bar_x = viewport.center_x();
    }

    fn draw(&self, list: &mut DrawList) {
        let lw = self.config.light_bar_width;
        let gi = self.blend.glow();
        let clear = Color::WHITE.with_alpha(0.0);
        let violet_clear = Color::VIOLET.with_alpha(0.0);

        list.push(DrawCommand::Clear { bounds: self.canvas() });

        self.glow_band(
            list,
            lw * 0.5,
            &[
                (0.0, clear),
                (0.3, Color::WHITE.with_alpha(0.9 * gi)),
                (0.5, Color::WHITE.with_alpha(gi)),
                (0.7, Color::WHITE.with_alpha(0.9 * gi)),
                (1.0, clear),
            ],
            15.0,
            1.0,
        );
        self.glow_band(
            list,
            lw * 2.0,
            &[(0.0, violet_clear), (0.5, Color::LAVENDER.with_alpha(0.8 * gi)), (1.0, violet_clear)],
            25.0,
            if self.scanning { 1.0 } else { 0.8 },
        );
        self.glow_band(
            list,
            lw * 4.0,
            &[(0.0, violet_clear), (0.5, Color::VIOLET.with_alpha(0.4 * gi)), (1.0, violet_clear)],
            35.0,
            if self.scanning { 0.8 } else { 0.6 },
        );
        if self.scanning {
            self.glow_band(
                list,
                lw * 8.0,
                &[(0.0, violet_clear), (0.5, Color::VIOLET.with_alpha(0.2)), (1.0, violet_clear)],
                45.0,
                0.6,
            );
        }

        let h = self.config.height;
        let fade = if h > 0.0 { (self.blend.fade_zone() / h).clamp(0.0, 0.5) } else { 0.0 };
        list.push(DrawCommand::GradientRect {
            bounds: self.canvas(),
            gradient: Gradient::new(
                GradientAxis::Vertical,
                &[(0.0, clear), (fade, Color::WHITE), (1.0 - fade, Color::WHITE), (1.0, clear)],
            ),
            corner_radius: 0.0,
            alpha: 1.0,
            blend: BlendMode::DestinationIn,
        });

        let fade_zone = self.blend.fade_zone();
        for p in self.pool.iter().filter(|p| p.life > 0.0) {
            list.push(DrawCommand::Sprite {
                sprite: SpriteId::ScannerGlow,
                center: (p.x, p.y),
                radius: p.radius,
                alpha: (p.alpha * p.edge_fade(h, fade_zone)).clamp(0.0, 1.0),
                blend: BlendMode::Additive,
            });
        }
    }
}
