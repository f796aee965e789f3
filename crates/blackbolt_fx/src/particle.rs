//! Scanner particles.
//!
//! Units are per nominal 60 Hz frame: `vx` is pixels per frame, `decay` is
//! life lost per frame. The stream scales them by the frames elapsed.

use blackbolt_core::EffectRng;

use crate::intensity::SpawnScale;

/// One streaming particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// X position in pixels.
    pub x: f32,
    /// Y position in pixels.
    pub y: f32,
    /// Horizontal velocity (px/frame).
    pub vx: f32,
    /// Vertical velocity (px/frame).
    pub vy: f32,
    /// Sprite radius.
    pub radius: f32,
    /// Current alpha, after twinkle.
    pub alpha: f32,
    /// Alpha at spawn.
    pub base_alpha: f32,
    /// Life lost per frame.
    pub decay: f32,
    /// Remaining life in [0, 1].
    pub life: f32,
    /// Frames since spawn.
    pub time: f32,
    /// Twinkle angular speed (rad/frame).
    pub twinkle_speed: f32,
    /// Twinkle amplitude.
    pub twinkle_amount: f32,
}

impl Particle {
    /// Samples a fresh particle inside the light bar.
    #[must_use]
    pub fn spawn(rng: &mut EffectRng, bar_x: f32, bar_width: f32, height: f32, scale: SpawnScale) -> Self {
        let alpha = rng.range(0.6, 1.0);
        Self {
            x: bar_x + rng.range(-bar_width * 0.5, bar_width * 0.5),
            y: rng.range(0.0, height),
            vx: rng.range(0.2, 1.0) * scale.speed,
            vy: rng.range(-0.15, 0.15) * scale.speed,
            radius: rng.range(0.4, 1.0) * scale.size,
            alpha,
            base_alpha: alpha,
            decay: rng.range(0.005, 0.025) * scale.decay,
            life: 1.0,
            time: 0.0,
            twinkle_speed: rng.range(0.02, 0.08) * scale.speed,
            twinkle_amount: rng.range(0.1, 0.25),
        }
    }

    /// Advances `frames` nominal frames. Returns false once the particle is
    /// dead or has left the drift bounds.
    pub fn advance(&mut self, frames: f32, right_bound: f32) -> bool {
        self.x += self.vx * frames;
        self.y += self.vy * frames;
        self.time += frames;
        self.alpha = self.base_alpha * self.life + (self.time * self.twinkle_speed).sin() * self.twinkle_amount;
        self.life -= self.decay * frames;
        self.life > 0.0 && self.x <= right_bound
    }

    /// Alpha multiplier that vignettes particles near the top and bottom.
    #[must_use]
    pub fn edge_fade(&self, height: f32, fade_zone: f32) -> f32 {
        if fade_zone <= 0.0 {
            return 1.0;
        }
        let fade = if self.y < fade_zone {
            self.y / fade_zone
        } else if self.y > height - fade_zone {
            (height - self.y) / fade_zone
        } else {
            1.0
        };
        fade.clamp(0.0, 1.0)
    }
}
