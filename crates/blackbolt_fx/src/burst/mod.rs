//! # Letter Burst
//!
//! Text that lands letter by letter. Each letter pops in with an
//! overshooting scale, hops up and back down while wobbling, and shortly
//! after it appears throws off a ring of triangles and circles.
//!
//! Letters are staggered by a fixed delay. A completion callback fires once,
//! a fixed time after the last letter starts.

mod fragment;

pub use fragment::{BurstFragment, FragmentShape};

use std::f32::consts::PI;
use std::fmt;

use blackbolt_core::{Easing, EffectRng, Tween, Viewport};
use serde::Deserialize;
use tracing::debug;

use crate::draw::{Color, DrawCommand, DrawList};
use crate::effect::{Effect, EffectCtx, SurfaceKind};

/// Timer tag of the completion callback. Burst timers use the letter index.
const COMPLETE_TAG: u32 = u32::MAX;

/// Letter burst timing and geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Letter size in pixels; also scales the fragments.
    pub letter_size: f32,
    /// Horizontal advance per letter as a fraction of the size.
    pub advance: f32,
    /// Delay before the first letter.
    pub start_delay_secs: f32,
    /// Delay between consecutive letters.
    pub stagger_secs: f32,
    /// Scale/opacity entrance duration.
    pub entrance_secs: f32,
    /// Duration of each half of the hop and the wobble.
    pub bounce_secs: f32,
    /// Delay from letter start to its fragment burst.
    pub fragment_delay_secs: f32,
    /// Triangles per burst.
    pub triangles: usize,
    /// Circles per burst.
    pub circles: usize,
    /// Fragment flight time.
    pub fragment_secs: f32,
    /// Completion fires this long after the last letter starts.
    pub complete_after_secs: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            letter_size: 60.0,
            advance: 0.6,
            start_delay_secs: 0.0,
            stagger_secs: 0.06,
            entrance_secs: 0.4,
            bounce_secs: 0.2,
            fragment_delay_secs: 0.15,
            triangles: 8,
            circles: 8,
            fragment_secs: 0.6,
            complete_after_secs: 0.5,
        }
    }
}

/// Transform of a letter at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterPose {
    /// Opacity, capped at 1.
    pub opacity: f32,
    /// Scale; overshoots above 1 during the entrance.
    pub scale: f32,
    /// Vertical offset (negative is up).
    pub offset_y: f32,
    /// Rotation in degrees.
    pub rotation_deg: f32,
}

impl LetterPose {
    /// Resting pose.
    pub const REST: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        offset_y: 0.0,
        rotation_deg: 0.0,
    };
}

#[derive(Debug, Clone, Copy)]
struct Letter {
    ch: char,
    center: (f32, f32),
    delay: f32,
    hop: f32,
    wobble: f32,
}

/// Entrance curve: ease-out with a sine overshoot over the first 70%.
#[must_use]
pub fn entrance_curve(t: f32) -> f32 {
    let ease = |x: f32| Easing::CubicOut.apply(x);
    if t < 0.7 {
        ease(t / 0.7) * (1.0 + 0.3 * (PI * t).sin())
    } else {
        ease(t)
    }
}

/// There and back: `0 -> peak` then `peak -> 0`, each half eased out.
fn there_and_back(peak: f32, delay: f32, half: f32, elapsed: f32) -> f32 {
    let out = Tween::new(0.0, peak, half).with_delay(delay).with_easing(Easing::CubicOut);
    if elapsed < out.end_time() {
        out.sample(elapsed)
    } else {
        Tween::new(peak, 0.0, half)
            .with_delay(out.end_time())
            .with_easing(Easing::CubicOut)
            .sample(elapsed)
    }
}

/// The letter burst effect.
pub struct BurstText {
    config: BurstConfig,
    color: Color,
    letters: Vec<Letter>,
    fragments: Vec<BurstFragment>,
    rng: EffectRng,
    elapsed: f32,
    on_complete: Option<Box<dyn FnOnce()>>,
    completed: bool,
}

impl fmt::Debug for BurstText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BurstText")
            .field("text", &self.text())
            .field("elapsed", &self.elapsed)
            .field("fragments", &self.fragments.len())
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl BurstText {
    /// Lays `text` out on one line starting at `origin` (top-left).
    #[must_use]
    pub fn new(text: &str, color: Color, origin: (f32, f32), config: BurstConfig, mut rng: EffectRng) -> Self {
        let size = config.letter_size;
        let step = size * config.advance;
        let letters: Vec<Letter> = text
            .chars()
            .enumerate()
            .map(|(i, ch)| Letter {
                ch,
                center: (origin.0 + step * (i as f32 + 0.5), origin.1 + size * 0.5),
                delay: config.start_delay_secs + config.stagger_secs * i as f32,
                hop: rng.range(0.5, 1.0) * size,
                wobble: rng.range(-50.0, 50.0),
            })
            .collect();
        let fragments = Vec::with_capacity(letters.len() * (config.triangles + config.circles));

        Self {
            config,
            color,
            letters,
            fragments,
            rng,
            elapsed: 0.0,
            on_complete: None,
            completed: false,
        }
    }

    /// Sets the callback run once the last letter has landed.
    #[must_use]
    pub fn with_on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// The text.
    #[must_use]
    pub fn text(&self) -> String {
        self.letters.iter().map(|l| l.ch).collect()
    }

    /// Number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// True for empty text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Local time since mount.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Start delay of letter `index`.
    #[must_use]
    pub fn letter_delay(&self, index: usize) -> Option<f32> {
        self.letters.get(index).map(|l| l.delay)
    }

    /// When the completion callback is due, relative to mount.
    #[must_use]
    pub fn completion_time(&self) -> f32 {
        let last = self.letters.last().map_or(self.config.start_delay_secs, |l| l.delay);
        last + self.config.complete_after_secs
    }

    /// Pose of letter `index` at the current time.
    #[must_use]
    pub fn pose(&self, index: usize) -> Option<LetterPose> {
        self.letters.get(index).map(|l| self.pose_of(l))
    }

    fn pose_of(&self, letter: &Letter) -> LetterPose {
        let t = self.elapsed;
        let v = Tween::new(0.0, 1.0, self.config.entrance_secs)
            .with_delay(letter.delay)
            .sample_with(t, entrance_curve);
        let half = self.config.bounce_secs;
        LetterPose {
            opacity: v.min(1.0),
            scale: v,
            offset_y: there_and_back(-letter.hop, letter.delay, half, t),
            rotation_deg: there_and_back(letter.wobble, letter.delay, half, t),
        }
    }

    /// Live fragments.
    #[must_use]
    pub fn fragments(&self) -> &[BurstFragment] {
        &self.fragments
    }

    /// True once the completion callback has run.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed
    }

    /// Advances local time and drops finished fragments.
    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
        let (now, flight) = (self.elapsed, self.config.fragment_secs);
        self.fragments.retain(|f| !f.is_done(now, flight));
    }

    /// Throws off the fragment ring of letter `index`.
    pub fn burst(&mut self, index: usize) -> usize {
        let Some(letter) = self.letters.get(index).copied() else {
            return 0;
        };
        let size = self.config.letter_size;
        let born = self.elapsed;
        for _ in 0..self.config.triangles {
            let fragment = BurstFragment::triangle(&mut self.rng, letter.center, size, self.color, born);
            self.fragments.push(fragment);
        }
        for _ in 0..self.config.circles {
            let fragment = BurstFragment::circle(&mut self.rng, letter.center, size, born);
            self.fragments.push(fragment);
        }
        self.config.triangles + self.config.circles
    }

    /// Runs the completion callback. Later calls do nothing.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
        debug!(letters = self.letters.len(), "letter burst complete");
        true
    }

    fn is_settled(&self) -> bool {
        self.completed
            && self.fragments.is_empty()
            && self
                .letters
                .iter()
                .all(|l| self.elapsed >= l.delay + self.config.entrance_secs.max(2.0 * self.config.bounce_secs))
    }
}

impl Effect for BurstText {
    fn name(&self) -> &'static str {
        "burst_text"
    }

    fn surface(&self) -> SurfaceKind {
        SurfaceKind::Dom
    }

    fn z_index(&self) -> i32 {
        10
    }

    fn mount(&mut self, ctx: &mut EffectCtx<'_>) {
        ctx.request_frame();
        for (index, letter) in self.letters.iter().enumerate() {
            ctx.set_timeout(letter.delay + self.config.fragment_delay_secs, index as u32);
        }
        ctx.set_timeout(self.completion_time(), COMPLETE_TAG);
    }

    fn frame(&mut self, dt: f32, ctx: &mut EffectCtx<'_>) {
        self.step(dt);
        if self.is_settled() {
            ctx.cancel_frame();
        }
    }

    fn timer(&mut self, tag: u32, _ctx: &mut EffectCtx<'_>) {
        if tag == COMPLETE_TAG {
            self.complete();
        } else {
            self.burst(tag as usize);
        }
    }

    fn resize(&mut self, _viewport: Viewport) {}

    fn draw(&self, list: &mut DrawList) {
        for letter in &self.letters {
            let pose = self.pose_of(letter);
            if pose.opacity <= 0.0 || letter.ch.is_whitespace() {
                continue;
            }
            list.push(DrawCommand::Glyph {
                ch: letter.ch,
                center: letter.center,
                size: self.config.letter_size,
                color: self.color,
                opacity: pose.opacity,
                scale: pose.scale,
                offset_y: pose.offset_y,
                rotation_deg: pose.rotation_deg,
            });
        }
        for fragment in &self.fragments {
            list.push(fragment.command(self.elapsed, self.config.fragment_secs));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn burst(text: &str) -> BurstText {
        BurstText::new(text, Color::WHITE, (0.0, 0.0), BurstConfig::default(), EffectRng::seeded(6))
    }

    #[test]
    fn test_entrance_curve_overshoots() {
        assert_eq!(entrance_curve(0.0), 0.0);
        assert!((entrance_curve(1.0) - 1.0).abs() < 1e-6);
        let peak = (0..100).map(|i| entrance_curve(i as f32 / 100.0)).fold(0.0_f32, f32::max);
        assert!(peak > 1.1, "peak {peak}");
    }

    #[test]
    fn test_stagger() {
        let b = burst("abc");
        assert_eq!(b.letter_delay(0), Some(0.0));
        assert!((b.letter_delay(2).unwrap_or_default() - 0.12).abs() < 1e-6);
        assert!((b.completion_time() - 0.62).abs() < 1e-6);
    }

    #[test]
    fn test_pose_before_and_after() {
        let mut b = burst("ab");
        let start = b.pose(1).unwrap_or(LetterPose::REST);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.scale, 0.0);

        b.step(0.06 + 0.2);
        let top = b.pose(1).unwrap_or(LetterPose::REST);
        assert!(top.offset_y <= -30.0 + 1e-3);

        b.step(1.0);
        let rest = b.pose(1).unwrap_or(LetterPose::REST);
        assert!((rest.scale - 1.0).abs() < 1e-5);
        assert_eq!(rest.opacity, 1.0);
        assert!(rest.offset_y.abs() < 1e-4);
        assert!(rest.rotation_deg.abs() < 1e-4);
    }

    #[test]
    fn test_opacity_capped_scale_overshoots() {
        let mut b = burst("a");
        b.step(0.14);
        let pose = b.pose(0).unwrap_or(LetterPose::REST);
        assert!(pose.scale > 1.0);
        assert_eq!(pose.opacity, 1.0);
    }

    #[test]
    fn test_burst_fragments_expire() {
        let mut b = burst("a");
        assert_eq!(b.burst(0), 16);
        assert_eq!(b.burst(9), 0);
        assert_eq!(b.fragments().len(), 16);
        b.step(0.59);
        assert_eq!(b.fragments().len(), 16);
        b.step(0.02);
        assert!(b.fragments().is_empty());
    }

    #[test]
    fn test_completion_runs_once() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut b = burst("hi").with_on_complete(move || seen.set(seen.get() + 1));
        assert!(b.complete());
        assert!(!b.complete());
        assert_eq!(count.get(), 1);
        assert!(b.is_complete());
    }
}
