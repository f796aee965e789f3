//! # Carousel
//!
//! An endless strip of cards scrolling under a fixed scan line at the
//! viewport centre. Cards left of the line show their ASCII side, cards
//! right of it their image, and the card under the line shows both split
//! at the line.
//!
//! The carousel is the only writer of the scan signal: after every
//! position change it publishes whether any card overlaps the line.

mod ascii;
mod clip;
mod controller;

pub use ascii::AsciiArt;
pub use clip::{clip_against, ClipPair};
pub use controller::{Release, ScrollController, ScrollPhase, ScrollTuning};

use blackbolt_core::{EffectRng, Rect, ScanWriter, Viewport};
use serde::Deserialize;
use tracing::debug;

use crate::draw::{CardLayer, DrawCommand, DrawList};
use crate::effect::{Effect, EffectCtx, InputEvent, SurfaceKind};

/// Timer tag for the ASCII refresh interval.
const ASCII_REFRESH_TAG: u32 = 0;

/// Carousel parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Number of cards in the strip.
    pub card_count: usize,
    /// Card width.
    pub card_width: f32,
    /// Card height.
    pub card_height: f32,
    /// Gap between cards.
    pub gap: f32,
    /// Top edge of the card row.
    pub band_top: f32,
    /// Autoscroll velocity at mount and after a slow release (px/s).
    pub default_velocity: f32,
    /// Velocity floor (px/s).
    pub min_velocity: f32,
    /// Per-frame velocity multiplier.
    pub decay: f32,
    /// Release speed needed for a fling (px/s).
    pub release_threshold: f32,
    /// Position nudge per wheel event.
    pub wheel_step: f32,
    /// Width of the scan line.
    pub scan_line_width: f32,
    /// Largest frame delta honoured (s).
    pub max_dt: f32,
    /// Seconds between ASCII refresh passes.
    pub ascii_refresh_secs: f32,
    /// Chance each card regenerates on a refresh pass.
    pub ascii_refresh_chance: f32,
    /// Number of cached ASCII variants assigned at mount.
    pub ascii_variants: usize,
    /// ASCII font size.
    pub font_size: f32,
    /// ASCII line height.
    pub line_height: f32,
    /// Image paths, assigned round-robin.
    pub images: Vec<String>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_count: 30,
            card_width: 400.0,
            card_height: 250.0,
            gap: 60.0,
            band_top: 85.0,
            default_velocity: 120.0,
            min_velocity: 30.0,
            decay: 0.999,
            release_threshold: 30.0,
            wheel_step: 20.0,
            scan_line_width: 8.0,
            max_dt: 0.05,
            ascii_refresh_secs: 0.2,
            ascii_refresh_chance: 0.15,
            ascii_variants: 5,
            font_size: 11.0,
            line_height: 13.0,
            images: (1..=5).map(|i| format!("assets/cards/card-{i:02}.webp")).collect(),
        }
    }
}

impl CarouselConfig {
    /// Width of the whole strip: `card_count * (card_width + gap)`.
    #[must_use]
    pub fn track_width(&self) -> f32 {
        self.card_count as f32 * (self.card_width + self.gap)
    }

    /// Controller tuning derived from these parameters.
    #[must_use]
    pub fn tuning(&self) -> ScrollTuning {
        ScrollTuning {
            default_velocity: self.default_velocity,
            min_velocity: self.min_velocity,
            decay: self.decay,
            release_threshold: self.release_threshold,
            wheel_step: self.wheel_step,
            max_dt: self.max_dt,
            ..ScrollTuning::default()
        }
    }
}

/// One card in the strip.
#[derive(Debug, Clone)]
pub struct CarouselItem {
    /// Position in the strip.
    pub index: usize,
    /// ASCII side.
    pub ascii: AsciiArt,
    /// Image path.
    pub image: String,
    /// False once the image failed to load.
    pub image_visible: bool,
    /// Clip percentages from the last position update.
    pub clip: ClipPair,
}

/// The carousel effect.
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    controller: ScrollController,
    items: Vec<CarouselItem>,
    scan_line: Rect,
    viewport: Viewport,
    signal: ScanWriter,
    rng: EffectRng,
    scanning: bool,
}

impl Carousel {
    /// Builds the strip with the scan line at the viewport centre.
    #[must_use]
    pub fn new(config: CarouselConfig, viewport: Viewport, signal: ScanWriter, mut rng: EffectRng) -> Self {
        let (cols, rows) =
            AsciiArt::dimensions(config.card_width, config.card_height, config.font_size, config.line_height);
        let variants: Vec<AsciiArt> = (0..config.ascii_variants.max(1))
            .map(|_| AsciiArt::generate(cols, rows, &mut rng))
            .collect();

        let items = (0..config.card_count)
            .map(|index| CarouselItem {
                index,
                ascii: variants[index % variants.len()].clone(),
                image: if config.images.is_empty() {
                    String::new()
                } else {
                    config.images[index % config.images.len()].clone()
                },
                image_visible: !config.images.is_empty(),
                clip: ClipPair::IMAGE,
            })
            .collect();

        let controller = ScrollController::new(config.tuning(), viewport.width, config.track_width());
        let mut carousel = Self {
            scan_line: scan_line_for(&config, viewport),
            config,
            controller,
            items,
            viewport,
            signal,
            rng,
            scanning: false,
        };
        carousel.update_clips();
        carousel
    }

    /// Advances autoscroll by one frame and reclips.
    pub fn step(&mut self, dt: f32) {
        self.controller.step(dt);
        self.update_clips();
    }

    /// Recomputes every card's clip and publishes the scan flag.
    pub fn update_clips(&mut self) {
        let stride = self.config.card_width + self.config.gap;
        let origin = self.controller.position();
        let mut any = false;
        for item in &mut self.items {
            let rect = Rect::new(
                origin + item.index as f32 * stride,
                self.config.band_top,
                self.config.card_width,
                self.config.card_height,
            );
            let (clip, hit) = clip_against(&rect, &self.scan_line);
            item.clip = clip;
            any |= hit;
        }
        self.scanning = any;
        self.signal.publish(any);
    }

    /// Regenerates a random subset of ASCII backs.
    pub fn refresh_ascii(&mut self) -> usize {
        let mut refreshed = 0;
        for item in &mut self.items {
            if self.rng.chance(self.config.ascii_refresh_chance) {
                item.ascii.regenerate(&mut self.rng);
                refreshed += 1;
            }
        }
        refreshed
    }

    /// Screen rectangle of card `index`.
    #[must_use]
    pub fn card_rect(&self, index: usize) -> Rect {
        let stride = self.config.card_width + self.config.gap;
        Rect::new(
            self.controller.position() + index as f32 * stride,
            self.config.band_top,
            self.config.card_width,
            self.config.card_height,
        )
    }

    /// Full-width strip the cards travel in. Drags only start inside it.
    #[must_use]
    pub fn band(&self) -> Rect {
        Rect::new(0.0, self.config.band_top, self.viewport.width, self.config.card_height)
    }

    /// Cards.
    #[must_use]
    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    /// Scroll state.
    #[must_use]
    pub const fn controller(&self) -> &ScrollController {
        &self.controller
    }

    /// Mutable scroll state.
    pub fn controller_mut(&mut self) -> &mut ScrollController {
        &mut self.controller
    }

    /// Scan line rectangle.
    #[must_use]
    pub const fn scan_line(&self) -> Rect {
        self.scan_line
    }

    /// True when a card overlapped the scan line at the last update.
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Parameters.
    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }
}

fn scan_line_for(config: &CarouselConfig, viewport: Viewport) -> Rect {
    Rect::centered(
        viewport.center_x(),
        config.band_top + config.card_height * 0.5,
        config.scan_line_width,
        config.card_height,
    )
}

impl Effect for Carousel {
    fn name(&self) -> &'static str {
        "carousel"
    }

    fn surface(&self) -> SurfaceKind {
        SurfaceKind::Dom
    }

    fn z_index(&self) -> i32 {
        5
    }

    fn mount(&mut self, ctx: &mut EffectCtx<'_>) {
        ctx.request_frame();
        ctx.set_interval(self.config.ascii_refresh_secs, ASCII_REFRESH_TAG);
    }

    fn frame(&mut self, dt: f32, _ctx: &mut EffectCtx<'_>) {
        self.step(dt);
    }

    fn timer(&mut self, tag: u32, _ctx: &mut EffectCtx<'_>) {
        if tag == ASCII_REFRESH_TAG {
            self.refresh_ascii();
        }
    }

    fn input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                if self.band().contains(x, y) {
                    self.controller.pointer_down(x);
                }
            }
            InputEvent::PointerMove { x, .. } => {
                if self.controller.pointer_move(x) {
                    self.update_clips();
                }
            }
            InputEvent::PointerUp => match self.controller.pointer_up() {
                Release::Fling { velocity, direction } => {
                    debug!(velocity, direction, "carousel fling");
                }
                Release::Reset => debug!("carousel release below threshold, autoscroll reset"),
                Release::Ignored => {}
            },
            InputEvent::Wheel { delta_y } => {
                self.controller.wheel(delta_y);
                self.update_clips();
            }
            InputEvent::ImageFailed { card } => {
                if let Some(item) = self.items.get_mut(card) {
                    item.image_visible = false;
                    debug!(card, image = %item.image, "card image failed, hiding");
                }
            }
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.controller.set_container_width(viewport.width);
        self.scan_line = scan_line_for(&self.config, viewport);
    }

    fn draw(&self, list: &mut DrawList) {
        for item in &self.items {
            let bounds = self.card_rect(item.index);
            if bounds.right() <= 0.0 || bounds.x >= self.viewport.width {
                continue;
            }
            if item.clip.left > 0.0 {
                list.push(DrawCommand::CardLayer {
                    card: item.index,
                    layer: CardLayer::Ascii,
                    bounds,
                    clip: item.clip.ascii_inset(),
                });
            }
            if item.image_visible && item.clip.right < 100.0 {
                list.push(DrawCommand::CardLayer {
                    card: item.index,
                    layer: CardLayer::Image,
                    bounds,
                    clip: item.clip.image_inset(),
                });
            }
        }
    }
}
