//! The landing page: every effect built from one [`SiteConfig`] and mounted
//! on a [`Stage`].
//!
//! The carousel owns the writer half of the scan signal and the scanner the
//! reader half, so the scanner intensifies whenever a card crosses the scan
//! line. The hero wordmark burst reveals the call-to-action buttons when it
//! completes.

use std::cell::Cell;
use std::rc::Rc;

use blackbolt_core::{scan_channel, EffectRng, Viewport};
use blackbolt_fx::{
    AmbientDrift, BeamField, BurstText, Carousel, Color, DrawList, InputEvent, Scanner, SurfaceKind,
};
use tracing::info;

use crate::config::{CtaButton, HeroConfig, SiteConfig};
use crate::error::SiteResult;
use crate::stage::{MountOutcome, Stage};

/// Stage id of the ambient drift.
pub const AMBIENT: &str = "ambient";
/// Stage id of the beam field.
pub const BEAMS: &str = "beams";
/// Stage id of the hero wordmark burst.
pub const HERO_BURST: &str = "hero-burst";
/// Stage id of the carousel.
pub const CAROUSEL: &str = "carousel";
/// Stage id of the scanner.
pub const SCANNER: &str = "scanner";

/// The assembled landing page.
#[derive(Debug)]
pub struct Page {
    stage: Stage,
    hero: HeroConfig,
    hero_complete: Rc<Cell<bool>>,
}

impl Page {
    /// Builds the page with every surface available.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn from_config(config: &SiteConfig) -> SiteResult<Self> {
        Self::with_surfaces(config, &[SurfaceKind::Webgl, SurfaceKind::Canvas2d])
    }

    /// Builds the page with only `surfaces` available. Effects whose surface
    /// is missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn with_surfaces(config: &SiteConfig, surfaces: &[SurfaceKind]) -> SiteResult<Self> {
        config.validate()?;

        let viewport = config.viewport();
        let mut rng = config.seed.map_or_else(EffectRng::from_clock, EffectRng::seeded);
        let mut stage = Stage::with_surfaces(viewport, surfaces);
        let hero_complete = Rc::new(Cell::new(false));

        stage.mount(
            AMBIENT,
            Box::new(AmbientDrift::new(config.ambient.clone(), viewport, rng.fork())),
        )?;
        stage.mount(BEAMS, Box::new(BeamField::new(config.beams.clone(), viewport, rng.fork())))?;

        let burst = hero_burst(&config.hero, viewport, rng.fork(), Rc::clone(&hero_complete));
        if stage.mount(HERO_BURST, Box::new(burst))? == MountOutcome::Skipped {
            hero_complete.set(true);
        }

        let (writer, reader) = scan_channel();
        stage.mount(
            SCANNER,
            Box::new(Scanner::new(config.scanner.clone(), viewport, reader, rng.fork())),
        )?;
        stage.mount(
            CAROUSEL,
            Box::new(Carousel::new(config.carousel.clone(), viewport, writer, rng.fork())),
        )?;

        info!("Page ready with {} effects at {}x{}", stage.len(), viewport.width, viewport.height);
        Ok(Self {
            stage,
            hero: config.hero.clone(),
            hero_complete,
        })
    }

    /// Advances the page by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.stage.tick(dt);
    }

    /// Forwards pointer, wheel and image events.
    pub fn input(&mut self, event: &InputEvent) {
        self.stage.input(event);
    }

    /// Applies a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.stage.resize(viewport);
    }

    /// Builds this frame's draw list.
    pub fn draw(&mut self) -> &DrawList {
        self.stage.draw()
    }

    /// True once the wordmark has landed.
    #[must_use]
    pub fn is_hero_complete(&self) -> bool {
        self.hero_complete.get()
    }

    /// Buttons to show: none until the wordmark lands.
    #[must_use]
    pub fn visible_ctas(&self) -> &[CtaButton] {
        if self.is_hero_complete() {
            &self.hero.cta_buttons
        } else {
            &[]
        }
    }

    /// Hero copy.
    #[must_use]
    pub fn hero(&self) -> &HeroConfig {
        &self.hero
    }

    /// The underlying stage.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable access to the stage, for mounting extra effects.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Unmounts every effect.
    pub fn teardown(&mut self) {
        self.stage.unmount_all();
    }
}

/// Wordmark centred horizontally in the upper third of the viewport.
fn hero_burst(hero: &HeroConfig, viewport: Viewport, rng: EffectRng, done: Rc<Cell<bool>>) -> BurstText {
    let text = if hero.wordmark.trim().is_empty() {
        hero.title.as_str()
    } else {
        hero.wordmark.as_str()
    };
    let burst = &hero.burst;
    let width = text.chars().count() as f32 * burst.letter_size * burst.advance;
    let origin = (
        (viewport.width - width) * 0.5,
        viewport.height / 3.0 - burst.letter_size * 0.5,
    );
    BurstText::new(text, Color::WHITE, origin, burst.clone(), rng).with_on_complete(move || {
        done.set(true);
        info!("Hero wordmark landed, revealing call to action");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SiteConfig {
        SiteConfig {
            seed: Some(11),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_every_effect_mounts() {
        let page = Page::from_config(&seeded()).unwrap();
        let ids: Vec<&str> = page.stage().ids().collect();
        assert_eq!(ids, [AMBIENT, BEAMS, CAROUSEL, HERO_BURST, SCANNER]);
    }

    #[test]
    fn test_no_canvas_skips_scanner_and_ambient() {
        let page = Page::with_surfaces(&seeded(), &[]).unwrap();
        assert!(!page.stage().is_mounted(SCANNER));
        assert!(!page.stage().is_mounted(AMBIENT));
        assert!(page.stage().is_mounted(CAROUSEL));
        assert_eq!(page.stage().stats().skipped, 2);
    }

    #[test]
    fn test_ctas_hidden_until_wordmark_lands() {
        let mut page = Page::from_config(&seeded()).unwrap();
        assert!(page.visible_ctas().is_empty());
        for _ in 0..(60 * 2) {
            page.tick(1.0 / 60.0);
        }
        assert!(page.is_hero_complete());
        assert_eq!(page.visible_ctas().len(), 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = seeded();
        config.scanner.smoothing = 0.0;
        assert!(Page::from_config(&config).is_err());
    }
}
