//! # Site Configuration
//!
//! One TOML file describes the whole page. Every section has defaults that
//! reproduce the shipped landing page, so a partial file only overrides what
//! it names:
//!
//! ```toml
//! seed = 7
//!
//! [viewport]
//! width = 1280
//! height = 720
//!
//! [carousel]
//! card_count = 12
//!
//! [[beams.beams]]
//! x = 120
//! duration = 4.0
//! ```
//!
//! Loading never validates implicitly; call [`SiteConfig::validate`] before
//! building a [`Page`](crate::Page).

use std::path::Path;

use blackbolt_core::Viewport;
use blackbolt_fx::{AmbientConfig, BeamConfig, BurstConfig, CarouselConfig, ScannerConfig};
use serde::Deserialize;

use crate::error::{SiteError, SiteResult};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Initial viewport.
    pub viewport: ViewportConfig,
    /// Hero copy and the wordmark burst.
    pub hero: HeroConfig,
    /// Card carousel.
    pub carousel: CarouselConfig,
    /// Scanner light bar and particle stream.
    pub scanner: ScannerConfig,
    /// Ambient background drift.
    pub ambient: AmbientConfig,
    /// Falling beams.
    pub beams: BeamConfig,
}

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            width: viewport.width,
            height: viewport.height,
        }
    }
}

impl From<ViewportConfig> for Viewport {
    fn from(config: ViewportConfig) -> Self {
        Viewport::new(config.width, config.height)
    }
}

/// A call-to-action button.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CtaButton {
    /// Label.
    pub text: String,
    /// Link target.
    #[serde(default)]
    pub href: Option<String>,
    /// Rendered as the primary button.
    #[serde(default)]
    pub primary: bool,
}

/// Hero section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Text played by the letter burst.
    pub wordmark: String,
    /// Headline, shown when there is no cycling prefix.
    pub title: String,
    /// Headline prefix followed by one of the cycling words.
    pub title_prefix: Option<String>,
    /// Words cycled after the prefix.
    pub cycling_words: Vec<String>,
    /// Paragraph under the headline.
    pub description: String,
    /// Badge text.
    pub badge_text: String,
    /// Badge label.
    pub badge_label: String,
    /// Buttons revealed when the wordmark lands.
    pub cta_buttons: Vec<CtaButton>,
    /// Short bullet points under the buttons.
    pub micro_details: Vec<String>,
    /// Letter burst timing.
    pub burst: BurstConfig,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            wordmark: "BLACKBOLT".to_owned(),
            title: "An experiment in light, motion, and the quiet chaos between.".to_owned(),
            title_prefix: None,
            cycling_words: Vec::new(),
            description: "Experience a new dimension of interaction. Fluid, tactile, and alive.".to_owned(),
            badge_text: "Particle Engine".to_owned(),
            badge_label: "Experience".to_owned(),
            cta_buttons: vec![
                CtaButton {
                    text: "Explore the Canvas".to_owned(),
                    href: Some("#explore".to_owned()),
                    primary: true,
                },
                CtaButton {
                    text: "Learn More".to_owned(),
                    href: Some("#learn-more".to_owned()),
                    primary: false,
                },
            ],
            micro_details: vec![
                "Immersive shader landscapes".to_owned(),
                "Hand-tuned motion easing".to_owned(),
                "Responsive, tactile feedback".to_owned(),
            ],
            burst: BurstConfig::default(),
        }
    }
}

impl HeroConfig {
    /// True when the headline is a prefix plus cycling words.
    #[must_use]
    pub fn has_cycling_title(&self) -> bool {
        self.title_prefix.as_deref().is_some_and(|p| !p.is_empty()) && !self.cycling_words.is_empty()
    }

    /// The primary button, if any.
    #[must_use]
    pub fn primary_cta(&self) -> Option<&CtaButton> {
        self.cta_buttons.iter().find(|b| b.primary)
    }
}

impl SiteConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Parse`] if the document is malformed.
    pub fn from_toml_str(text: &str) -> SiteResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Io`] if the file cannot be read and
    /// [`SiteError::Parse`] if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> SiteResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Initial viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport.into()
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> SiteResult<()> {
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;

        if self.hero.wordmark.trim().is_empty() && self.hero.title.trim().is_empty() {
            return Err(invalid("hero.title and hero.wordmark are both empty"));
        }
        if self.hero.cta_buttons.iter().filter(|b| b.primary).count() > 1 {
            return Err(invalid("hero.cta_buttons: at most one button may be primary"));
        }
        positive("hero.burst.letter_size", self.hero.burst.letter_size)?;
        non_negative("hero.burst.stagger_secs", self.hero.burst.stagger_secs)?;
        positive("hero.burst.entrance_secs", self.hero.burst.entrance_secs)?;

        let c = &self.carousel;
        if c.card_count == 0 {
            return Err(invalid("carousel.card_count must be at least 1"));
        }
        positive("carousel.card_width", c.card_width)?;
        positive("carousel.card_height", c.card_height)?;
        non_negative("carousel.gap", c.gap)?;
        positive("carousel.min_velocity", c.min_velocity)?;
        if c.default_velocity < c.min_velocity {
            return Err(invalid("carousel.default_velocity is below carousel.min_velocity"));
        }
        open_unit("carousel.decay", c.decay)?;
        positive("carousel.scan_line_width", c.scan_line_width)?;
        positive("carousel.max_dt", c.max_dt)?;
        positive("carousel.ascii_refresh_secs", c.ascii_refresh_secs)?;

        let s = &self.scanner;
        positive("scanner.height", s.height)?;
        positive("scanner.light_bar_width", s.light_bar_width)?;
        if !(s.smoothing > 0.0 && s.smoothing <= 1.0) {
            return Err(invalid(format!("scanner.smoothing must be in (0, 1], got {}", s.smoothing)));
        }
        if s.scan_max_particles < s.base_max_particles {
            return Err(invalid("scanner.scan_max_particles is below scanner.base_max_particles"));
        }
        if s.trim_batch == 0 {
            return Err(invalid("scanner.trim_batch must be at least 1"));
        }

        let a = &self.ambient;
        positive("ambient.band_height", a.band_height)?;
        if a.speed_min > a.speed_max {
            return Err(invalid("ambient.speed_min is above ambient.speed_max"));
        }

        let b = &self.beams;
        positive("beams.poll_secs", b.poll_secs)?;
        non_negative("beams.cooldown_secs", b.cooldown_secs)?;
        for (i, beam) in b.beams.iter().enumerate() {
            positive(&format!("beams.beams[{i}].duration"), beam.duration)?;
            non_negative(&format!("beams.beams[{i}].repeat_delay"), beam.repeat_delay)?;
            non_negative(&format!("beams.beams[{i}].delay"), beam.delay)?;
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> SiteError {
    SiteError::InvalidConfig(message.into())
}

fn positive(field: &str, value: f32) -> SiteResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be positive, got {value}")))
    }
}

fn non_negative(field: &str, value: f32) -> SiteResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{field} must not be negative, got {value}")))
    }
}

fn open_unit(field: &str, value: f32) -> SiteResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be in (0, 1), got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_the_default_page() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.carousel.card_count, 30);
        assert_eq!(config.scanner.scan_max_particles, 2_500);
        assert_eq!(config.beams.beams.len(), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
            seed = 7

            [viewport]
            width = 1280

            [carousel]
            card_count = 12

            [[beams.beams]]
            x = 120
            duration = 4.0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.viewport().width, 1280.0);
        assert_eq!(config.viewport().height, 900.0);
        assert_eq!(config.carousel.card_count, 12);
        assert_eq!(config.carousel.card_width, 400.0);
        assert_eq!(config.beams.beams.len(), 1);
        assert_eq!(config.beams.beams[0].height, 64.0);
        assert_eq!(config.beams.beams[0].repeat_delay, 0.0);
        assert_eq!(config.beams.cooldown_secs, 2.0);
    }

    #[test]
    fn test_hero_buttons() {
        let config = SiteConfig::from_toml_str(
            r#"
            [hero]
            title_prefix = "Consultants who build, not just "
            cycling_words = ["advise", "talk"]

            [[hero.cta_buttons]]
            text = "Book a call"
            primary = true
            "#,
        )
        .unwrap();

        assert!(config.hero.has_cycling_title());
        assert_eq!(config.hero.cta_buttons.len(), 1);
        assert_eq!(config.hero.primary_cta().map(|b| b.text.as_str()), Some("Book a call"));
        assert_eq!(config.hero.cta_buttons[0].href, None);
        assert_eq!(config.hero.wordmark, "BLACKBOLT");
    }

    #[test]
    fn test_malformed_toml() {
        let err = SiteConfig::from_toml_str("[carousel\ncard_count = 3").unwrap_err();
        assert!(matches!(err, SiteError::Parse(_)));
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let err = SiteConfig::from_toml_str("[scanner]\nsmoothing = \"fast\"").unwrap_err();
        assert!(matches!(err, SiteError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SiteConfig::from_path("/definitely/not/here/site.toml").unwrap_err();
        match err {
            SiteError::Io { path, .. } => assert!(path.ends_with("site.toml")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases: [(&str, &str); 6] = [
            ("[scanner]\nsmoothing = 0.0", "scanner.smoothing"),
            ("[scanner]\nsmoothing = 1.5", "scanner.smoothing"),
            ("[carousel]\nmin_velocity = 0.0", "carousel.min_velocity"),
            ("[carousel]\ndecay = 1.0", "carousel.decay"),
            ("[viewport]\nwidth = -5", "viewport.width"),
            ("[[beams.beams]]\nx = 1\nduration = 0", "beams.beams[0].duration"),
        ];
        for (text, field) in cases {
            let config = SiteConfig::from_toml_str(text).unwrap();
            match config.validate() {
                Err(SiteError::InvalidConfig(message)) => {
                    assert!(message.contains(field), "{message} should name {field}");
                }
                other => panic!("{text}: expected invalid config, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_rejects_two_primary_buttons() {
        let mut config = SiteConfig::default();
        for button in &mut config.hero.cta_buttons {
            button.primary = true;
        }
        assert!(matches!(config.validate(), Err(SiteError::InvalidConfig(_))));
    }
}
