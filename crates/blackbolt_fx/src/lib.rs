//! # Blackbolt FX
//!
//! The visual effects of the Blackbolt landing page. Every effect is plain
//! simulation state plus a [`draw`](Effect::draw) method that turns that
//! state into [`DrawCommand`]s; no effect touches a real surface.
//!
//! ## Effects
//!
//! | Effect | Surface | Loop |
//! |--------|---------|------|
//! | [`AmbientDrift`] | WebGL points | frame |
//! | [`Scanner`] | 2D canvas | frame, reads the scan signal |
//! | [`Carousel`] | DOM | frame + ASCII refresh interval, writes the scan signal |
//! | [`BeamField`] | DOM | frame + collision poll + cooldown timeouts |
//! | [`BurstText`] | DOM + SVG | frame + per-letter timeouts |
//!
//! ## Architecture
//!
//! ```text
//! host ──► Effect::frame / Effect::timer ──► simulation state
//!                                                  │
//! host ◄── DrawList ◄──────── Effect::draw ◄───────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ambient;
pub mod beams;
pub mod burst;
pub mod carousel;
pub mod draw;
pub mod effect;
pub mod instance;
pub mod intensity;
pub mod particle;
pub mod scanner;

pub use ambient::{AmbientConfig, AmbientDrift};
pub use beams::{BeamConfig, BeamField, BeamSpec};
pub use burst::{BurstConfig, BurstText, LetterPose};
pub use carousel::{Carousel, CarouselConfig, CarouselItem, ClipPair, ScrollController, ScrollPhase};
pub use draw::{BlendMode, Color, DrawCommand, DrawList};
pub use effect::{Effect, EffectCtx, InputEvent, SurfaceKind};
pub use instance::SpriteInstance;
pub use intensity::{IntensityBlend, IntensityPreset};
pub use particle::Particle;
pub use scanner::{Scanner, ScannerConfig, ScannerStats};
