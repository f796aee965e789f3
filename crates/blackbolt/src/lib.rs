//! # Blackbolt
//!
//! Host for the landing page effects:
//!
//! - [`SiteConfig`]: TOML configuration with defaults for every effect
//! - [`Stage`]: mounts effects against a frame scheduler, routes input,
//!   collects draw commands in z-order, cancels everything on unmount
//! - [`Page`]: the landing page assembled from a [`SiteConfig`]
//!
//! ## Example
//!
//! ```rust
//! use blackbolt::{Page, SiteConfig};
//!
//! let config = SiteConfig::from_toml_str("seed = 3").unwrap();
//! let mut page = Page::from_config(&config).unwrap();
//! for _ in 0..60 {
//!     page.tick(1.0 / 60.0);
//! }
//! assert!(!page.draw().is_empty());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod page;
pub mod stage;

pub use config::{CtaButton, HeroConfig, SiteConfig, ViewportConfig};
pub use error::{SiteError, SiteResult};
pub use page::Page;
pub use stage::{MountOutcome, Stage, StageStats};
