//! # Site Error Types
//!
//! Everything that can fail while loading the page. Visual failures never
//! land here: a missing surface skips the effect, a broken image hides it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or assembling the page.
#[derive(Error, Debug)]
pub enum SiteError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`SiteConfig`](crate::SiteConfig).
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An effect id was mounted twice.
    #[error("effect already mounted: {0}")]
    DuplicateEffect(String),
}

/// Result type for site operations.
pub type SiteResult<T> = Result<T, SiteError>;
