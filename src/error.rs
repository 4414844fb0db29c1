//! Error type shared by configuration loading, asset loading and the
//! evolutionary driver.

use thiserror::Error;

/// Errors surfaced by the crate.
///
/// Inside a running episode nothing fails: eliminations are expected outcomes
/// and never travel through this type.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or genome file was not valid JSON for its schema.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration parsed but holds values the simulation cannot use.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A sprite image could not be loaded or decoded.
    #[error("failed to load asset {path}: {reason}")]
    Asset {
        /// Path of the offending file.
        path: String,
        /// Loader message.
        reason: String,
    },

    /// Every species went stagnant and the population may not be re-seeded.
    #[error("complete extinction at generation {generation}")]
    CompleteExtinction {
        /// Generation in which the last species was removed.
        generation: u32,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
