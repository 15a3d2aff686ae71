//! Error types for LumiWeight

use thiserror::Error;

/// LumiWeight error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid sample, collection, or catalog configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Effective luminosity was zero or negative at weighting time.
    ///
    /// Construction-time validation makes this unreachable for samples
    /// built through the public constructors; it exists so the weight
    /// computation never divides by zero silently.
    #[error("degenerate effective luminosity {value} for '{name}'")]
    DegenerateLuminosity {
        /// Name of the offending sample or collection.
        name: String,
        /// The non-positive effective luminosity that was computed.
        value: f64,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
