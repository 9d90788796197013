//! Error types for the det-review library.

use thiserror::Error;

/// Result type for det-review operations.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Error types raised by the loading and configuration surfaces.
///
/// Evaluation and geometry editing never fail; only reading files,
/// decoding XML/JSON and validating configuration can.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while decoding a Pascal VOC XML document.
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::DeError),

    /// Invalid annotation data.
    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    /// Invalid IoU threshold.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Configuration value outside its accepted range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Error raised while building a DataFrame.
    #[cfg(feature = "polars")]
    #[error("Polars error: {0}")]
    PolarsError(#[from] polars::prelude::PolarsError),
}
