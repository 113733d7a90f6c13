//! Error types for the stock return regression pipeline

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied parameter is out of range or inconsistent
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A price value violates the strictly-positive invariant
    #[error("non-positive price {value} at index {index}")]
    NonPositivePrice { index: usize, value: f64 },

    /// A return value is NaN or infinite
    #[error("non-finite return at index {index}")]
    NonFiniteReturn { index: usize },

    /// Not enough data left to perform the requested operation
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Failed to parse a field while loading data
    #[error("failed to parse data: {0}")]
    Parse(String),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an `InvalidParameter` error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }
}
