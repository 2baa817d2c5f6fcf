//! Error types for the codec crate

use levelz_core::LevelzError;

/// Codec-specific error types
///
/// Every parse or export failure is immediately fatal for the call;
/// there is no partial level and no skip-and-continue behavior.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// File I/O error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// A mandatory header key (`type` or `spawn`) is absent
    #[error("Missing required header: @{0}")]
    MissingHeader(String),

    /// Malformed header line
    #[error("Invalid header line: {0}")]
    InvalidHeader(String),

    /// Body line missing its block/point separator
    #[error("Invalid body line: {0}")]
    MalformedLine(String),

    /// Malformed block literal or property pair
    #[error("Invalid block literal: {0}")]
    MalformedBlock(String),

    /// Weighted group probabilities exceeding 1.0
    #[error("Block probabilities exceed 1.0, found {0}")]
    WeightOverflow(f64),

    /// Weighted draw that selected no entry
    #[error("No block selected from weighted group: {0}")]
    NoBlockSelected(String),

    /// Model-level validation failure (malformed point, inverted
    /// bounds, dimension mismatch, unknown dimension or scroll)
    #[error(transparent)]
    Model(#[from] LevelzError),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, ParseError>;
