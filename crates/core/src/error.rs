//! Core error types for the LevelZ model

use crate::Dimension;

#[derive(thiserror::Error, Debug)]
pub enum LevelzError {
    #[error("Malformed point: {0}")]
    MalformedPoint(String),

    #[error("Inverted {axis} bounds: {min} > {max}")]
    InvalidBounds { axis: char, min: i32, max: i32 },

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: Dimension,
        found: Dimension,
    },

    #[error("Unrecognized dimension code: {0}")]
    UnknownDimension(String),

    #[error("Unrecognized scroll direction: {0}")]
    UnknownScroll(String),
}

pub type Result<T> = std::result::Result<T, LevelzError>;
