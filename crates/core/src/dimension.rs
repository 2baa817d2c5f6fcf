//! Dimension and scroll direction types

use crate::{Coordinate, Coordinate2D, Coordinate3D, LevelzError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The dimension of a level and its coordinates.
///
/// Carried numerically in the `@type` header as `2` or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// A 2D plane
    Two,
    /// A 3D space
    Three,
}

impl Dimension {
    /// Numeric code used by the `@type` header.
    pub const fn code(self) -> u8 {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    pub const fn is_2d(self) -> bool {
        matches!(self, Dimension::Two)
    }

    pub const fn is_3d(self) -> bool {
        matches!(self, Dimension::Three)
    }

    /// The origin coordinate for this dimension, used to resolve the
    /// `default` spawn value.
    pub const fn default_coordinate(self) -> Coordinate {
        match self {
            Dimension::Two => Coordinate::TwoD(Coordinate2D::ZERO),
            Dimension::Three => Coordinate::ThreeD(Coordinate3D::ZERO),
        }
    }

    /// Parse the `@type` header value. Only `2` and `3` are valid.
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().parse::<i64>() {
            Ok(2) => Ok(Dimension::Two),
            Ok(3) => Ok(Dimension::Three),
            _ => Err(LevelzError::UnknownDimension(code.trim().to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Two => write!(f, "2D"),
            Dimension::Three => write!(f, "3D"),
        }
    }
}

/// Camera scroll direction metadata for 2D levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scroll {
    #[default]
    None,
    HorizontalLeft,
    HorizontalRight,
    VerticalUp,
    VerticalDown,
}

impl FromStr for Scroll {
    type Err = LevelzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "none" => Ok(Scroll::None),
            "horizontal-left" => Ok(Scroll::HorizontalLeft),
            "horizontal-right" => Ok(Scroll::HorizontalRight),
            "vertical-up" => Ok(Scroll::VerticalUp),
            "vertical-down" => Ok(Scroll::VerticalDown),
            other => Err(LevelzError::UnknownScroll(other.to_string())),
        }
    }
}

impl fmt::Display for Scroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Scroll::None => "none",
            Scroll::HorizontalLeft => "horizontal-left",
            Scroll::HorizontalRight => "horizontal-right",
            Scroll::VerticalUp => "vertical-up",
            Scroll::VerticalDown => "vertical-down",
        };
        write!(f, "{}", text)
    }
}
