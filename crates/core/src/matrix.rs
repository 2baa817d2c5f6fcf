//! Rectangular coordinate ranges
//!
//! A coordinate matrix is an integer range per axis plus an origin,
//! expanding to the Cartesian product of the ranges offset by the
//! origin. Its text form is `(x1, x2, y1, y2[, z1, z2])^origin`.

use crate::{Coordinate, Coordinate2D, Coordinate3D, Dimension, LevelzError, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parses the parenthesized bound tuple of a matrix literal.
fn parse_bounds(s: &str, source: &str) -> Result<Vec<i32>> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .collect();

    cleaned
        .split(',')
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<i32>()
                .map_err(|_| LevelzError::MalformedPoint(source.trim().to_string()))
        })
        .collect()
}

/// Sorts a bound pair so swapped endpoints normalize to (min, max).
fn normalize(a: i32, b: i32) -> (i32, i32) {
    (a.min(b), a.max(b))
}

/// A 2D matrix of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateMatrix2D {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
    origin: Coordinate2D,
}

impl CoordinateMatrix2D {
    pub fn new(
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
        origin: Coordinate2D,
    ) -> Result<Self> {
        if min_x > max_x {
            return Err(LevelzError::InvalidBounds {
                axis: 'x',
                min: min_x,
                max: max_x,
            });
        }
        if min_y > max_y {
            return Err(LevelzError::InvalidBounds {
                axis: 'y',
                min: min_y,
                max: max_y,
            });
        }

        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
            origin,
        })
    }

    pub const fn min_x(&self) -> i32 {
        self.min_x
    }

    pub const fn max_x(&self) -> i32 {
        self.max_x
    }

    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    pub const fn max_y(&self) -> i32 {
        self.max_y
    }

    pub const fn origin(&self) -> Coordinate2D {
        self.origin
    }

    pub const fn dimension(&self) -> Dimension {
        Dimension::Two
    }

    /// Materializes the full coordinate set: every point of the x/y
    /// ranges offset by the origin, deduplicated.
    pub fn coordinates(&self) -> IndexSet<Coordinate2D> {
        let mut set = IndexSet::new();
        for x in self.min_x..=self.max_x {
            for y in self.min_y..=self.max_y {
                set.insert(self.origin + Coordinate2D::new(x as f64, y as f64));
            }
        }
        set
    }
}

impl fmt::Display for CoordinateMatrix2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})^{}",
            self.min_x, self.max_x, self.min_y, self.max_y, self.origin
        )
    }
}

impl FromStr for CoordinateMatrix2D {
    type Err = LevelzError;

    fn from_str(s: &str) -> Result<Self> {
        let (bounds, origin) = s
            .split_once('^')
            .ok_or_else(|| LevelzError::MalformedPoint(s.trim().to_string()))?;

        let bounds = parse_bounds(bounds, s)?;
        if bounds.len() != 4 {
            return Err(LevelzError::MalformedPoint(s.trim().to_string()));
        }

        let (min_x, max_x) = normalize(bounds[0], bounds[1]);
        let (min_y, max_y) = normalize(bounds[2], bounds[3]);

        Self::new(min_x, max_x, min_y, max_y, origin.parse()?)
    }
}

/// A 3D matrix of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateMatrix3D {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
    min_z: i32,
    max_z: i32,
    origin: Coordinate3D,
}

impl CoordinateMatrix3D {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
        min_z: i32,
        max_z: i32,
        origin: Coordinate3D,
    ) -> Result<Self> {
        if min_x > max_x {
            return Err(LevelzError::InvalidBounds {
                axis: 'x',
                min: min_x,
                max: max_x,
            });
        }
        if min_y > max_y {
            return Err(LevelzError::InvalidBounds {
                axis: 'y',
                min: min_y,
                max: max_y,
            });
        }
        if min_z > max_z {
            return Err(LevelzError::InvalidBounds {
                axis: 'z',
                min: min_z,
                max: max_z,
            });
        }

        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
            origin,
        })
    }

    pub const fn min_x(&self) -> i32 {
        self.min_x
    }

    pub const fn max_x(&self) -> i32 {
        self.max_x
    }

    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    pub const fn max_y(&self) -> i32 {
        self.max_y
    }

    pub const fn min_z(&self) -> i32 {
        self.min_z
    }

    pub const fn max_z(&self) -> i32 {
        self.max_z
    }

    pub const fn origin(&self) -> Coordinate3D {
        self.origin
    }

    pub const fn dimension(&self) -> Dimension {
        Dimension::Three
    }

    /// Materializes the full coordinate set: every point of the x/y/z
    /// ranges offset by the origin, deduplicated.
    pub fn coordinates(&self) -> IndexSet<Coordinate3D> {
        let mut set = IndexSet::new();
        for x in self.min_x..=self.max_x {
            for y in self.min_y..=self.max_y {
                for z in self.min_z..=self.max_z {
                    set.insert(self.origin + Coordinate3D::new(x as f64, y as f64, z as f64));
                }
            }
        }
        set
    }
}

impl fmt::Display for CoordinateMatrix3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {})^{}",
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z, self.origin
        )
    }
}

impl FromStr for CoordinateMatrix3D {
    type Err = LevelzError;

    fn from_str(s: &str) -> Result<Self> {
        let (bounds, origin) = s
            .split_once('^')
            .ok_or_else(|| LevelzError::MalformedPoint(s.trim().to_string()))?;

        let bounds = parse_bounds(bounds, s)?;
        if bounds.len() != 6 {
            return Err(LevelzError::MalformedPoint(s.trim().to_string()));
        }

        let (min_x, max_x) = normalize(bounds[0], bounds[1]);
        let (min_y, max_y) = normalize(bounds[2], bounds[3]);
        let (min_z, max_z) = normalize(bounds[4], bounds[5]);

        Self::new(min_x, max_x, min_y, max_y, min_z, max_z, origin.parse()?)
    }
}

/// A dimension-tagged coordinate matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateMatrix {
    TwoD(CoordinateMatrix2D),
    ThreeD(CoordinateMatrix3D),
}

impl CoordinateMatrix {
    pub fn dimension(&self) -> Dimension {
        match self {
            CoordinateMatrix::TwoD(_) => Dimension::Two,
            CoordinateMatrix::ThreeD(_) => Dimension::Three,
        }
    }

    pub fn coordinates(&self) -> IndexSet<Coordinate> {
        match self {
            CoordinateMatrix::TwoD(m) => {
                m.coordinates().into_iter().map(Coordinate::TwoD).collect()
            }
            CoordinateMatrix::ThreeD(m) => {
                m.coordinates().into_iter().map(Coordinate::ThreeD).collect()
            }
        }
    }
}

impl From<CoordinateMatrix2D> for CoordinateMatrix {
    fn from(m: CoordinateMatrix2D) -> Self {
        CoordinateMatrix::TwoD(m)
    }
}

impl From<CoordinateMatrix3D> for CoordinateMatrix {
    fn from(m: CoordinateMatrix3D) -> Self {
        CoordinateMatrix::ThreeD(m)
    }
}

impl fmt::Display for CoordinateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateMatrix::TwoD(m) => m.fmt(f),
            CoordinateMatrix::ThreeD(m) => m.fmt(f),
        }
    }
}

impl FromStr for CoordinateMatrix {
    type Err = LevelzError;

    /// Parses a matrix literal, inferring the dimension from the bound
    /// tuple length.
    fn from_str(s: &str) -> Result<Self> {
        let (bounds, _) = s
            .split_once('^')
            .ok_or_else(|| LevelzError::MalformedPoint(s.trim().to_string()))?;

        match parse_bounds(bounds, s)?.len() {
            4 => Ok(CoordinateMatrix::TwoD(s.parse()?)),
            6 => Ok(CoordinateMatrix::ThreeD(s.parse()?)),
            _ => Err(LevelzError::MalformedPoint(s.trim().to_string())),
        }
    }
}
