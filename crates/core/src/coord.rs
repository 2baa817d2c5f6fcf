//! Coordinate types for 2D and 3D levels
//!
//! Coordinates are value types over f64 components with component-wise
//! arithmetic, a canonical text form, and a total ordering by Euclidean
//! magnitude (used for deterministic export grouping).

use crate::{Dimension, LevelzError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

/// Hashes one f64 component by bit pattern, normalizing -0.0 so that
/// equal coordinates hash alike.
fn hash_component<H: Hasher>(value: f64, state: &mut H) {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

/// Renders one component without a fractional part when it is an exact
/// integer, e.g. `3.0` as `3` and `2.5` as `2.5`.
fn fmt_component(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 {
        write!(f, "{:.0}", value)
    } else {
        write!(f, "{}", value)
    }
}

/// Strips brackets and whitespace, then parses comma-separated f64
/// components. Trailing empty tokens are dropped; anything else that
/// fails to parse is a malformed point.
fn parse_components(s: &str) -> Result<Vec<f64>> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '[' && *c != ']')
        .collect();

    let mut tokens: Vec<&str> = cleaned.split(',').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    tokens
        .iter()
        .map(|t| {
            t.parse::<f64>()
                .map_err(|_| LevelzError::MalformedPoint(s.trim().to_string()))
        })
        .collect()
}

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: f64,
    pub y: f64,
}

impl Coordinate2D {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean norm of the coordinate.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub const fn dimension(&self) -> Dimension {
        Dimension::Two
    }
}

impl From<[f64; 2]> for Coordinate2D {
    fn from(xy: [f64; 2]) -> Self {
        Self::new(xy[0], xy[1])
    }
}

impl From<[i32; 2]> for Coordinate2D {
    fn from(xy: [i32; 2]) -> Self {
        Self::new(xy[0] as f64, xy[1] as f64)
    }
}

impl Eq for Coordinate2D {}

impl Hash for Coordinate2D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_component(self.x, state);
        hash_component(self.y, state);
    }
}

impl Ord for Coordinate2D {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude()
            .total_cmp(&other.magnitude())
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl PartialOrd for Coordinate2D {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Coordinate2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul for Coordinate2D {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div for Coordinate2D {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Add<f64> for Coordinate2D {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub<f64> for Coordinate2D {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul<f64> for Coordinate2D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Coordinate2D {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Coordinate2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        fmt_component(self.x, f)?;
        write!(f, ", ")?;
        fmt_component(self.y, f)?;
        write!(f, "]")
    }
}

impl FromStr for Coordinate2D {
    type Err = LevelzError;

    fn from_str(s: &str) -> Result<Self> {
        let parts = parse_components(s)?;
        if parts.len() != 2 {
            return Err(LevelzError::MalformedPoint(s.trim().to_string()));
        }
        Ok(Self::new(parts[0], parts[1]))
    }
}

/// A 3D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate3D {
    /// The origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the coordinate.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub const fn dimension(&self) -> Dimension {
        Dimension::Three
    }
}

impl From<[f64; 3]> for Coordinate3D {
    fn from(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }
}

impl From<[i32; 3]> for Coordinate3D {
    fn from(xyz: [i32; 3]) -> Self {
        Self::new(xyz[0] as f64, xyz[1] as f64, xyz[2] as f64)
    }
}

impl Eq for Coordinate3D {}

impl Hash for Coordinate3D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_component(self.x, state);
        hash_component(self.y, state);
        hash_component(self.z, state);
    }
}

impl Ord for Coordinate3D {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude()
            .total_cmp(&other.magnitude())
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.z.total_cmp(&other.z))
    }
}

impl PartialOrd for Coordinate3D {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Coordinate3D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coordinate3D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul for Coordinate3D {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div for Coordinate3D {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Add<f64> for Coordinate3D {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self::new(self.x + rhs, self.y + rhs, self.z + rhs)
    }
}

impl Sub<f64> for Coordinate3D {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.x - rhs, self.y - rhs, self.z - rhs)
    }
}

impl Mul<f64> for Coordinate3D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Coordinate3D {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl fmt::Display for Coordinate3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        fmt_component(self.x, f)?;
        write!(f, ", ")?;
        fmt_component(self.y, f)?;
        write!(f, ", ")?;
        fmt_component(self.z, f)?;
        write!(f, "]")
    }
}

impl FromStr for Coordinate3D {
    type Err = LevelzError;

    fn from_str(s: &str) -> Result<Self> {
        let parts = parse_components(s)?;
        if parts.len() != 3 {
            return Err(LevelzError::MalformedPoint(s.trim().to_string()));
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

/// A dimension-tagged coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coordinate {
    TwoD(Coordinate2D),
    ThreeD(Coordinate3D),
}

impl Coordinate {
    pub fn dimension(&self) -> Dimension {
        match self {
            Coordinate::TwoD(_) => Dimension::Two,
            Coordinate::ThreeD(_) => Dimension::Three,
        }
    }

    pub fn magnitude(&self) -> f64 {
        match self {
            Coordinate::TwoD(c) => c.magnitude(),
            Coordinate::ThreeD(c) => c.magnitude(),
        }
    }

    /// Builds a coordinate from a component slice; the slice length
    /// decides the dimension.
    pub fn from_array(values: &[f64]) -> Result<Self> {
        match values {
            [x, y] => Ok(Coordinate::TwoD(Coordinate2D::new(*x, *y))),
            [x, y, z] => Ok(Coordinate::ThreeD(Coordinate3D::new(*x, *y, *z))),
            _ => Err(LevelzError::MalformedPoint(format!(
                "invalid coordinate length: {}",
                values.len()
            ))),
        }
    }

    pub fn as_2d(&self) -> Option<Coordinate2D> {
        match self {
            Coordinate::TwoD(c) => Some(*c),
            Coordinate::ThreeD(_) => None,
        }
    }

    pub fn as_3d(&self) -> Option<Coordinate3D> {
        match self {
            Coordinate::TwoD(_) => None,
            Coordinate::ThreeD(c) => Some(*c),
        }
    }
}

impl From<Coordinate2D> for Coordinate {
    fn from(c: Coordinate2D) -> Self {
        Coordinate::TwoD(c)
    }
}

impl From<Coordinate3D> for Coordinate {
    fn from(c: Coordinate3D) -> Self {
        Coordinate::ThreeD(c)
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude()
            .total_cmp(&other.magnitude())
            .then_with(|| match (self, other) {
                (Coordinate::TwoD(a), Coordinate::TwoD(b)) => a.cmp(b),
                (Coordinate::ThreeD(a), Coordinate::ThreeD(b)) => a.cmp(b),
                (Coordinate::TwoD(_), Coordinate::ThreeD(_)) => Ordering::Less,
                (Coordinate::ThreeD(_), Coordinate::TwoD(_)) => Ordering::Greater,
            })
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::TwoD(c) => c.fmt(f),
            Coordinate::ThreeD(c) => c.fmt(f),
        }
    }
}

impl FromStr for Coordinate {
    type Err = LevelzError;

    /// Parses a coordinate literal, inferring the dimension from the
    /// component count.
    fn from_str(s: &str) -> Result<Self> {
        let parts = parse_components(s)?;
        Coordinate::from_array(&parts)
            .map_err(|_| LevelzError::MalformedPoint(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Coordinate2D::new(3.0, -2.5).to_string(), "[3, -2.5]");
        assert_eq!(Coordinate2D::ZERO.to_string(), "[0, 0]");
        assert_eq!(Coordinate3D::new(0.0, 10.0, 0.5).to_string(), "[0, 10, 0.5]");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "[0,0]".parse::<Coordinate2D>().unwrap(),
            Coordinate2D::ZERO
        );
        assert_eq!(
            "[5, 5]".parse::<Coordinate2D>().unwrap(),
            Coordinate2D::new(5.0, 5.0)
        );
        assert_eq!(
            "2.5, -2.5".parse::<Coordinate2D>().unwrap(),
            Coordinate2D::new(2.5, -2.5)
        );
        assert_eq!(
            "[0, 10, 0]".parse::<Coordinate3D>().unwrap(),
            Coordinate3D::new(0.0, 10.0, 0.0)
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!("[0, 0, 0]".parse::<Coordinate2D>().is_err());
        assert!("[0, 0]".parse::<Coordinate3D>().is_err());
        assert!("[a, b]".parse::<Coordinate2D>().is_err());
        assert!("".parse::<Coordinate2D>().is_err());
    }

    #[test]
    fn test_format_parse_round_trip() {
        let points = [
            Coordinate2D::new(0.0, 0.0),
            Coordinate2D::new(1.5, -2.25),
            Coordinate2D::new(1e10, 0.1),
            Coordinate2D::new(-7.0, 1e16),
        ];

        for point in points {
            assert_eq!(point.to_string().parse::<Coordinate2D>().unwrap(), point);
        }
    }

    #[test]
    fn test_magnitude() {
        assert!((Coordinate2D::new(3.0, 4.0).magnitude() - 5.0).abs() < 1e-9);
        assert!((Coordinate3D::new(2.0, 3.0, 6.0).magnitude() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_ordering_by_magnitude() {
        let near = Coordinate2D::new(1.0, 1.0);
        let far = Coordinate2D::new(5.0, 5.0);
        assert!(near < far);

        let mut points = vec![far, near, Coordinate2D::ZERO];
        points.sort();
        assert_eq!(points, vec![Coordinate2D::ZERO, near, far]);
    }

    #[test]
    fn test_arithmetic() {
        let a = Coordinate2D::new(1.0, 2.0);
        let b = Coordinate2D::new(3.0, 4.0);

        assert_eq!(a + b, Coordinate2D::new(4.0, 6.0));
        assert_eq!(b - a, Coordinate2D::new(2.0, 2.0));
        assert_eq!(a * b, Coordinate2D::new(3.0, 8.0));
        assert_eq!(b / a, Coordinate2D::new(3.0, 2.0));
        assert_eq!(a * 2.0, Coordinate2D::new(2.0, 4.0));
        assert_eq!(b / 2.0, Coordinate2D::new(1.5, 2.0));

        let c = Coordinate3D::new(1.0, 2.0, 3.0);
        assert_eq!(c + 1.0, Coordinate3D::new(2.0, 3.0, 4.0));
        assert_eq!(c * c, Coordinate3D::new(1.0, 4.0, 9.0));
    }

    #[test]
    fn test_tagged_coordinate() {
        let c = "[1, 2]".parse::<Coordinate>().unwrap();
        assert_eq!(c.dimension(), Dimension::Two);
        assert_eq!(c.as_2d(), Some(Coordinate2D::new(1.0, 2.0)));
        assert_eq!(c.as_3d(), None);

        let c = Coordinate::from_array(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(c.dimension(), Dimension::Three);
        assert_eq!(c.to_string(), "[1, 2, 3]");

        assert!(Coordinate::from_array(&[1.0]).is_err());
        assert!(Coordinate::from_array(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }
}
