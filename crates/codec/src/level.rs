//! Level structures
//!
//! A level is produced once, atomically, by the parser or the builder
//! and is otherwise immutable value data. Its header map holds the raw
//! header strings, excluding `type` (derived from the dimension);
//! `spawn` and the 2D `scroll` are validated, typed copies of their
//! header entries.

use crate::block::LevelObject;
use crate::{ParseError, Result};
use indexmap::{IndexMap, IndexSet};
use levelz_core::{Coordinate, Coordinate2D, Coordinate3D, Dimension, LevelzError, Scroll};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw level headers, in insertion order.
pub type Headers = IndexMap<String, String>;

/// Checks every block coordinate against the level dimension.
fn check_blocks(blocks: &IndexSet<LevelObject>, expected: Dimension) -> Result<()> {
    for object in blocks {
        let found = object.coordinate().dimension();
        if found != expected {
            return Err(LevelzError::DimensionMismatch { expected, found }.into());
        }
    }
    Ok(())
}

/// Pulls the mandatory raw `spawn` header out of the map.
fn raw_spawn(headers: &Headers) -> Result<&str> {
    headers
        .get("spawn")
        .map(String::as_str)
        .ok_or_else(|| ParseError::MissingHeader("spawn".to_string()))
}

/// A 2D level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level2D {
    headers: Headers,
    spawn: Coordinate2D,
    scroll: Scroll,
    blocks: IndexSet<LevelObject>,
}

impl Level2D {
    /// Constructs a 2D level from raw headers and a block set,
    /// validating every invariant: a parseable `spawn` header, a
    /// recognized `scroll` value (missing defaults to `none`), and 2D
    /// coordinates throughout the block set.
    pub fn new(mut headers: Headers, blocks: IndexSet<LevelObject>) -> Result<Self> {
        headers.shift_remove("type");

        let raw = raw_spawn(&headers)?;
        let spawn = if raw == "default" {
            Coordinate2D::ZERO
        } else {
            raw.parse::<Coordinate2D>()?
        };
        headers.insert("spawn".to_string(), spawn.to_string());

        let scroll = match headers.get("scroll") {
            Some(raw) => raw.parse::<Scroll>()?,
            None => {
                debug!("No scroll header, defaulting to none");
                headers.insert("scroll".to_string(), Scroll::None.to_string());
                Scroll::None
            }
        };

        check_blocks(&blocks, Dimension::Two)?;

        Ok(Self {
            headers,
            spawn,
            scroll,
            blocks,
        })
    }

    pub const fn dimension(&self) -> Dimension {
        Dimension::Two
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub const fn spawn(&self) -> Coordinate2D {
        self.spawn
    }

    pub const fn scroll(&self) -> Scroll {
        self.scroll
    }

    pub fn blocks(&self) -> &IndexSet<LevelObject> {
        &self.blocks
    }
}

/// A 3D level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level3D {
    headers: Headers,
    spawn: Coordinate3D,
    blocks: IndexSet<LevelObject>,
}

impl Level3D {
    /// Constructs a 3D level from raw headers and a block set; same
    /// validation as [`Level2D::new`] minus the scroll handling.
    pub fn new(mut headers: Headers, blocks: IndexSet<LevelObject>) -> Result<Self> {
        headers.shift_remove("type");

        let raw = raw_spawn(&headers)?;
        let spawn = if raw == "default" {
            Coordinate3D::ZERO
        } else {
            raw.parse::<Coordinate3D>()?
        };
        headers.insert("spawn".to_string(), spawn.to_string());

        check_blocks(&blocks, Dimension::Three)?;

        Ok(Self {
            headers,
            spawn,
            blocks,
        })
    }

    pub const fn dimension(&self) -> Dimension {
        Dimension::Three
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub const fn spawn(&self) -> Coordinate3D {
        self.spawn
    }

    pub fn blocks(&self) -> &IndexSet<LevelObject> {
        &self.blocks
    }
}

/// A dimension-tagged level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    TwoD(Level2D),
    ThreeD(Level3D),
}

impl Level {
    pub fn dimension(&self) -> Dimension {
        match self {
            Level::TwoD(_) => Dimension::Two,
            Level::ThreeD(_) => Dimension::Three,
        }
    }

    pub fn headers(&self) -> &Headers {
        match self {
            Level::TwoD(level) => level.headers(),
            Level::ThreeD(level) => level.headers(),
        }
    }

    pub fn spawn(&self) -> Coordinate {
        match self {
            Level::TwoD(level) => Coordinate::TwoD(level.spawn()),
            Level::ThreeD(level) => Coordinate::ThreeD(level.spawn()),
        }
    }

    /// The scroll direction; 2D levels only.
    pub fn scroll(&self) -> Option<Scroll> {
        match self {
            Level::TwoD(level) => Some(level.scroll()),
            Level::ThreeD(_) => None,
        }
    }

    pub fn blocks(&self) -> &IndexSet<LevelObject> {
        match self {
            Level::TwoD(level) => level.blocks(),
            Level::ThreeD(level) => level.blocks(),
        }
    }

    pub fn as_2d(&self) -> Option<&Level2D> {
        match self {
            Level::TwoD(level) => Some(level),
            Level::ThreeD(_) => None,
        }
    }

    pub fn as_3d(&self) -> Option<&Level3D> {
        match self {
            Level::TwoD(_) => None,
            Level::ThreeD(level) => Some(level),
        }
    }
}

impl From<Level2D> for Level {
    fn from(level: Level2D) -> Self {
        Level::TwoD(level)
    }
}

impl From<Level3D> for Level {
    fn from(level: Level3D) -> Self {
        Level::ThreeD(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;

    fn headers(entries: &[(&str, &str)]) -> Headers {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_spawn_resolution() {
        let level = Level2D::new(headers(&[("spawn", "default")]), IndexSet::new()).unwrap();

        assert_eq!(level.spawn(), Coordinate2D::ZERO);
        assert_eq!(level.headers().get("spawn").unwrap(), "[0, 0]");
    }

    #[test]
    fn test_missing_spawn() {
        let err = Level2D::new(Headers::new(), IndexSet::new()).unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader(ref key) if key == "spawn"));
    }

    #[test]
    fn test_scroll_defaulting() {
        let level = Level2D::new(headers(&[("spawn", "default")]), IndexSet::new()).unwrap();
        assert_eq!(level.scroll(), Scroll::None);
        assert_eq!(level.headers().get("scroll").unwrap(), "none");

        let level = Level2D::new(
            headers(&[("spawn", "[0, 10]"), ("scroll", "horizontal-right")]),
            IndexSet::new(),
        )
        .unwrap();
        assert_eq!(level.scroll(), Scroll::HorizontalRight);
        assert_eq!(level.spawn(), Coordinate2D::new(0.0, 10.0));
    }

    #[test]
    fn test_unknown_scroll_rejected() {
        let result = Level2D::new(
            headers(&[("spawn", "default"), ("scroll", "sideways")]),
            IndexSet::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_type_header_never_stored() {
        let level = Level2D::new(
            headers(&[("type", "2"), ("spawn", "default")]),
            IndexSet::new(),
        )
        .unwrap();
        assert!(!level.headers().contains_key("type"));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut blocks = IndexSet::new();
        blocks.insert(LevelObject::new(
            Block::named("stone"),
            Coordinate3D::new(0.0, 0.0, 0.0),
        ));

        let err = Level2D::new(headers(&[("spawn", "default")]), blocks).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Model(LevelzError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_spawn_arity_checked() {
        let result = Level3D::new(headers(&[("spawn", "[0, 0]")]), IndexSet::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut blocks = IndexSet::new();
        blocks.insert(LevelObject::new(
            "rock<weight=5,wet=true>".parse::<Block>().unwrap(),
            Coordinate2D::new(1.0, 2.5),
        ));

        let level = Level::TwoD(
            Level2D::new(headers(&[("spawn", "[1, 1]"), ("name", "Cavern")]), blocks).unwrap(),
        );

        let json = serde_json::to_string(&level).unwrap();
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);
    }
}
