//! Mutable builder over immutable levels
//!
//! A staging type that accumulates headers and blocks, then performs
//! the same validation as the parser when producing the immutable
//! level value.

use crate::block::{Block, LevelObject};
use crate::level::{Headers, Level, Level2D, Level3D};
use crate::Result;
use indexmap::IndexSet;
use levelz_core::{Coordinate, CoordinateMatrix, Dimension, LevelzError, Scroll};

/// Builder for LevelZ levels.
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    dimension: Dimension,
    headers: Headers,
    blocks: IndexSet<LevelObject>,
}

impl LevelBuilder {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            headers: Headers::new(),
            blocks: IndexSet::new(),
        }
    }

    /// A builder for a 2D level.
    pub fn new_2d() -> Self {
        Self::new(Dimension::Two)
    }

    /// A builder for a 3D level.
    pub fn new_3d() -> Self {
        Self::new(Dimension::Three)
    }

    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Loads an existing level's headers and blocks into the builder.
    pub fn load_level(mut self, level: &Level) -> Result<Self> {
        if level.dimension() != self.dimension {
            return Err(LevelzError::DimensionMismatch {
                expected: self.dimension,
                found: level.dimension(),
            }
            .into());
        }

        for (key, value) in level.headers() {
            self.headers.insert(key.clone(), value.clone());
        }
        for object in level.blocks() {
            self.blocks.insert(object.clone());
        }
        Ok(self)
    }

    /// Sets the spawn point; must match the builder's dimension.
    pub fn spawn(mut self, spawn: impl Into<Coordinate>) -> Result<Self> {
        let spawn = spawn.into();
        self.check_dimension(spawn.dimension())?;
        self.headers.insert("spawn".to_string(), spawn.to_string());
        Ok(self)
    }

    /// Sets or clears the scroll direction; 2D levels only.
    pub fn scroll(mut self, scroll: Option<Scroll>) -> Result<Self> {
        if !self.dimension.is_2d() {
            return Err(LevelzError::DimensionMismatch {
                expected: Dimension::Two,
                found: self.dimension,
            }
            .into());
        }

        match scroll {
            Some(scroll) => {
                self.headers.insert("scroll".to_string(), scroll.to_string());
            }
            None => {
                self.headers.shift_remove("scroll");
            }
        }
        Ok(self)
    }

    /// Sets a header value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Removes a header.
    pub fn remove_header(mut self, key: &str) -> Self {
        self.headers.shift_remove(key);
        self
    }

    /// Sets multiple header values.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in headers {
            self.headers.insert(key.into(), value.into());
        }
        self
    }

    /// Adds a placed block instance.
    pub fn object(mut self, object: LevelObject) -> Result<Self> {
        self.check_dimension(object.coordinate().dimension())?;
        self.blocks.insert(object);
        Ok(self)
    }

    /// Adds a block at one coordinate.
    pub fn block(self, block: Block, coordinate: impl Into<Coordinate>) -> Result<Self> {
        self.object(LevelObject::new(block, coordinate))
    }

    /// Adds a block at every coordinate of the iterator.
    pub fn blocks<I, C>(mut self, block: Block, coordinates: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        for coordinate in coordinates {
            self = self.block(block.clone(), coordinate)?;
        }
        Ok(self)
    }

    /// Adds a block at every coordinate of an expanded matrix.
    pub fn matrix(self, block: Block, matrix: &CoordinateMatrix) -> Result<Self> {
        self.blocks(block, matrix.coordinates())
    }

    /// Builds the immutable level, re-validating every invariant.
    pub fn build(self) -> Result<Level> {
        match self.dimension {
            Dimension::Two => Ok(Level::TwoD(Level2D::new(self.headers, self.blocks)?)),
            Dimension::Three => Ok(Level::ThreeD(Level3D::new(self.headers, self.blocks)?)),
        }
    }

    fn check_dimension(&self, found: Dimension) -> Result<()> {
        if found != self.dimension {
            return Err(LevelzError::DimensionMismatch {
                expected: self.dimension,
                found,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::export_level;
    use crate::parser::LevelParser;
    use crate::ParseError;
    use levelz_core::{Coordinate2D, Coordinate3D, CoordinateMatrix2D};

    #[test]
    fn test_build_2d_level() {
        let level = LevelBuilder::new_2d()
            .spawn(Coordinate2D::ZERO)
            .unwrap()
            .scroll(Some(Scroll::HorizontalLeft))
            .unwrap()
            .header("name", "Meadow")
            .block(Block::named("grass"), Coordinate2D::new(0.0, 0.0))
            .unwrap()
            .block(Block::named("grass"), Coordinate2D::new(1.0, 0.0))
            .unwrap()
            .build()
            .unwrap();

        let level = level.as_2d().unwrap();
        assert_eq!(level.scroll(), Scroll::HorizontalLeft);
        assert_eq!(level.headers().get("name").unwrap(), "Meadow");
        assert_eq!(level.blocks().len(), 2);
    }

    #[test]
    fn test_spawn_required() {
        let err = LevelBuilder::new_2d().build().unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader(_)));
    }

    #[test]
    fn test_dimension_checks() {
        assert!(LevelBuilder::new_2d()
            .spawn(Coordinate3D::ZERO)
            .is_err());
        assert!(LevelBuilder::new_3d()
            .scroll(Some(Scroll::None))
            .is_err());
        assert!(LevelBuilder::new_3d()
            .block(Block::named("grass"), Coordinate2D::ZERO)
            .is_err());
    }

    #[test]
    fn test_matrix_fill() {
        let matrix = CoordinateMatrix2D::new(0, 2, 0, 2, Coordinate2D::ZERO).unwrap();
        let level = LevelBuilder::new_2d()
            .spawn(Coordinate2D::ZERO)
            .unwrap()
            .matrix(Block::named("stone"), &matrix.into())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(level.blocks().len(), 9);
    }

    #[test]
    fn test_load_level() {
        let source = LevelParser::parse_str(
            "@type 2\n@spawn [1, 1]\n---\ngrass: [0,0]\nend",
        )
        .unwrap();

        let level = LevelBuilder::new_2d()
            .load_level(&source)
            .unwrap()
            .block(Block::named("stone"), Coordinate2D::new(2.0, 2.0))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(level.blocks().len(), 2);
        assert_eq!(
            level.spawn(),
            Coordinate::TwoD(Coordinate2D::new(1.0, 1.0))
        );

        assert!(LevelBuilder::new_3d().load_level(&source).is_err());
    }

    #[test]
    fn test_builder_parser_equivalence() {
        let built = LevelBuilder::new_2d()
            .spawn(Coordinate2D::ZERO)
            .unwrap()
            .blocks(
                Block::named("grass"),
                [Coordinate2D::new(0.0, 0.0), Coordinate2D::new(1.0, 0.0)],
            )
            .unwrap()
            .build()
            .unwrap();

        let reparsed = LevelParser::parse_str(&export_level(&built)).unwrap();
        assert_eq!(reparsed, built);
    }
}
