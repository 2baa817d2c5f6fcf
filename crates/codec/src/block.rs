//! Block and level object models
//!
//! A block is a named entity with an ordered property map; block names
//! and properties are opaque to the codec. A level object is one placed
//! instance of a block at a coordinate.

use crate::{ParseError, Result};
use indexmap::IndexMap;
use levelz_core::Coordinate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A typed block property value, decided by literal coercion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl PropertyValue {
    /// Coerces a raw literal into a typed value. Applied in strict
    /// order, first match wins: case-insensitive boolean, integer,
    /// float, then the raw string. `5` becomes an integer, `5.0` a
    /// float, `True` a boolean.
    pub fn coerce(token: &str) -> Self {
        if token.eq_ignore_ascii_case("true") {
            return PropertyValue::Bool(true);
        }
        if token.eq_ignore_ascii_case("false") {
            return PropertyValue::Bool(false);
        }
        if let Ok(i) = token.parse::<i64>() {
            return PropertyValue::Int(i);
        }
        if let Ok(v) = token.parse::<f64>() {
            return PropertyValue::Float(v);
        }
        PropertyValue::Text(token.to_string())
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::Bool(a), PropertyValue::Bool(b)) => a == b,
            (PropertyValue::Int(a), PropertyValue::Int(b)) => a == b,
            (PropertyValue::Float(a), PropertyValue::Float(b)) => a == b,
            (PropertyValue::Text(a), PropertyValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropertyValue {}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PropertyValue::Bool(b) => b.hash(state),
            PropertyValue::Int(i) => i.hash(state),
            PropertyValue::Float(v) => {
                // normalize -0.0 so equal values hash alike
                let v = if *v == 0.0 { 0.0 } else { *v };
                v.to_bits().hash(state);
            }
            PropertyValue::Text(t) => t.hash(state),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Int(i) => write!(f, "{}", i),
            // keep the decimal point so the value re-coerces to a float
            PropertyValue::Float(v) if v.is_finite() && v.fract() == 0.0 => {
                write!(f, "{:.1}", v)
            }
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::Text(t) => write!(f, "{}", t),
        }
    }
}

/// A named block with an insertion-ordered property map.
///
/// Blocks have value semantics: two blocks are equal iff name and full
/// property map match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    name: String,
    properties: IndexMap<String, PropertyValue>,
}

impl Block {
    pub fn new(name: impl Into<String>, properties: IndexMap<String, PropertyValue>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// A block with no properties.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, IndexMap::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &IndexMap<String, PropertyValue> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// A copy of this block with a different name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.properties.clone())
    }

    /// A copy of this block with a different property map.
    pub fn with_properties(&self, properties: IndexMap<String, PropertyValue>) -> Self {
        Self::new(self.name.clone(), properties)
    }

    /// The parseable literal form: `name` or `name<k=v,...>`.
    pub fn to_literal(&self) -> String {
        if self.properties.is_empty() {
            return self.name.clone();
        }

        let pairs: Vec<String> = self
            .properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("{}<{}>", self.name, pairs.join(","))
    }
}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);

        // commutative fold over entries, consistent with the map's
        // order-insensitive equality
        let mut acc: u64 = 0;
        for (key, value) in &self.properties {
            let mut entry = DefaultHasher::new();
            key.hash(&mut entry);
            value.hash(&mut entry);
            acc = acc.wrapping_add(entry.finish());
        }
        acc.hash(state);
    }
}

impl fmt::Display for Block {
    /// Diagnostic form: `name` or `name<{k=v, k2=v2}>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.properties.is_empty() {
            return write!(f, "{}", self.name);
        }

        write!(f, "{}<{{", self.name)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}>")
    }
}

impl FromStr for Block {
    type Err = ParseError;

    /// Parses a block literal: `name` or `name<key=value,...>`.
    /// Whitespace is stripped, trailing `>` noise is tolerated, and a
    /// property pair without `=` fails naming the offending literal.
    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let trimmed = compact.trim_end_matches('>');

        let Some((name, body)) = trimmed.split_once('<') else {
            if trimmed.is_empty() {
                return Err(ParseError::MalformedBlock(s.to_string()));
            }
            return Ok(Block::named(trimmed));
        };

        if name.is_empty() {
            return Err(ParseError::MalformedBlock(s.to_string()));
        }

        let body = body.trim_matches(|c| c == '{' || c == '}');
        let mut properties = IndexMap::new();
        for pair in body.split(',') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ParseError::MalformedBlock(s.to_string()))?;
            properties.insert(key.to_string(), PropertyValue::coerce(value));
        }

        Ok(Block::new(name, properties))
    }
}

/// One placed block instance at a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelObject {
    block: Block,
    coordinate: Coordinate,
}

impl LevelObject {
    pub fn new(block: Block, coordinate: impl Into<Coordinate>) -> Self {
        Self {
            block,
            coordinate: coordinate.into(),
        }
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl PartialOrd for LevelObject {
    /// Natural ordering delegates to the coordinate's magnitude order.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.coordinate.cmp(&other.coordinate))
    }
}

impl fmt::Display for LevelObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.block, self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelz_core::Coordinate2D;

    #[test]
    fn test_coercion() {
        assert_eq!(PropertyValue::coerce("true"), PropertyValue::Bool(true));
        assert_eq!(PropertyValue::coerce("True"), PropertyValue::Bool(true));
        assert_eq!(PropertyValue::coerce("FALSE"), PropertyValue::Bool(false));
        assert_eq!(PropertyValue::coerce("5"), PropertyValue::Int(5));
        assert_eq!(PropertyValue::coerce("-12"), PropertyValue::Int(-12));
        assert_eq!(PropertyValue::coerce("5.0"), PropertyValue::Float(5.0));
        assert_eq!(PropertyValue::coerce("0.25"), PropertyValue::Float(0.25));
        assert_eq!(
            PropertyValue::coerce("Hello, World!"),
            PropertyValue::Text("Hello, World!".to_string())
        );
    }

    #[test]
    fn test_value_display_round_trip() {
        for value in [
            PropertyValue::Bool(false),
            PropertyValue::Int(7),
            PropertyValue::Float(5.0),
            PropertyValue::Float(0.5),
            PropertyValue::Text("ore".to_string()),
        ] {
            assert_eq!(PropertyValue::coerce(&value.to_string()), value);
        }
    }

    #[test]
    fn test_parse_plain_block() {
        let block = "grass".parse::<Block>().unwrap();
        assert_eq!(block.name(), "grass");
        assert!(block.properties().is_empty());
    }

    #[test]
    fn test_parse_block_properties() {
        let block = "rock<weight=5,wet=true,label=ore>".parse::<Block>().unwrap();

        assert_eq!(block.name(), "rock");
        assert_eq!(block.property("weight"), Some(&PropertyValue::Int(5)));
        assert_eq!(block.property("wet"), Some(&PropertyValue::Bool(true)));
        assert_eq!(
            block.property("label"),
            Some(&PropertyValue::Text("ore".to_string()))
        );
    }

    #[test]
    fn test_parse_malformed_pair() {
        let err = "rock<weight>".parse::<Block>().unwrap_err();
        assert!(matches!(err, ParseError::MalformedBlock(_)));
        assert!("".parse::<Block>().is_err());
    }

    #[test]
    fn test_literal_round_trip() {
        let block = "stone<weight=5.0,type=lava,wet=false>".parse::<Block>().unwrap();
        assert_eq!(block.to_literal().parse::<Block>().unwrap(), block);

        // the braced diagnostic form reparses too
        assert_eq!(block.to_string().parse::<Block>().unwrap(), block);
    }

    #[test]
    fn test_display() {
        let block = "magma<temp=0.3,wet=false>".parse::<Block>().unwrap();
        assert_eq!(block.to_string(), "magma<{temp=0.3, wet=false}>");
        assert_eq!(block.to_literal(), "magma<temp=0.3,wet=false>");
        assert_eq!(Block::named("air").to_string(), "air");
    }

    #[test]
    fn test_value_semantics() {
        let block = "test<test=5>".parse::<Block>().unwrap();
        let renamed = block.with_name("other");

        assert_eq!(renamed.name(), "other");
        assert_eq!(renamed.properties(), block.properties());
        assert_ne!(renamed, block);

        let cleared = block.with_properties(IndexMap::new());
        assert_eq!(cleared, Block::named("test"));

        // 5 the integer is not 5.0 the float
        let float = "test<test=5.0>".parse::<Block>().unwrap();
        assert_ne!(block, float);
    }

    #[test]
    fn test_level_object() {
        let a = LevelObject::new(Block::named("grass"), Coordinate2D::new(0.0, 0.0));
        let b = LevelObject::new(Block::named("grass"), Coordinate2D::new(1.0, 0.0));

        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a.to_string(), "grass: [0, 0]");
    }
}
