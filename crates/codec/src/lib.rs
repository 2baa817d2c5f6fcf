//! LevelZ Codec - Parser, exporter, and builder for the LevelZ text
//! format.
//!
//! A level file is a header section of `@key value` lines, a `---`
//! separator, and a body of `block: coordinates` lines terminated by
//! the `end` sentinel. Parsing resolves weighted block groups through
//! an injectable [`RandomSource`]; exporting produces canonical text
//! that parses back to an equal level.

pub mod block;
pub mod builder;
pub mod error;
pub mod exporter;
pub mod level;
pub mod parser;
pub mod random;

pub use block::{Block, LevelObject, PropertyValue};
pub use builder::LevelBuilder;
pub use error::{ParseError, Result};
pub use exporter::{export_level, LevelExporter};
pub use level::{Headers, Level, Level2D, Level3D};
pub use parser::{LevelParser, END, HEADER_END};
pub use random::{RandomSource, SeededRandom};
