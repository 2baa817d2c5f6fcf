//! LevelZ Core - Fundamental types for the LevelZ level format

mod error;
mod dimension;
mod coord;
mod matrix;

pub use error::*;
pub use dimension::*;
pub use coord::*;
pub use matrix::*;
