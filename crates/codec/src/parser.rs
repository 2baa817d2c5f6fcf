//! LevelZ text format parser
//!
//! Drives header/body splitting, header validation, per-line block and
//! coordinate decoding, and assembly into a dimension-specific level.
//! Every malformed construct aborts the whole parse; there is no
//! partial or recovered result.

use crate::block::{Block, LevelObject};
use crate::level::{Headers, Level, Level2D, Level3D};
use crate::random::{RandomSource, SeededRandom};
use crate::{ParseError, Result};
use indexmap::{IndexMap, IndexSet};
use levelz_core::{Coordinate, CoordinateMatrix2D, CoordinateMatrix3D, Dimension};
use std::fs;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

/// Marks the end of the header section.
pub const HEADER_END: &str = "---";

/// Marks the end of the body section; matched case-insensitively.
pub const END: &str = "end";

/// LevelZ file parser
pub struct LevelParser;

impl LevelParser {
    /// Parse a level from newline-separated text.
    pub fn parse_str(data: &str) -> Result<Level> {
        Self::parse_str_with(data, &mut SeededRandom::from_entropy())
    }

    /// Parse a level from newline-separated text with a caller-supplied
    /// random source for weighted block groups.
    pub fn parse_str_with(data: &str, random: &mut dyn RandomSource) -> Result<Level> {
        Self::parse_lines(data.lines(), random)
    }

    /// Parse a level from a sequence of lines.
    pub fn parse_lines<I, S>(lines: I, random: &mut dyn RandomSource) -> Result<Level>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect();
        Self::parse(&lines, random)
    }

    /// Parse a level from a buffered reader.
    pub fn parse_reader<R: BufRead>(reader: R, random: &mut dyn RandomSource) -> Result<Level> {
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        Self::parse(&lines, random)
    }

    /// Load a level from a file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Level> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        debug!("Loaded level file: {}", path.display());
        Self::parse_str(&data)
    }

    /// Parse pre-split lines into a level.
    fn parse(lines: &[String], random: &mut dyn RandomSource) -> Result<Level> {
        let (header_lines, body_lines) = Self::split_sections(lines);

        let headers = Self::read_headers(header_lines)?;
        let dimension = Self::read_dimension(&headers)?;

        let mut blocks = IndexSet::new();
        for raw in body_lines {
            let line = raw.trim();

            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case(END) {
                break;
            }

            // strip an inline comment before further parsing
            let line = match line.find('#') {
                Some(i) => line[..i].trim(),
                None => line,
            };
            if line.is_empty() {
                continue;
            }

            let (block, points) = Self::read_line(line, dimension, random)?;
            for coordinate in points {
                blocks.insert(LevelObject::new(block.clone(), coordinate));
            }
        }

        debug!(
            dimension = %dimension,
            blocks = blocks.len(),
            "Parsed level body"
        );

        match dimension {
            Dimension::Two => Ok(Level::TwoD(Level2D::new(headers, blocks)?)),
            Dimension::Three => Ok(Level::ThreeD(Level3D::new(headers, blocks)?)),
        }
    }

    /// Split the input at the first `---` line into header and body
    /// sections. Without a delimiter everything is header lines.
    fn split_sections(lines: &[String]) -> (&[String], &[String]) {
        match lines.iter().position(|line| line.trim() == HEADER_END) {
            Some(i) => (&lines[..i], &lines[i + 1..]),
            None => (lines, &[][..]),
        }
    }

    /// Read `@key value` header lines into an ordered map. The `type`
    /// and `spawn` keys are mandatory.
    fn read_headers(lines: &[String]) -> Result<Headers> {
        let mut headers = Headers::new();

        for raw in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let rest = line
                .strip_prefix('@')
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;

            headers.insert(key.to_string(), value.trim().to_string());
        }

        for required in ["type", "spawn"] {
            if !headers.contains_key(required) {
                return Err(ParseError::MissingHeader(required.to_string()));
            }
        }

        Ok(headers)
    }

    /// Decode the `@type` header into a dimension.
    fn read_dimension(headers: &Headers) -> Result<Dimension> {
        let code = headers
            .get("type")
            .ok_or_else(|| ParseError::MissingHeader("type".to_string()))?;
        Ok(Dimension::from_code(code)?)
    }

    /// Decode one body line into a resolved block and its coordinates.
    fn read_line(
        line: &str,
        dimension: Dimension,
        random: &mut dyn RandomSource,
    ) -> Result<(Block, IndexSet<Coordinate>)> {
        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let (block_spec, point_spec) = compact
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedLine(line.to_string()))?;

        let block = Self::read_block(block_spec, random)?;
        let points = Self::read_points(point_spec, dimension)?;
        Ok((block, points))
    }

    /// Decode a `*`-separated point spec. A token opening with `(` and
    /// closing with `]` is a coordinate matrix, expanded to its full
    /// coordinate set; anything else is a single coordinate literal.
    fn read_points(input: &str, dimension: Dimension) -> Result<IndexSet<Coordinate>> {
        let mut points = IndexSet::new();

        for token in input.split('*') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            if token.starts_with('(') && token.ends_with(']') {
                match dimension {
                    Dimension::Two => {
                        let matrix = token.parse::<CoordinateMatrix2D>()?;
                        points.extend(matrix.coordinates().into_iter().map(Coordinate::TwoD));
                    }
                    Dimension::Three => {
                        let matrix = token.parse::<CoordinateMatrix3D>()?;
                        points.extend(matrix.coordinates().into_iter().map(Coordinate::ThreeD));
                    }
                }
            } else {
                let point = match dimension {
                    Dimension::Two => Coordinate::TwoD(token.parse()?),
                    Dimension::Three => Coordinate::ThreeD(token.parse()?),
                };
                points.insert(point);
            }
        }

        Ok(points)
    }

    /// Resolve a block spec: either a literal block or a `{...}`
    /// weighted group sampled with one random draw.
    fn read_block(spec: &str, random: &mut dyn RandomSource) -> Result<Block> {
        if !(spec.starts_with('{') && spec.ends_with('}')) {
            return spec.parse();
        }

        let inner = &spec[1..spec.len() - 1];
        let entries = Self::split_group(inner);
        if entries.is_empty() {
            return Err(ParseError::MalformedBlock(spec.to_string()));
        }

        // unweighted entries share one implicit weight, computed from
        // the total entry count and never renormalized
        let share = 1.0 / entries.len() as f64;

        let mut weights: IndexMap<&str, f64> = IndexMap::new();
        for entry in &entries {
            match entry.split_once('=') {
                Some((prefix, literal)) => match prefix.parse::<f64>() {
                    Ok(weight) => {
                        weights.insert(literal, weight);
                    }
                    Err(_) => {
                        weights.insert(entry.as_str(), share);
                    }
                },
                None => {
                    weights.insert(entry.as_str(), share);
                }
            }
        }

        let chosen = Self::roll(&weights, random)?
            .ok_or_else(|| ParseError::NoBlockSelected(spec.to_string()))?;
        chosen.parse()
    }

    /// Split a group body on commas at bracket depth zero, so property
    /// lists inside entries stay intact.
    fn split_group(inner: &str) -> Vec<String> {
        let mut entries = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;

        for c in inner.chars() {
            match c {
                ',' if depth == 0 => {
                    if !current.is_empty() {
                        entries.push(std::mem::take(&mut current));
                    }
                }
                '<' => {
                    depth += 1;
                    current.push(c);
                }
                '>' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                _ => current.push(c),
            }
        }
        if !current.is_empty() {
            entries.push(current);
        }

        entries
    }

    /// Draw one key from a probability-weighted map: one uniform draw,
    /// weights accumulated in map order, first key whose cumulative sum
    /// reaches the draw. A sum above 1.0 is an error; a draw beyond the
    /// cumulative sum selects nothing.
    fn roll<'a>(
        weights: &IndexMap<&'a str, f64>,
        random: &mut dyn RandomSource,
    ) -> Result<Option<&'a str>> {
        let sum: f64 = weights.values().sum();
        if sum > 1.0 {
            return Err(ParseError::WeightOverflow(sum));
        }

        let r = random.next_double();
        let mut cumulative = 0.0;
        for (key, weight) in weights {
            cumulative += weight;
            if r <= cumulative {
                return Ok(Some(*key));
            }
        }

        Ok(None)
    }
}
