//! LevelZ text format exporter
//!
//! Structural inverse of the parser: serializes the header map (plus a
//! synthesized `type` entry), then groups level objects by block
//! identity into one `block: c1*c2*...` line per distinct block, and
//! terminates with the `end` sentinel. Exported text always uses
//! literal block specs; weighted groups are not preserved.

use crate::block::{Block, LevelObject};
use crate::level::Level;
use crate::parser::{END, HEADER_END};
use indexmap::IndexMap;
use std::cmp::Ordering;

type HeaderComparator = Box<dyn Fn(&(&str, &str), &(&str, &str)) -> Ordering>;
type BlockComparator = Box<dyn Fn(&LevelObject, &LevelObject) -> Ordering>;

/// Configurable level exporter.
///
/// Defaults: headers and data included, `\n` line separator, headers in
/// map order, blocks in their natural coordinate-magnitude order.
pub struct LevelExporter {
    include_headers: bool,
    include_data: bool,
    line_separator: String,
    header_comparator: Option<HeaderComparator>,
    block_comparator: Option<BlockComparator>,
}

impl Default for LevelExporter {
    fn default() -> Self {
        Self {
            include_headers: true,
            include_data: true,
            line_separator: "\n".to_string(),
            header_comparator: None,
            block_comparator: None,
        }
    }
}

impl LevelExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_headers(mut self, include: bool) -> Self {
        self.include_headers = include;
        self
    }

    pub fn include_data(mut self, include: bool) -> Self {
        self.include_data = include;
        self
    }

    pub fn line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Orders header entries in the export.
    pub fn header_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&(&str, &str), &(&str, &str)) -> Ordering + 'static,
    {
        self.header_comparator = Some(Box::new(comparator));
        self
    }

    /// Orders level objects before they are grouped into lines.
    pub fn block_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&LevelObject, &LevelObject) -> Ordering + 'static,
    {
        self.block_comparator = Some(Box::new(comparator));
        self
    }

    /// Export a level to its text form.
    pub fn export(&self, level: &Level) -> String {
        let separator = &self.line_separator;
        let mut out = String::new();

        if self.include_headers {
            let type_value = level.dimension().code().to_string();
            let mut entries: Vec<(&str, &str)> = vec![("type", type_value.as_str())];
            entries.extend(
                level
                    .headers()
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );

            if let Some(comparator) = &self.header_comparator {
                entries.sort_by(|a, b| comparator(a, b));
            }

            for (key, value) in entries {
                out.push('@');
                out.push_str(key);
                out.push(' ');
                out.push_str(value);
                out.push_str(separator);
            }

            out.push_str(HEADER_END);
            out.push_str(separator);
        }

        if self.include_data {
            let mut objects: Vec<&LevelObject> = level.blocks().iter().collect();
            match &self.block_comparator {
                Some(comparator) => objects.sort_by(|a, b| comparator(a, b)),
                None => objects.sort_by(|a, b| a.coordinate().cmp(&b.coordinate())),
            }

            // one line per distinct block, coordinates in sorted-pass order
            let mut grouped: IndexMap<&Block, String> = IndexMap::new();
            for object in objects {
                let coordinate = object.coordinate().to_string();
                grouped
                    .entry(object.block())
                    .and_modify(|line| {
                        line.push('*');
                        line.push_str(&coordinate);
                    })
                    .or_insert(coordinate);
            }

            for (block, coordinates) in grouped {
                out.push_str(&block.to_literal());
                out.push_str(": ");
                out.push_str(&coordinates);
                out.push_str(separator);
            }
        }

        out.push_str(END);
        out
    }
}

/// Export a level with default settings.
pub fn export_level(level: &Level) -> String {
    LevelExporter::new().export(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LevelParser;

    const SAMPLE: &str = "@type 2\n@spawn default\n---\ngrass: [0,0]*[1,0]\nstone<solid=true>: [2,2]\nend";

    #[test]
    fn test_export_text_form() {
        let level = LevelParser::parse_str(SAMPLE).unwrap();
        let text = export_level(&level);

        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(
            lines,
            vec![
                "@type 2",
                "@spawn [0, 0]",
                "@scroll none",
                "---",
                "grass: [0, 0]*[1, 0]",
                "stone<solid=true>: [2, 2]",
                "end",
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let level = LevelParser::parse_str(SAMPLE).unwrap();
        let reparsed = LevelParser::parse_str(&export_level(&level)).unwrap();
        assert_eq!(reparsed, level);
    }

    #[test]
    fn test_round_trip_3d() {
        let data = "@type 3\n@spawn [0, 10, 0]\n---\nstone: (0,2,0,2,0,1)^[0,0,0]\nmagma<temp=0.3>: [4,4,4]\nend";
        let level = LevelParser::parse_str(data).unwrap();
        let reparsed = LevelParser::parse_str(&export_level(&level)).unwrap();
        assert_eq!(reparsed, level);
    }

    #[test]
    fn test_headers_only() {
        let level = LevelParser::parse_str(SAMPLE).unwrap();
        let text = LevelExporter::new().include_data(false).export(&level);

        assert!(text.contains("@type 2"));
        assert!(text.contains("---"));
        assert!(!text.contains("grass"));
        assert!(text.ends_with("end"));
    }

    #[test]
    fn test_data_only() {
        let level = LevelParser::parse_str(SAMPLE).unwrap();
        let text = LevelExporter::new().include_headers(false).export(&level);

        assert!(!text.contains("@type"));
        assert!(!text.contains("---"));
        assert!(text.contains("grass: [0, 0]*[1, 0]"));
        assert!(text.ends_with("end"));
    }

    #[test]
    fn test_custom_line_separator() {
        let level = LevelParser::parse_str(SAMPLE).unwrap();
        let text = LevelExporter::new().line_separator("\r\n").export(&level);

        assert!(text.contains("@type 2\r\n"));
        assert!(text.ends_with("\r\nend"));
    }

    #[test]
    fn test_header_comparator() {
        let level = LevelParser::parse_str(SAMPLE).unwrap();
        let text = LevelExporter::new()
            .header_comparator(|a, b| a.0.cmp(b.0))
            .export(&level);

        let scroll = text.find("@scroll").unwrap();
        let spawn = text.find("@spawn").unwrap();
        let type_at = text.find("@type").unwrap();
        assert!(scroll < spawn && spawn < type_at);
    }

    #[test]
    fn test_block_comparator() {
        let level = LevelParser::parse_str(SAMPLE).unwrap();
        let text = LevelExporter::new()
            .block_comparator(|a, b| b.coordinate().cmp(&a.coordinate()))
            .export(&level);

        // reversed order puts the far coordinate first
        assert!(text.contains("grass: [1, 0]*[0, 0]"));
    }

    #[test]
    fn test_coordinate_order_deterministic() {
        let level = LevelParser::parse_str(SAMPLE).unwrap();
        let first = export_level(&level);
        let second = export_level(&level);
        assert_eq!(first, second);
    }
}
