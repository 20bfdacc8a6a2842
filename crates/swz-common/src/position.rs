//! Line/column utilities.
//!
//! Diagnostics are reported with 1-based line and column numbers, while the
//! scanner and AST work in 0-based byte offsets. `LineMap` converts between
//! the two.

use serde::Serialize;

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl LineCol {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line map for offset -> line/column conversion.
/// Stores the starting byte offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line; `line_starts[0]` is always 0.
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    #[must_use]
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based line/column pair.
    ///
    /// Columns count characters, not bytes.
    #[must_use]
    pub fn line_col(&self, offset: u32, source: &str) -> LineCol {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = (self.line_starts[line] as usize).min(source.len());
        let end = (offset as usize).min(source.len());
        let column = source
            .get(line_start..end)
            .map_or(0, |s| s.chars().count());
        LineCol::new(
            u32::try_from(line + 1).unwrap_or(u32::MAX),
            u32::try_from(column + 1).unwrap_or(u32::MAX),
        )
    }

    /// Get the number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_is_one_based() {
        let src = "let a = 1\nlet b = 2\n";
        let map = LineMap::build(src);
        assert_eq!(map.line_col(0, src), LineCol::new(1, 1));
        assert_eq!(map.line_col(4, src), LineCol::new(1, 5));
    }

    #[test]
    fn offsets_past_newline_land_on_next_line() {
        let src = "let a = 1\nlet b = 2\n";
        let map = LineMap::build(src);
        assert_eq!(map.line_col(10, src), LineCol::new(2, 1));
        assert_eq!(map.line_col(14, src), LineCol::new(2, 5));
        assert_eq!(map.line_count(), 3);
    }

    #[test]
    fn multibyte_characters_count_as_one_column() {
        let src = "héllo = 1";
        let map = LineMap::build(src);
        // 'h' is 1 byte, 'é' is 2 bytes; the 'l' at byte 3 is column 3.
        assert_eq!(map.line_col(3, src), LineCol::new(1, 3));
    }
}
