//! Byte-offset to line/column conversion for diagnostic consumers.

use text_size::{TextRange, TextSize};

/// Pre-computed start offsets of every line in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

/// A zero-based line/column pair. Columns count bytes from the line start.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub row: u32,
    pub column: u32,
}

impl LineIndex {
    pub fn from_source_text(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 40 + 1);
        line_starts.push(TextSize::from(0));

        for offset in memchr::memchr_iter(b'\n', text.as_bytes()) {
            #[allow(clippy::cast_possible_truncation)]
            line_starts.push(TextSize::from(offset as u32 + 1));
        }

        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The zero-based line containing `offset`.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => u32::try_from(line).unwrap_or(u32::MAX),
            Err(next) => u32::try_from(next - 1).unwrap_or(u32::MAX),
        }
    }

    pub fn source_location(&self, offset: TextSize) -> SourceLocation {
        let row = self.line_of(offset);
        let line_start = self.line_starts[row as usize];
        SourceLocation {
            row,
            column: (offset - line_start).into(),
        }
    }

    /// Converts a range to its start and end locations.
    pub fn locate(&self, range: TextRange) -> (SourceLocation, SourceLocation) {
        (
            self.source_location(range.start()),
            self.source_location(range.end()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_has_one_line() {
        let index = LineIndex::from_source_text("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(
            index.source_location(TextSize::from(0)),
            SourceLocation { row: 0, column: 0 }
        );
    }

    #[test]
    fn offsets_map_to_rows_and_columns() {
        let index = LineIndex::from_source_text("x = 1\ny = 2\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(
            index.source_location(TextSize::from(4)),
            SourceLocation { row: 0, column: 4 }
        );
        assert_eq!(
            index.source_location(TextSize::from(6)),
            SourceLocation { row: 1, column: 0 }
        );
        assert_eq!(
            index.source_location(TextSize::from(11)),
            SourceLocation { row: 1, column: 5 }
        );
    }

    #[test]
    fn offset_at_newline_belongs_to_its_line() {
        let index = LineIndex::from_source_text("a\nb");
        assert_eq!(
            index.source_location(TextSize::from(1)),
            SourceLocation { row: 0, column: 1 }
        );
        assert_eq!(
            index.source_location(TextSize::from(2)),
            SourceLocation { row: 1, column: 0 }
        );
    }
}
