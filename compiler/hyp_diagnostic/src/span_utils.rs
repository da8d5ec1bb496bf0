//! Line and column lookup for spans.
//!
//! Spans are byte offsets; users want `line:column`. For one-off lookups use
//! [`offset_to_line_col`]. When rendering many diagnostics against the same
//! source, build a [`LineOffsetTable`] once.

use hyp_ir::Span;

/// Byte offset of every line start, for O(log L) lookups.
///
/// ```
/// use hyp_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "let a = 1;\nlet b = 2;";
/// let table = LineOffsetTable::build(source);
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 15), (2, 5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[i]` is the byte offset where line `i + 1` starts.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based `(line, column)`; the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Byte offset where 1-based `line` starts.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        let idx = line.checked_sub(1)?;
        self.offsets.get(idx as usize).copied()
    }

    /// Text of 1-based `line` without its trailing newline.
    pub fn line_text<'src>(&self, source: &'src str, line: u32) -> Option<&'src str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize);
        source
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based `(line, column)` of a byte offset, scanning from the start.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, offset)
}

/// 1-based line where `span` starts.
pub fn line_number(source: &str, span: Span) -> u32 {
    let end = (span.start as usize).min(source.len());
    let newlines = source.as_bytes()[..end]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    u32::try_from(newlines).unwrap_or(u32::MAX - 1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_offset_to_line_col() {
        let source = "abc\ndefgh\nij";
        assert_eq!(offset_to_line_col(source, 0), (1, 1));
        assert_eq!(offset_to_line_col(source, 2), (1, 3));
        assert_eq!(offset_to_line_col(source, 4), (2, 1));
        assert_eq!(offset_to_line_col(source, 7), (2, 4));
        assert_eq!(offset_to_line_col(source, 10), (3, 1));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let source = "ab";
        assert_eq!(offset_to_line_col(source, 99), (1, 3));
        assert_eq!(offset_to_line_col("", 0), (1, 1));
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "\"αβ\" x";
        // 'x' is at byte 7 but character 6
        assert_eq!(offset_to_line_col(source, 7), (1, 6));
    }

    #[test]
    fn test_line_text() {
        let source = "first\r\nsecond\nthird";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_count(), 3);
        assert_eq!(table.line_text(source, 1), Some("first"));
        assert_eq!(table.line_text(source, 2), Some("second"));
        assert_eq!(table.line_text(source, 3), Some("third"));
        assert_eq!(table.line_text(source, 4), None);
        assert_eq!(table.line_text(source, 0), None);
    }

    #[test]
    fn test_line_number() {
        let source = "a\nb\nc";
        assert_eq!(line_number(source, Span::new(0, 1)), 1);
        assert_eq!(line_number(source, Span::new(4, 5)), 3);
    }
}
