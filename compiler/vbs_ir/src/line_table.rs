//! Byte offset to line/column mapping.

use crate::Span;

/// Line start offsets for one source file.
///
/// Built once per file when a diagnostic needs positions; lookups are a
/// binary search over line starts.
///
/// ```
/// use vbs_ir::LineOffsetTable;
///
/// let source = "<%\nx = 1\n%>";
/// let table = LineOffsetTable::build(source);
/// assert_eq!(table.offset_to_line_col(source, 3), (2, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[i]` is the byte offset where line `i + 1` starts.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column); the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Position of the start of `span`.
    pub fn span_start(&self, source: &str, span: Span) -> (u32, u32) {
        self.offset_to_line_col(source, span.start)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
