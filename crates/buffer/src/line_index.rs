// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing

//! Line-start index derived from the buffer content.
//!
//! The index is a pure cache: it is rebuilt from scratch with a single linear
//! scan whenever the buffer changes, never patched incrementally.

use crate::types::TextRange;

const LINE_FEED: u16 = b'\n' as u16;

/// Tracks line boundaries in a text buffer.
///
/// `line_starts[i]` is the code-unit offset where line `i` starts. Line `i`
/// spans `[line_starts[i], line_starts[i + 1])`, including its line break;
/// the last line runs to the end of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Strictly increasing. `line_starts[0] == 0` always.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a line index with a single empty line.
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Builds an index from the given code units.
    pub fn build<I>(content: I) -> Self
    where
        I: IntoIterator<Item = u16>,
    {
        let mut index = Self::new();
        index.rebuild(content);
        index
    }

    /// Rebuilds the index from the given code units.
    ///
    /// O(n) in the content length.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = u16>,
    {
        self.line_starts.clear();
        self.line_starts.push(0);

        let mut offset = 0;
        for unit in content {
            offset += 1;
            if unit == LINE_FEED {
                self.line_starts.push(offset);
            }
        }
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the offset where `line` starts, or None if out of bounds.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns `[start, next_start)` for `line`, or `[start, total_len)` for
    /// the last line. The range includes the trailing line break.
    pub fn line_range(&self, line: usize, total_len: usize) -> Option<TextRange> {
        let start = self.line_start(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(total_len);
        Some(TextRange::new(start, end.max(start)))
    }

    /// Returns the range of `line` without its trailing `\n`.
    pub fn line_content_range(&self, line: usize, total_len: usize) -> Option<TextRange> {
        let range = self.line_range(line, total_len)?;
        if line + 1 < self.line_count() {
            Some(TextRange::new(range.start, range.end - 1))
        } else {
            Some(range)
        }
    }

    /// Returns the line containing `offset`.
    ///
    /// Binary search for the largest line start `<= offset`. Offsets past the
    /// end resolve to the last line.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Returns the raw line starts.
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
