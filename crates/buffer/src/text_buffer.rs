// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing

//! TextBuffer is the main public API for text storage.
//!
//! It combines a [`GapBuffer`] of UTF-16 code units with a lazily built
//! [`LineIndex`]. Every operation addresses the text by code-unit offset and
//! clamps out-of-range input instead of panicking, so a host whose idea of
//! the document is momentarily out of sync cannot corrupt it.
//!
//! Mutations:
//! 1. clamp the range,
//! 2. hand the inverse operation to the injected [`UndoRegistrar`],
//! 3. move the gap to the edit start and apply the change,
//! 4. bump the generation and drop the line index.

use std::cell::OnceCell;
use std::fmt;

use crate::gap_buffer::GapBuffer;
use crate::grapheme;
use crate::line_index::LineIndex;
use crate::types::{Affinity, EditEvent, TextPosition, TextRange};
use crate::undo::{InverseOp, UndoRegistrar};
use crate::utf16::{is_high_surrogate, is_low_surrogate};

const LINE_FEED: u16 = b'\n' as u16;

/// A gap-buffer text store with a lazily derived line index.
pub struct TextBuffer {
    buffer: GapBuffer,
    /// Built on first line query after a mutation.
    line_index: OnceCell<LineIndex>,
    /// Incremented on every applied mutation.
    generation: u64,
    undo: Option<Box<dyn UndoRegistrar>>,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self {
            buffer: GapBuffer::new(),
            line_index: OnceCell::new(),
            generation: 0,
            undo: None,
        }
    }

    /// Creates a text buffer initialized with the given content.
    ///
    /// Note: We don't implement `FromStr` because it requires returning `Result`,
    /// but loading a string into a TextBuffer cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self {
            buffer: GapBuffer::from_str(content),
            ..Self::new()
        }
    }

    /// Installs the hook that receives an inverse for every mutation.
    pub fn set_undo_registrar(&mut self, registrar: impl UndoRegistrar + 'static) {
        self.undo = Some(Box::new(registrar));
    }

    /// Removes the undo hook, returning it.
    pub fn take_undo_registrar(&mut self) -> Option<Box<dyn UndoRegistrar>> {
        self.undo.take()
    }

    // ==================== Accessors ====================

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The whole document as a `String`.
    ///
    /// Unpaired surrogates (only possible if a host split a pair with raw
    /// offsets) are replaced with U+FFFD.
    pub fn string(&self) -> String {
        self.buffer.to_string()
    }

    /// Mutation counter. Starts at 0 and never decreases.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Logical position of the gap (the last edit point).
    pub fn gap_position(&self) -> usize {
        self.buffer.gap_position()
    }

    /// Returns the text in `range`, clamped to the buffer.
    pub fn substring(&self, range: TextRange) -> String {
        let range = range.clamp_to(self.len());
        String::from_utf16_lossy(&self.buffer.slice(range.start, range.end))
    }

    /// Returns the raw code units in `range`, clamped to the buffer.
    pub fn code_units(&self, range: TextRange) -> Vec<u16> {
        let range = range.clamp_to(self.len());
        self.buffer.slice(range.start, range.end)
    }

    /// Returns the code unit at `at`.
    pub fn code_unit_at(&self, at: usize) -> Option<u16> {
        self.buffer.unit_at(at)
    }

    /// Returns the character starting at `at`.
    ///
    /// A high surrogate followed by its low half decodes to the full scalar
    /// value. An offset pointing at the low half of a pair, or at an unpaired
    /// surrogate, yields U+FFFD. Out-of-range offsets yield `None`.
    pub fn character(&self, at: usize) -> Option<char> {
        let unit = self.buffer.unit_at(at)?;
        if is_high_surrogate(unit) {
            let pair = self
                .buffer
                .unit_at(at + 1)
                .filter(|&low| is_low_surrogate(low))
                .and_then(|low| char::decode_utf16([unit, low]).next())
                .and_then(Result::ok);
            return Some(pair.unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        Some(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    // ==================== Lines ====================

    /// The line index, rebuilt if a mutation invalidated it.
    pub fn line_index(&self) -> &LineIndex {
        self.line_index.get_or_init(|| {
            tracing::trace!(len = self.len(), "rebuilding line index");
            LineIndex::build(self.buffer.units())
        })
    }

    /// Number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_index().line_count()
    }

    /// Returns the line containing `offset` (clamped to the buffer).
    pub fn line_for_offset(&self, offset: usize) -> usize {
        self.line_index().line_at_offset(offset.min(self.len()))
    }

    /// Returns the line for a position, honoring its affinity.
    ///
    /// An upstream position exactly at the start of a line belongs to the
    /// end of the previous line's break.
    pub fn line_for_position(&self, position: TextPosition) -> usize {
        let offset = position.offset.min(self.len());
        let line = self.line_for_offset(offset);
        let at_line_start = self.line_index().line_start(line) == Some(offset);
        if position.affinity == Affinity::Upstream && at_line_start && line > 0 {
            line - 1
        } else {
            line
        }
    }

    /// Returns `[start, next_start)` for `line`, including its line break.
    ///
    /// Lines past the end clamp to an empty range at the end of the buffer.
    pub fn line_range(&self, line: usize) -> TextRange {
        self.line_index()
            .line_range(line, self.len())
            .unwrap_or_else(|| TextRange::empty(self.len()))
    }

    /// Returns the content of `line` without its trailing newline.
    pub fn line_content(&self, line: usize) -> String {
        match self.line_index().line_content_range(line, self.len()) {
            Some(range) => self.substring(range),
            None => String::new(),
        }
    }

    // ==================== Graphemes ====================

    /// Returns the grapheme boundary before `offset`, never crossing into the
    /// previous line except to step over its line break.
    pub fn previous_grapheme_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        let line = self.line_range(self.line_for_offset(offset));
        if offset == line.start {
            // Step over the previous line's "\n" (or "\r\n").
            let prev = self.line_range(self.line_for_position(TextPosition::upstream(offset)));
            let text = self.substring(prev);
            return prev.start + grapheme::grapheme_boundary_left(&text, offset - prev.start);
        }
        let text = self.substring(line);
        line.start + grapheme::grapheme_boundary_left(&text, offset - line.start)
    }

    /// Returns the grapheme boundary after `offset`.
    pub fn next_grapheme_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        let line = self.line_range(self.line_for_offset(offset));
        let text = self.substring(line);
        line.start + grapheme::grapheme_boundary_right(&text, offset - line.start)
    }

    // ==================== Mutations ====================

    fn register(&mut self, op: InverseOp) {
        if let Some(undo) = self.undo.as_mut() {
            undo.register(op);
        }
    }

    fn move_gap(&mut self, to: usize) {
        let moved = self.buffer.move_gap_to(to);
        if moved > 0 {
            tracing::trace!(to, moved, "moved gap");
        }
    }

    fn finish_edit(
        &mut self,
        start: usize,
        old_end: usize,
        new_end: usize,
        lines_changed: bool,
    ) -> EditEvent {
        self.generation += 1;
        self.line_index = OnceCell::new();
        EditEvent {
            start,
            old_end,
            new_end,
            generation: self.generation,
            lines_changed,
        }
    }

    fn noop_event(&self, at: usize) -> EditEvent {
        EditEvent {
            start: at,
            old_end: at,
            new_end: at,
            generation: self.generation,
            lines_changed: false,
        }
    }

    /// Inserts `text` at `at` (clamped to the buffer length).
    pub fn insert(&mut self, text: &str, at: usize) -> EditEvent {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.insert_units(&units, at)
    }

    /// Inserts raw UTF-16 code units at `at` (clamped to the buffer length).
    ///
    /// Units need not form whole characters; this is how an inverse restores
    /// half of a surrogate pair.
    pub fn insert_units(&mut self, units: &[u16], at: usize) -> EditEvent {
        let at = at.min(self.len());
        if units.is_empty() {
            return self.noop_event(at);
        }

        let end = at + units.len();
        self.register(InverseOp::Delete {
            range: TextRange::new(at, end),
        });

        self.move_gap(at);
        self.buffer.insert_units(units);
        self.finish_edit(at, at, end, units.contains(&LINE_FEED))
    }

    /// Deletes `range` (clamped to the buffer).
    pub fn delete(&mut self, range: TextRange) -> EditEvent {
        let range = range.clamp_to(self.len());
        if range.is_empty() {
            return self.noop_event(range.start);
        }

        let removed = self.buffer.slice(range.start, range.end);
        let lines_changed = removed.contains(&LINE_FEED);
        self.register(InverseOp::Insert {
            at: range.start,
            units: removed,
        });

        self.move_gap(range.start);
        self.buffer.delete_forward(range.len());
        self.finish_edit(range.start, range.end, range.start, lines_changed)
    }

    /// Replaces `range` (clamped) with `text` using a single gap move.
    pub fn replace(&mut self, range: TextRange, text: &str) -> EditEvent {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.replace_units(range, &units)
    }

    /// Replaces `range` (clamped) with raw UTF-16 code units.
    pub fn replace_units(&mut self, range: TextRange, units: &[u16]) -> EditEvent {
        let range = range.clamp_to(self.len());
        if units.is_empty() {
            return self.delete(range);
        }
        if range.is_empty() {
            return self.insert_units(units, range.start);
        }

        let removed = self.buffer.slice(range.start, range.end);
        let new_end = range.start + units.len();
        let lines_changed = removed.contains(&LINE_FEED) || units.contains(&LINE_FEED);
        self.register(InverseOp::Replace {
            range: TextRange::new(range.start, new_end),
            units: removed,
        });

        self.move_gap(range.start);
        self.buffer.delete_forward(range.len());
        self.buffer.insert_units(units);
        self.finish_edit(range.start, range.end, new_end, lines_changed)
    }

    /// Replaces the whole document.
    pub fn set_string(&mut self, full: &str) -> EditEvent {
        let old_len = self.len();
        let new_len = crate::utf16::len_utf16(full);
        if old_len > 0 || new_len > 0 {
            let old = self.buffer.slice(0, old_len);
            self.register(InverseOp::Replace {
                range: TextRange::new(0, new_len),
                units: old,
            });
        }
        self.buffer.reset(full);
        self.finish_edit(0, old_len, new_len, true)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("len", &self.len())
            .field("gap_position", &self.gap_position())
            .field("generation", &self.generation)
            .field("has_undo_registrar", &self.undo.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_scenario() {
        let mut buf = TextBuffer::new();
        buf.insert("Hello", 0);
        assert_eq!(buf.string(), "Hello");
        buf.delete(TextRange::new(0, 5));
        assert_eq!(buf.string(), "");
    }

    #[test]
    fn test_insert_leaves_gap_after_inserted_text() {
        let mut buf = TextBuffer::from_str("ac");
        buf.insert("b", 1);
        assert_eq!(buf.gap_position(), 2);
        assert_eq!(buf.string(), "abc");
    }

    #[test]
    fn test_delete_leaves_gap_at_range_start() {
        let mut buf = TextBuffer::from_str("abcdef");
        buf.delete(TextRange::new(2, 4));
        assert_eq!(buf.gap_position(), 2);
        assert_eq!(buf.string(), "abef");
    }

    #[test]
    fn test_out_of_bounds_is_clamped() {
        let mut buf = TextBuffer::from_str("abc");
        buf.insert("!", 99);
        assert_eq!(buf.string(), "abc!");
        buf.delete(TextRange::new(2, 99));
        assert_eq!(buf.string(), "ab");
        assert_eq!(buf.substring(TextRange::new(1, 50)), "b");
        assert_eq!(buf.substring(TextRange::new(40, 50)), "");
        assert_eq!(buf.character(2), None);
    }

    #[test]
    fn test_replace() {
        let mut buf = TextBuffer::from_str("hello world");
        let event = buf.replace(TextRange::new(0, 5), "goodbye");
        assert_eq!(buf.string(), "goodbye world");
        assert_eq!(event.start, 0);
        assert_eq!(event.old_end, 5);
        assert_eq!(event.new_end, 7);
    }

    #[test]
    fn test_replace_with_empty_is_delete() {
        let mut buf = TextBuffer::from_str("hello world");
        buf.replace(TextRange::new(5, 11), "");
        assert_eq!(buf.string(), "hello");
    }

    #[test]
    fn test_generation_bumps_only_on_real_edits() {
        let mut buf = TextBuffer::from_str("abc");
        assert_eq!(buf.generation(), 0);
        buf.insert("", 0);
        assert_eq!(buf.generation(), 0);
        let event = buf.insert("x", 0);
        assert_eq!(event.generation, 1);
        assert_eq!(buf.generation(), 1);
        buf.delete(TextRange::new(0, 1));
        assert_eq!(buf.generation(), 2);
    }

    #[test]
    fn test_lines_changed_flag() {
        let mut buf = TextBuffer::from_str("ab");
        assert!(!buf.insert("x", 1).lines_changed);
        assert!(buf.insert("\n", 1).lines_changed);
        assert!(buf.delete(TextRange::new(1, 2)).lines_changed);
    }

    #[test]
    fn test_line_index_is_rebuilt_after_edit() {
        let mut buf = TextBuffer::from_str("one\ntwo");
        assert_eq!(buf.line_count(), 2);
        buf.insert("\nthree", 7);
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_content(2), "three");
        assert_eq!(buf.line_range(1), TextRange::new(4, 8));
    }

    #[test]
    fn test_line_for_position_affinity() {
        let buf = TextBuffer::from_str("ab\ncd");
        assert_eq!(buf.line_for_position(TextPosition::new(3)), 1);
        assert_eq!(buf.line_for_position(TextPosition::upstream(3)), 0);
        assert_eq!(buf.line_for_position(TextPosition::upstream(0)), 0);
        assert_eq!(buf.line_for_position(TextPosition::upstream(4)), 1);
    }

    #[test]
    fn test_line_range_past_end() {
        let buf = TextBuffer::from_str("ab\ncd");
        assert_eq!(buf.line_range(9), TextRange::empty(5));
        assert_eq!(buf.line_content(9), "");
    }

    #[test]
    fn test_character_decodes_surrogate_pairs() {
        let buf = TextBuffer::from_str("a😀b");
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.character(0), Some('a'));
        assert_eq!(buf.character(1), Some('😀'));
        assert_eq!(buf.character(2), Some(char::REPLACEMENT_CHARACTER));
        assert_eq!(buf.character(3), Some('b'));
    }

    #[test]
    fn test_set_string() {
        let mut buf = TextBuffer::from_str("old");
        let event = buf.set_string("brand\nnew");
        assert_eq!(buf.string(), "brand\nnew");
        assert_eq!(event.old_end, 3);
        assert_eq!(event.new_end, 9);
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_grapheme_navigation() {
        let buf = TextBuffer::from_str("a😀\nb");
        assert_eq!(buf.next_grapheme_boundary(1), 3);
        assert_eq!(buf.previous_grapheme_boundary(3), 1);
        // From the start of line 1, step back over the line break.
        assert_eq!(buf.previous_grapheme_boundary(4), 3);
        assert_eq!(buf.previous_grapheme_boundary(0), 0);
    }

    #[test]
    fn test_crlf_previous_boundary() {
        let buf = TextBuffer::from_str("ab\r\ncd");
        assert_eq!(buf.previous_grapheme_boundary(4), 2);
    }
}
