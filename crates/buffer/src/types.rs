// Chunk: docs/chunks/text_buffer - Offsets, ranges and edit events

//! Shared position and range types.
//!
//! Every offset in markpad is a UTF-16 code-unit offset. Hosts that work in
//! grapheme clusters or bytes convert at the boundary (see [`crate::utf16`]
//! and [`crate::grapheme`]).

use std::fmt;

/// Which side of a boundary an offset belongs to.
///
/// An offset sitting right after a `\n` is both "the end of the line break"
/// and "the start of the next line". `Upstream` picks the former,
/// `Downstream` (the default) the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Affinity {
    Upstream,
    #[default]
    Downstream,
}

/// A code-unit offset with a directional affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TextPosition {
    pub offset: usize,
    pub affinity: Affinity,
}

impl TextPosition {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            affinity: Affinity::Downstream,
        }
    }

    pub fn upstream(offset: usize) -> Self {
        Self {
            offset,
            affinity: Affinity::Upstream,
        }
    }
}

/// A half-open range `[start, end)` of code-unit offsets.
///
/// Constructors normalize reversed bounds so `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Creates a range from a start offset and a length.
    pub fn from_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start.saturating_add(len),
        }
    }

    /// An empty range at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `offset` is in `[start, end)`.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// True if `offset` is in `[start, end]`.
    ///
    /// Used for cursor containment: a cursor sitting right after the closing
    /// delimiter still counts as "inside" the construct.
    pub fn contains_inclusive(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// True if the two ranges share at least one code unit.
    ///
    /// Adjacent ranges (`a.end == b.start`) do not overlap. An empty range
    /// overlaps nothing.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// True if the ranges overlap or touch, treating empty ranges as points.
    pub fn intersects(&self, other: &TextRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Clamps both ends into `[0, len]`.
    pub fn clamp_to(&self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }

    /// Shifts the range by `delta` code units toward the end of the text.
    pub fn offset_by(&self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl From<std::ops::Range<usize>> for TextRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<TextRange> for std::ops::Range<usize> {
    fn from(range: TextRange) -> Self {
        range.start..range.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// Chunk: docs/chunks/edit_events - Edit events returned by buffer mutations
/// Describes one applied mutation, in code units.
///
/// The old content occupied `[start, old_end)`; the new content occupies
/// `[start, new_end)`. `generation` is the buffer generation *after* the
/// edit, so caches keyed on it can tell they are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
    pub generation: u64,
    /// True if a line break was removed or inserted.
    pub lines_changed: bool,
}

impl EditEvent {
    /// Returns true if the edit did not change the text.
    pub fn is_noop(&self) -> bool {
        self.start == self.old_end && self.start == self.new_end
    }

    /// Net change in document length.
    pub fn delta(&self) -> isize {
        self.new_end as isize - self.old_end as isize
    }
}

// Chunk: docs/chunks/insertion_payloads - Typed insertion payloads
/// What is being inserted, and where it came from.
///
/// Hosts route keystrokes, pastes and accepted completions through the same
/// insertion path; the variant lets them treat each differently (for
/// example, coalescing typed characters into one undo step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// Characters typed by the user.
    Typed(String),
    /// A clipboard paste or drop.
    Pasted(String),
    /// The suffix of an accepted word suggestion.
    Suggestion { suffix: String },
}

impl Insertion {
    /// The text this insertion writes into the buffer.
    pub fn text(&self) -> &str {
        match self {
            Insertion::Typed(text) | Insertion::Pasted(text) => text,
            Insertion::Suggestion { suffix } => suffix,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}
