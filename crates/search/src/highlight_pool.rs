// Chunk: docs/chunks/highlight_pool - Bounded recycle pool for match highlights

//! Recycled highlight spans.
//!
//! Highly matching documents redraw hundreds of highlights per scroll. The
//! pool hands out released spans before allocating new ones, and keeps at
//! most `capacity` spare spans; past that the oldest spares are dropped.

use std::collections::VecDeque;

use markpad_buffer::TextRange;

/// Default number of spare highlights retained.
pub const DEFAULT_POOL_CAPACITY: usize = 200;

/// One highlighted match as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub range: TextRange,
    /// Index into the full match list.
    pub match_index: usize,
    /// True for the current match.
    pub emphasized: bool,
}

/// Bounded pool of reusable [`Highlight`]s.
#[derive(Debug)]
pub struct HighlightPool {
    spare: VecDeque<Highlight>,
    capacity: usize,
    allocated: usize,
    reused: usize,
}

impl HighlightPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            spare: VecDeque::with_capacity(capacity),
            capacity,
            allocated: 0,
            reused: 0,
        }
    }

    /// Returns a highlight for `range`, reusing a spare if one exists.
    pub fn acquire(&mut self, range: TextRange, match_index: usize, emphasized: bool) -> Highlight {
        match self.spare.pop_back() {
            Some(mut highlight) => {
                self.reused += 1;
                highlight.range = range;
                highlight.match_index = match_index;
                highlight.emphasized = emphasized;
                highlight
            }
            None => {
                self.allocated += 1;
                Highlight {
                    range,
                    match_index,
                    emphasized,
                }
            }
        }
    }

    /// Returns highlights to the pool, trimming the oldest spares past capacity.
    pub fn release(&mut self, highlights: impl IntoIterator<Item = Highlight>) {
        self.spare.extend(highlights);
        while self.spare.len() > self.capacity {
            self.spare.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Spare highlights currently held.
    pub fn spare_len(&self) -> usize {
        self.spare.len()
    }

    /// Highlights created fresh since the pool was built.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Highlights served from spares since the pool was built.
    pub fn reused(&self) -> usize {
        self.reused
    }
}

impl Default for HighlightPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}
