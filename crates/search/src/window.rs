// Chunk: docs/chunks/search_window - Viewport windowing for match highlights

//! Viewport windowing.
//!
//! Only matches near the viewport are highlighted. The viewport is padded by
//! half its length on each side, and the windowed subset is recomputed only
//! when the viewport start moves past a threshold or its length changes.
//! Small scrolls keep the previous window.

use std::ops::Range;

use markpad_buffer::TextRange;

/// Default fraction of the viewport length a scroll must exceed.
pub const DEFAULT_THRESHOLD_RATIO: f32 = 0.25;

/// Pads `viewport` by half its length on each side, clamped to `[0, doc_len]`.
pub fn expand_viewport(viewport: TextRange, doc_len: usize) -> TextRange {
    let pad = viewport.len() / 2;
    let start = viewport.start.saturating_sub(pad).min(doc_len);
    let end = viewport.end.saturating_add(pad).min(doc_len);
    TextRange::new(start, end)
}

/// Indices of `matches` (sorted, disjoint) that overlap `window`.
pub fn matches_in(matches: &[TextRange], window: TextRange) -> Range<usize> {
    let first = matches.partition_point(|m| m.end <= window.start);
    let last = matches.partition_point(|m| m.start < window.end);
    first..last.max(first)
}

/// Tracks the last viewport a window was computed for.
#[derive(Debug, Clone)]
pub struct ViewportWindow {
    threshold_ratio: f32,
    last_viewport: Option<TextRange>,
    expanded: TextRange,
    indices: Range<usize>,
}

impl ViewportWindow {
    pub fn new(threshold_ratio: f32) -> Self {
        Self {
            threshold_ratio,
            last_viewport: None,
            expanded: TextRange::default(),
            indices: 0..0,
        }
    }

    /// Minimum start movement, in code units, that triggers a recompute.
    pub fn threshold_for(&self, viewport_len: usize) -> usize {
        ((viewport_len as f32 * self.threshold_ratio) as usize).max(1)
    }

    /// True if `viewport` differs enough from the last one to recompute.
    pub fn needs_recompute(&self, viewport: TextRange) -> bool {
        match self.last_viewport {
            None => true,
            Some(last) => {
                last.len() != viewport.len()
                    || last.start.abs_diff(viewport.start) > self.threshold_for(viewport.len())
            }
        }
    }

    /// Recomputes the window for `viewport` over `matches`.
    pub fn recompute(&mut self, viewport: TextRange, doc_len: usize, matches: &[TextRange]) {
        self.expanded = expand_viewport(viewport, doc_len);
        self.indices = matches_in(matches, self.expanded);
        self.last_viewport = Some(viewport);
    }

    /// Forgets the last viewport so the next query recomputes.
    pub fn reset(&mut self) {
        self.last_viewport = None;
        self.indices = 0..0;
    }

    pub fn expanded(&self) -> TextRange {
        self.expanded
    }

    /// Match indices inside the current window.
    pub fn indices(&self) -> Range<usize> {
        self.indices.clone()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn threshold_ratio(&self) -> f32 {
        self.threshold_ratio
    }
}

impl Default for ViewportWindow {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_RATIO)
    }
}
