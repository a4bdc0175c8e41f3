// Chunk: docs/chunks/find_in_document - Whole-document match list and navigation

//! Whole-document search.
//!
//! A query is scanned once over the full document, producing every
//! case-insensitive, non-overlapping, leftmost occurrence as UTF-16 ranges.
//! The result persists across cursor and viewport moves; only a new query or
//! a buffer edit throws it away. Highlights are handed out per viewport
//! through [`SearchIndex::visible_matches`].

use markpad_buffer::utf16::Utf16Map;
use markpad_buffer::{TextBuffer, TextRange};
use regex::RegexBuilder;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::highlight_pool::{Highlight, HighlightPool, DEFAULT_POOL_CAPACITY};
use crate::window::{ViewportWindow, DEFAULT_THRESHOLD_RATIO};

// =============================================================================
// Scanning
// =============================================================================

/// Finds every case-insensitive occurrence of the literal `query` in `text`.
///
/// Matches are leftmost-first and never overlap. An empty query finds nothing.
pub fn find_matches(text: &str, query: &str) -> Result<Vec<TextRange>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let regex = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|source| SearchError::Query {
            query: query.to_string(),
            source,
        })?;

    let map = Utf16Map::new(text);
    Ok(regex
        .find_iter(text)
        .map(|m| TextRange::new(map.to_utf16(m.start()), map.to_utf16(m.end())))
        .collect())
}

/// The outcome of scanning one document snapshot for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub query: String,
    pub matches: Vec<TextRange>,
    pub complete: bool,
    /// Buffer generation the scan ran against.
    pub generation: u64,
}

/// Scans `text` for `query`, degrading to no matches if the query is unusable.
pub fn search(text: &str, query: &str, generation: u64) -> SearchResult {
    let matches = find_matches(text, query).unwrap_or_else(|err| {
        warn!(error = %err, "search query rejected");
        Vec::new()
    });
    debug!(query, count = matches.len(), generation, "search complete");
    SearchResult {
        query: query.to_string(),
        matches,
        complete: true,
        generation,
    }
}

/// Wraps `current + delta` into `[0, count)`. Returns `None` when there are
/// no matches.
pub fn wrap_index(current: usize, delta: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let count = count as i128;
    Some((current as i128 + delta as i128).rem_euclid(count) as usize)
}

// =============================================================================
// Index
// =============================================================================

/// Where navigating to a match should put the selection and the scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub index: usize,
    pub selection: TextRange,
    /// Offset the host should scroll into view.
    pub scroll_to: usize,
}

/// What a [`SearchIndex::visible_matches`] call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowUpdate {
    /// The windowed subset was rebuilt.
    Recomputed,
    /// Only the emphasized highlight changed.
    EmphasisOnly,
    Unchanged,
}

/// Highlights for the current viewport.
#[derive(Debug)]
pub struct VisibleMatches<'a> {
    pub update: WindowUpdate,
    pub highlights: &'a [Highlight],
}

/// Tunables for [`SearchIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    pub pool_capacity: usize,
    pub threshold_ratio: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

/// The match set for one query plus its viewport window.
#[derive(Debug)]
pub struct SearchIndex {
    query: String,
    matches: Vec<TextRange>,
    complete: bool,
    generation: Option<u64>,
    current: Option<usize>,
    emphasized: Option<usize>,
    window: ViewportWindow,
    window_dirty: bool,
    pool: HighlightPool,
    highlights: Vec<Highlight>,
}

impl SearchIndex {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            query: String::new(),
            matches: Vec::new(),
            complete: true,
            generation: None,
            current: None,
            emphasized: None,
            window: ViewportWindow::new(options.threshold_ratio),
            window_dirty: true,
            pool: HighlightPool::new(options.pool_capacity),
            highlights: Vec::new(),
        }
    }

    /// Sets the query and scans `buffer` synchronously. Returns the count.
    ///
    /// Re-setting the same query against an unchanged buffer keeps the
    /// current result.
    pub fn set_query(&mut self, buffer: &TextBuffer, query: &str) -> usize {
        if query == self.query && self.is_fresh(buffer.generation()) {
            return self.match_count();
        }
        let result = search(&buffer.string(), query, buffer.generation());
        self.begin_query(query);
        self.install(result);
        self.match_count()
    }

    /// Sets the query without scanning, for results computed elsewhere.
    ///
    /// The index is empty and incomplete until [`apply_result`](Self::apply_result).
    pub fn begin_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.matches.clear();
        self.complete = query.is_empty();
        self.generation = None;
        self.current = None;
        self.window_dirty = true;
    }

    /// Installs a result computed off the owning thread.
    ///
    /// Results for another query, or for a generation other than
    /// `current_generation`, are stale and dropped. Returns whether the
    /// result was installed.
    pub fn apply_result(&mut self, result: SearchResult, current_generation: u64) -> bool {
        if result.generation != current_generation || result.query != self.query {
            debug!(
                result_generation = result.generation,
                current_generation, "discarding stale search result"
            );
            return false;
        }
        self.install(result);
        true
    }

    fn install(&mut self, result: SearchResult) {
        self.matches = result.matches;
        self.complete = result.complete;
        self.generation = Some(result.generation);
        self.current = None;
        self.window_dirty = true;
    }

    /// Drops the result if it was not computed for `generation`.
    pub fn invalidate(&mut self, generation: u64) {
        if self.generation.is_some_and(|g| g == generation) {
            return;
        }
        if !self.matches.is_empty() {
            debug!(generation, "search results invalidated by edit");
        }
        self.matches.clear();
        self.complete = self.query.is_empty();
        self.generation = None;
        self.current = None;
        self.window_dirty = true;
    }

    /// Re-scans `buffer` if the result is stale. Returns true if it scanned.
    pub fn refresh(&mut self, buffer: &TextBuffer) -> bool {
        if self.query.is_empty() || self.is_fresh(buffer.generation()) {
            return false;
        }
        let result = search(&buffer.string(), &self.query, buffer.generation());
        self.install(result);
        true
    }

    fn is_fresh(&self, generation: u64) -> bool {
        self.generation == Some(generation)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[TextRange] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Generation the current result was computed for.
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Index of the emphasized match.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Selects match `index`. Callers wrap with [`wrap_index`].
    pub fn navigate_to_match(&mut self, index: usize) -> Result<Navigation, SearchError> {
        let count = self.match_count();
        let selection = *self
            .matches
            .get(index)
            .ok_or(SearchError::IndexOutOfRange { index, count })?;
        self.current = Some(index);
        Ok(Navigation {
            index,
            selection,
            scroll_to: selection.start,
        })
    }

    /// Steps `delta` matches from the current one, wrapping around.
    ///
    /// With no current match, a forward step lands on the first match and a
    /// backward step on the last.
    pub fn navigate_relative(&mut self, delta: isize) -> Result<Navigation, SearchError> {
        let count = self.match_count();
        let index = match self.current {
            Some(current) => wrap_index(current, delta, count),
            None if delta >= 0 => wrap_index(0, delta.saturating_sub(1), count),
            None => wrap_index(0, delta, count),
        }
        .ok_or(SearchError::IndexOutOfRange { index: 0, count })?;
        self.navigate_to_match(index)
    }

    /// Index of the first match starting at or after `offset`, wrapping to
    /// the first match.
    pub fn first_match_from(&self, offset: usize) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let index = self.matches.partition_point(|m| m.start < offset);
        Some(if index == self.matches.len() { 0 } else { index })
    }

    /// Highlights for matches around `viewport`.
    ///
    /// The window is rebuilt when the viewport moved past the threshold, its
    /// length changed, or the result changed. Otherwise only the emphasized
    /// flag is patched in place.
    pub fn visible_matches(&mut self, viewport: TextRange, doc_len: usize) -> VisibleMatches<'_> {
        let viewport = viewport.clamp_to(doc_len);

        let update = if self.window_dirty || self.window.needs_recompute(viewport) {
            self.pool.release(self.highlights.drain(..));
            self.window.recompute(viewport, doc_len, &self.matches);
            for index in self.window.indices() {
                let emphasized = self.current == Some(index);
                self.highlights
                    .push(self.pool.acquire(self.matches[index], index, emphasized));
            }
            self.window_dirty = false;
            self.emphasized = self.current;
            debug!(
                window = %self.window.expanded(),
                highlights = self.highlights.len(),
                "search window recomputed"
            );
            WindowUpdate::Recomputed
        } else if self.emphasized != self.current {
            for highlight in &mut self.highlights {
                highlight.emphasized = self.current == Some(highlight.match_index);
            }
            self.emphasized = self.current;
            WindowUpdate::EmphasisOnly
        } else {
            WindowUpdate::Unchanged
        };

        VisibleMatches {
            update,
            highlights: &self.highlights,
        }
    }

    pub fn pool(&self) -> &HighlightPool {
        &self.pool
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}
