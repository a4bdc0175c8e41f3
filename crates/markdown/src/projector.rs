// Chunk: docs/chunks/style_projection - Cursor-conditional markup visibility

//! Style projection.
//!
//! The projector turns the tokenizer's matches into styled ranges for the
//! host. It caches one parse per buffer generation: an edit forces a full
//! re-parse on the next query, while cursor movement only reclassifies
//! syntax ranges as hidden or muted.
//!
//! # Visibility rule
//!
//! A match's syntax ranges are [`SyntaxVisibility::VisibleMuted`] when the
//! cursor lies in `[range.start, range.end]` (both ends inclusive) and
//! [`SyntaxVisibility::Hidden`] otherwise. Content always gets its category
//! style.

use markpad_buffer::{Style, TextBuffer, TextRange};
use tracing::debug;

use crate::category::Category;
use crate::theme::MarkdownTheme;
use crate::tokenizer::{MarkdownMatch, MarkdownTokenizer};

/// How revealed or collapsed a syntax range is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxVisibility {
    /// Zero visual footprint; the text still occupies buffer offsets.
    Hidden,
    /// Shown with the theme's muted markup style.
    VisibleMuted,
}

/// What part of a match a styled range covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Content,
    Syntax(SyntaxVisibility),
    ListMarker,
}

/// One range with the attributes the host should apply.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRange {
    pub range: TextRange,
    pub role: Role,
    pub category: Category,
    pub style: Style,
}

/// Returns the visibility of `m`'s syntax ranges with the cursor at `cursor`.
pub fn visibility_for(m: &MarkdownMatch, cursor: usize) -> SyntaxVisibility {
    if m.range.contains_inclusive(cursor) {
        SyntaxVisibility::VisibleMuted
    } else {
        SyntaxVisibility::Hidden
    }
}

#[derive(Debug)]
struct ParsedSnapshot {
    generation: u64,
    matches: Vec<MarkdownMatch>,
}

/// Cursor-aware projection of markdown matches onto styles.
#[derive(Debug)]
pub struct StyleProjector {
    tokenizer: &'static MarkdownTokenizer,
    theme: MarkdownTheme,
    snapshot: Option<ParsedSnapshot>,
    cursor: usize,
    parse_count: u64,
}

impl StyleProjector {
    /// Creates a projector using the shared tokenizer.
    pub fn new(theme: MarkdownTheme) -> Self {
        Self::with_tokenizer(MarkdownTokenizer::shared(), theme)
    }

    pub fn with_tokenizer(tokenizer: &'static MarkdownTokenizer, theme: MarkdownTheme) -> Self {
        Self {
            tokenizer,
            theme,
            snapshot: None,
            cursor: 0,
            parse_count: 0,
        }
    }

    pub fn theme(&self) -> &MarkdownTheme {
        &self.theme
    }

    /// Replaces the theme. Cached matches stay valid.
    pub fn set_theme(&mut self, theme: MarkdownTheme) {
        self.theme = theme;
    }

    /// Drops the cached parse.
    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            debug!("style projector cache invalidated");
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Records the cursor. Returns true if it moved.
    pub fn set_cursor(&mut self, cursor: usize) -> bool {
        let moved = self.cursor != cursor;
        self.cursor = cursor;
        moved
    }

    /// Number of full parses performed so far.
    pub fn parse_count(&self) -> u64 {
        self.parse_count
    }

    /// True if the cache holds a parse of `generation`.
    pub fn is_fresh(&self, generation: u64) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.generation == generation)
    }

    fn ensure_parsed(&mut self, buffer: &TextBuffer) -> &[MarkdownMatch] {
        let generation = buffer.generation();
        if !self.is_fresh(generation) {
            let matches = self.tokenizer.parse(&buffer.string());
            debug!(generation, matches = matches.len(), "re-parsed document");
            self.parse_count += 1;
            self.snapshot = Some(ParsedSnapshot { generation, matches });
        }
        match &self.snapshot {
            Some(snapshot) => &snapshot.matches,
            None => &[],
        }
    }

    /// The matches for `buffer`'s current contents.
    pub fn matches(&mut self, buffer: &TextBuffer) -> &[MarkdownMatch] {
        self.ensure_parsed(buffer)
    }

    /// The cached matches, without parsing.
    pub fn cached_matches(&self) -> Option<&[MarkdownMatch]> {
        self.snapshot.as_ref().map(|snapshot| snapshot.matches.as_slice())
    }

    /// The link or image containing `offset`, if any.
    pub fn link_at(&mut self, buffer: &TextBuffer, offset: usize) -> Option<&MarkdownMatch> {
        self.ensure_parsed(buffer)
            .iter()
            .find(|m| m.category.has_url() && m.range.contains(offset))
    }

    /// URLs of every link and image, in document order.
    pub fn urls(&mut self, buffer: &TextBuffer) -> Vec<String> {
        self.ensure_parsed(buffer)
            .iter()
            .filter_map(|m| m.url.clone())
            .collect()
    }

    /// Computes styled ranges with the cursor at `cursor`.
    ///
    /// Ranges are sorted by start. Re-parses only if `buffer` changed since
    /// the last query.
    pub fn compute_styles(&mut self, buffer: &TextBuffer, cursor: usize) -> Vec<StyledRange> {
        self.set_cursor(cursor);
        self.ensure_parsed(buffer);
        let matches = self.cached_matches().unwrap_or_default();
        let mut styled = project(matches, cursor, &self.theme);
        styled.sort_by_key(|s| (s.range.start, s.range.end));
        styled
    }
}

impl Default for StyleProjector {
    fn default() -> Self {
        Self::new(MarkdownTheme::default())
    }
}

/// Projects `matches` with the cursor at `cursor`.
pub fn project(
    matches: &[MarkdownMatch],
    cursor: usize,
    theme: &MarkdownTheme,
) -> Vec<StyledRange> {
    let mut styled = Vec::with_capacity(matches.len() * 3);
    for m in matches {
        let style = theme.style_for(m.category);

        if m.category.is_list_marker() {
            styled.push(StyledRange {
                range: m.range,
                role: Role::ListMarker,
                category: m.category,
                style,
            });
            continue;
        }

        if !m.content_range.is_empty() {
            styled.push(StyledRange {
                range: m.content_range,
                role: Role::Content,
                category: m.category,
                style,
            });
        }

        let visibility = visibility_for(m, cursor);
        let syntax_style = match visibility {
            SyntaxVisibility::Hidden => Style::hidden(),
            SyntaxVisibility::VisibleMuted => theme.syntax_style(),
        };
        styled.extend(m.syntax_ranges.iter().map(|&range| StyledRange {
            range,
            role: Role::Syntax(visibility),
            category: m.category,
            style: syntax_style,
        }));
    }
    styled
}
