// Chunk: docs/chunks/markdown_tokenizer - Priority-ordered greedy interval acceptance

//! Markdown tokenizer.
//!
//! Parsing is a single pass per rule over the whole document. A candidate is
//! accepted unless it overlaps something an earlier rule already accepted, so
//! category priority decides conflicts, never position in the text. The
//! accepted set is sorted by start before it is returned.
//!
//! All ranges are UTF-16 code-unit offsets.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use markpad_buffer::utf16::Utf16Map;
use markpad_buffer::TextRange;
use tracing::{debug, warn};

use crate::category::Category;
use crate::error::TokenizerError;
use crate::patterns::{CompiledRule, PatternSet, Shape};

/// One recognized markdown construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownMatch {
    /// The whole construct, markup included.
    pub range: TextRange,
    /// The payload shown to the reader.
    pub content_range: TextRange,
    pub category: Category,
    /// Markup to hide or reveal. Empty for list markers.
    pub syntax_ranges: Vec<TextRange>,
    /// Target of a link or image.
    pub url: Option<String>,
}

// =============================================================================
// Interval acceptance
// =============================================================================

/// A set of pairwise non-overlapping ranges keyed by start.
#[derive(Debug, Default)]
pub struct AcceptedIntervals {
    by_start: BTreeMap<usize, usize>,
}

impl AcceptedIntervals {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `range` shares at least one code unit with an accepted range.
    pub fn overlaps(&self, range: TextRange) -> bool {
        // Ranges are disjoint, so the last one starting before `range.end`
        // has the largest end among all candidates.
        self.by_start
            .range(..range.end)
            .next_back()
            .is_some_and(|(_, &end)| end > range.start)
    }

    /// Accepts `range` unless it overlaps. Returns whether it was accepted.
    pub fn try_accept(&mut self, range: TextRange) -> bool {
        if range.is_empty() || self.overlaps(range) {
            return false;
        }
        self.by_start.insert(range.start, range.end);
        true
    }

    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }
}

// =============================================================================
// Tokenizer
// =============================================================================

static SHARED: LazyLock<MarkdownTokenizer> = LazyLock::new(|| match MarkdownTokenizer::new() {
    Ok(tokenizer) => tokenizer,
    Err(err) => panic!("built-in markdown rules are broken: {err}"),
});

/// Stateless markdown tokenizer over a compiled [`PatternSet`].
#[derive(Debug)]
pub struct MarkdownTokenizer {
    patterns: PatternSet,
}

impl MarkdownTokenizer {
    /// Builds a tokenizer from the built-in rules.
    pub fn new() -> Result<Self, TokenizerError> {
        Ok(Self::with_patterns(PatternSet::builtin()?))
    }

    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// The process-wide tokenizer for the built-in rules.
    ///
    /// The rules are fixed, so a compile failure here is a build defect and
    /// panics on first use.
    pub fn shared() -> &'static MarkdownTokenizer {
        &SHARED
    }

    /// Parses `text`, degrading to no matches if a pattern fails at runtime.
    pub fn parse(&self, text: &str) -> Vec<MarkdownMatch> {
        match self.try_parse(text) {
            Ok(matches) => matches,
            Err(err) => {
                warn!(
                    error = %err,
                    len = text.len(),
                    "markdown parse failed, rendering as plain text"
                );
                Vec::new()
            }
        }
    }

    /// Parses `text`, reporting runtime match failures.
    pub fn try_parse(&self, text: &str) -> Result<Vec<MarkdownMatch>, TokenizerError> {
        let map = Utf16Map::new(text);
        let mut accepted = AcceptedIntervals::new();
        let mut matches = Vec::new();

        for rule in self.patterns.rules() {
            collect_rule(rule, text, &map, &mut accepted, &mut matches)?;
        }

        matches.sort_by_key(|m| (m.range.start, m.range.end));
        debug!(count = matches.len(), "parsed markdown");
        Ok(matches)
    }
}

fn collect_rule(
    rule: &CompiledRule,
    text: &str,
    map: &Utf16Map,
    accepted: &mut AcceptedIntervals,
    out: &mut Vec<MarkdownMatch>,
) -> Result<(), TokenizerError> {
    for captures in rule.regex.captures_iter(text) {
        let captures = captures.map_err(|source| TokenizerError::Match {
            category: rule.category,
            source: Box::new(source),
        })?;

        let (Some(whole), Some(content)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        let to_range =
            |start: usize, end: usize| TextRange::new(map.to_utf16(start), map.to_utf16(end));
        let content_range = to_range(content.start(), content.end());
        // A marker's indentation and trailing space are not part of it.
        let range = match rule.shape {
            Shape::Marker => content_range,
            Shape::Delimited | Shape::Link => to_range(whole.start(), whole.end()),
        };
        if !accepted.try_accept(range) {
            continue;
        }

        let (syntax_ranges, url) = match rule.shape {
            Shape::Marker => (Vec::new(), None),
            Shape::Delimited => (markup_around(range, content_range), None),
            Shape::Link => (
                markup_around(range, content_range),
                captures.get(2).map(|m| m.as_str().to_string()),
            ),
        };

        out.push(MarkdownMatch {
            range,
            content_range,
            category: rule.category,
            syntax_ranges,
            url,
        });
    }
    Ok(())
}

/// The non-empty pieces of `range` before and after `content`.
fn markup_around(range: TextRange, content: TextRange) -> Vec<TextRange> {
    [
        TextRange::new(range.start, content.start),
        TextRange::new(content.end, range.end),
    ]
    .into_iter()
    .filter(|piece| !piece.is_empty())
    .collect()
}

/// Parses `text` with the shared tokenizer.
pub fn parse(text: &str) -> Vec<MarkdownMatch> {
    MarkdownTokenizer::shared().parse(text)
}

/// Removes every syntax range from `text`, and the marker of each list item.
///
/// The result is what a reader sees with all markup hidden.
pub fn strip_markup(text: &str, matches: &[MarkdownMatch]) -> String {
    let mut removed: Vec<TextRange> = matches
        .iter()
        .flat_map(|m| {
            if m.category.is_list_marker() {
                vec![m.range]
            } else {
                m.syntax_ranges.clone()
            }
        })
        .collect();
    removed.sort();

    let units: Vec<u16> = text.encode_utf16().collect();
    let mut kept = Vec::with_capacity(units.len());
    let mut cursor = 0;
    for range in removed {
        let range = range.clamp_to(units.len());
        if range.start > cursor {
            kept.extend_from_slice(&units[cursor..range.start]);
        }
        cursor = cursor.max(range.end);
    }
    if cursor < units.len() {
        kept.extend_from_slice(&units[cursor..]);
    }
    String::from_utf16_lossy(&kept)
}
