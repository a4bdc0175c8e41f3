// Chunk: docs/chunks/document_model - Single-owner document over the editing engine
//!
//! The document model.
//!
//! `Document` owns everything mutable about one open text: the buffer, the
//! style projector's parse cache, the search index and the suggestion engine.
//! Every mutation goes through `&mut Document`, which keeps the caches in step
//! with the buffer:
//!
//! - The projector caches by buffer generation, so it re-parses lazily on the
//!   next style query after an edit.
//! - The search index is invalidated on every edit and re-scanned by
//!   [`Document::refresh_search`] or by a background job.
//! - Pending suggestion requests carry the generation they were made at and
//!   are dropped once an edit makes them stale.
//!
//! Work done off this thread only ever sees owned snapshots (see
//! [`SearchJob`](crate::SearchJob)).

use std::time::{Duration, Instant};

use markpad_buffer::{EditEvent, Insertion, TextBuffer, TextRange};
use markpad_markdown::{MarkdownTheme, StyleProjector, StyledRange, ThemeError};
use markpad_search::{
    Navigation, SearchError, SearchIndex, SearchOptions, SearchResult, VisibleMatches,
};
use markpad_suggest::{
    CompletionProvider, Debouncer, SuggestionEngine, SuggestionOptions, WordCorpus,
};
use tracing::debug;

use crate::background::SearchJob;
use crate::config::EditorConfig;

/// A suggestion request waiting out the debounce window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Cursor offset the request was made at.
    pub cursor: usize,
    /// Buffer generation the request was made at.
    pub generation: u64,
}

/// A suggestion ready to show at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Where the suffix would be inserted.
    pub at: usize,
    /// The word prefix before the cursor.
    pub prefix: String,
    /// The text to insert to complete the word.
    pub suffix: String,
}

impl Suggestion {
    /// The insertion that accepts this suggestion.
    pub fn insertion(&self) -> Insertion {
        Insertion::Suggestion {
            suffix: self.suffix.clone(),
        }
    }
}

pub struct Document {
    buffer: TextBuffer,
    projector: StyleProjector,
    search: SearchIndex,
    suggestions: SuggestionEngine,
    debouncer: Debouncer<SuggestionRequest>,
}

impl Document {
    /// An empty document with the default theme and options.
    pub fn new() -> Self {
        Self::with_parts(
            MarkdownTheme::default(),
            SearchOptions::default(),
            SuggestionEngine::corpus_only(WordCorpus::new(), SuggestionOptions::default()),
            Debouncer::with_default(),
        )
    }

    /// Assembles a document from configured components.
    pub fn with_parts(
        theme: MarkdownTheme,
        search_options: SearchOptions,
        suggestions: SuggestionEngine,
        debouncer: Debouncer<SuggestionRequest>,
    ) -> Self {
        Self {
            buffer: TextBuffer::new(),
            projector: StyleProjector::new(theme),
            search: SearchIndex::new(search_options),
            suggestions,
            debouncer,
        }
    }

    /// Builds an empty document from `config`.
    ///
    /// Fails only if the theme overrides are invalid.
    pub fn from_config(
        config: &EditorConfig,
        corpus: WordCorpus,
        provider: Option<Box<dyn CompletionProvider>>,
    ) -> Result<Self, ThemeError> {
        let theme = config.theme.build()?;
        let suggestions = SuggestionEngine::new(corpus, config.suggestions.options(), provider);
        Ok(Self::with_parts(
            theme,
            config.search.options(),
            suggestions,
            Debouncer::new(config.suggestions.debounce_ms),
        ))
    }

    // =========================================================================
    // Text I/O
    // =========================================================================

    /// Replaces the whole text, as when opening a file.
    pub fn load(&mut self, full: &str) -> EditEvent {
        let event = self.buffer.set_string(full);
        self.after_edit(&event);
        event
    }

    /// The whole text, for the persistence layer.
    pub fn serialize(&self) -> String {
        self.buffer.string()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.buffer.generation()
    }

    // =========================================================================
    // Editing
    // =========================================================================

    pub fn insert(&mut self, insertion: &Insertion, at: usize) -> EditEvent {
        let event = self.buffer.insert(insertion.text(), at);
        self.after_edit(&event);
        event
    }

    pub fn delete(&mut self, range: TextRange) -> EditEvent {
        let event = self.buffer.delete(range);
        self.after_edit(&event);
        event
    }

    pub fn replace(&mut self, range: TextRange, text: &str) -> EditEvent {
        let event = self.buffer.replace(range, text);
        self.after_edit(&event);
        event
    }

    /// Deletes the grapheme cluster before `cursor` (Backspace).
    pub fn delete_backward(&mut self, cursor: usize) -> EditEvent {
        let start = self.buffer.previous_grapheme_boundary(cursor);
        self.delete(TextRange::new(start, cursor))
    }

    /// Deletes the grapheme cluster after `cursor` (forward Delete).
    pub fn delete_forward(&mut self, cursor: usize) -> EditEvent {
        let end = self.buffer.next_grapheme_boundary(cursor);
        self.delete(TextRange::new(cursor, end))
    }

    fn after_edit(&mut self, event: &EditEvent) {
        if event.is_noop() {
            return;
        }
        self.search.invalidate(event.generation);
        if self
            .debouncer
            .pending()
            .is_some_and(|request| request.generation != event.generation)
        {
            self.debouncer.cancel();
        }
    }

    // =========================================================================
    // Styling
    // =========================================================================

    /// Styled ranges for the current text with the cursor at `cursor`.
    pub fn compute_styles(&mut self, cursor: usize) -> Vec<StyledRange> {
        self.projector.compute_styles(&self.buffer, cursor)
    }

    /// The URL of the link or image under `offset`.
    pub fn link_at(&mut self, offset: usize) -> Option<String> {
        self.projector.link_at(&self.buffer, offset).and_then(|m| m.url.clone())
    }

    pub fn projector(&self) -> &StyleProjector {
        &self.projector
    }

    pub fn set_theme(&mut self, theme: MarkdownTheme) {
        self.projector.set_theme(theme);
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Sets the query and scans the document. Returns the match count.
    pub fn set_query(&mut self, query: &str) -> usize {
        self.search.set_query(&self.buffer, query)
    }

    /// Sets the query and returns a job to scan it elsewhere.
    pub fn begin_background_query(&mut self, query: &str) -> SearchJob {
        self.search.begin_query(query);
        self.search_job()
    }

    /// A snapshot job for the current query and text.
    pub fn search_job(&self) -> SearchJob {
        SearchJob {
            text: self.buffer.string(),
            query: self.search.query().to_string(),
            generation: self.buffer.generation(),
        }
    }

    /// Installs a background result unless an edit made it stale.
    pub fn apply_search_result(&mut self, result: SearchResult) -> bool {
        self.search.apply_result(result, self.buffer.generation())
    }

    /// Re-scans the document if an edit invalidated the matches.
    pub fn refresh_search(&mut self) -> bool {
        self.search.refresh(&self.buffer)
    }

    pub fn match_count(&self) -> usize {
        self.search.match_count()
    }

    pub fn is_complete(&self) -> bool {
        self.search.is_complete()
    }

    pub fn matches(&self) -> &[TextRange] {
        self.search.matches()
    }

    pub fn navigate_to_match(&mut self, index: usize) -> Result<Navigation, SearchError> {
        self.search.navigate_to_match(index)
    }

    /// Moves `delta` matches from the current one, wrapping around.
    pub fn navigate_relative(&mut self, delta: isize) -> Result<Navigation, SearchError> {
        self.search.navigate_relative(delta)
    }

    /// Highlights for matches around `viewport`.
    pub fn visible_matches(&mut self, viewport: TextRange) -> VisibleMatches<'_> {
        let doc_len = self.buffer.len();
        self.search.visible_matches(viewport, doc_len)
    }

    pub fn search_index(&self) -> &SearchIndex {
        &self.search
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    /// Returns the suffix completing `prefix`.
    pub fn suggest(&mut self, prefix: &str) -> Option<String> {
        self.suggestions.suggest(prefix)
    }

    /// The word fragment ending at `cursor`, if the cursor ends a word.
    ///
    /// Returns `None` when the cursor sits inside a word.
    pub fn word_prefix_at(&self, cursor: usize) -> Option<String> {
        let cursor = cursor.min(self.buffer.len());
        if self.buffer.character(cursor).is_some_and(is_word_char) {
            return None;
        }
        let line = self.buffer.line_range(self.buffer.line_for_offset(cursor));
        let before = self.buffer.substring(TextRange::new(line.start, cursor));

        let prefix: String = {
            let mut chars: Vec<char> =
                before.chars().rev().take_while(|c| is_word_char(*c)).collect();
            chars.reverse();
            chars.into_iter().collect()
        };
        (!prefix.is_empty()).then_some(prefix)
    }

    /// Schedules a suggestion lookup for `cursor`, cancelling any pending one.
    pub fn schedule_suggestion(&mut self, cursor: usize, now: Instant) {
        let request = SuggestionRequest {
            cursor,
            generation: self.buffer.generation(),
        };
        if let Some(cancelled) = self.debouncer.schedule(request, now) {
            debug!(cursor = cancelled.cursor, "suggestion request superseded");
        }
    }

    /// Runs the pending lookup once its debounce window has passed.
    pub fn poll_suggestion(&mut self, now: Instant) -> Option<Suggestion> {
        let request = self.debouncer.take_ready(now)?;
        if request.generation != self.buffer.generation() {
            debug!("dropping suggestion request for an older generation");
            return None;
        }
        let prefix = self.word_prefix_at(request.cursor)?;
        let suffix = self.suggestions.suggest(&prefix)?;
        Some(Suggestion {
            at: request.cursor,
            prefix,
            suffix,
        })
    }

    /// Time until the pending lookup is due.
    pub fn suggestion_due_in(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_ready(now)
    }

    pub fn cancel_suggestion(&mut self) {
        self.debouncer.cancel();
    }

    /// Inserts the suggestion's suffix. Returns the edit and the new cursor.
    pub fn accept_suggestion(&mut self, suggestion: &Suggestion) -> (EditEvent, usize) {
        let event = self.insert(&suggestion.insertion(), suggestion.at);
        (event, event.new_end)
    }

    /// Swaps in a freshly loaded corpus.
    pub fn set_corpus(&mut self, corpus: WordCorpus) {
        self.suggestions.set_corpus(corpus);
    }

    pub fn suggestion_engine(&self) -> &SuggestionEngine {
        &self.suggestions
    }

    pub fn suggestion_engine_mut(&mut self) -> &mut SuggestionEngine {
        &mut self.suggestions
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.buffer.len())
            .field("generation", &self.buffer.generation())
            .field("query", &self.search.query())
            .field("suggestions", &self.suggestions)
            .finish()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

#[cfg(test)]
mod tests {
    use super::*;
    use markpad_markdown::{Category, Role, SyntaxVisibility};

    fn doc(text: &str) -> Document {
        let mut doc = Document::new();
        doc.load(text);
        doc
    }

    fn doc_with_words(text: &str, words: &[&str], debounce_ms: u64) -> Document {
        let options = SuggestionOptions {
            min_word_length: 4,
            ..SuggestionOptions::default()
        };
        let corpus = WordCorpus::from_words(words.iter().copied());
        let engine = SuggestionEngine::corpus_only(corpus, options);
        let mut doc = Document::with_parts(
            MarkdownTheme::default(),
            SearchOptions::default(),
            engine,
            Debouncer::new(debounce_ms),
        );
        doc.load(text);
        doc
    }

    #[test]
    fn test_load_and_serialize() {
        let mut doc = Document::new();
        doc.load("# Title\nbody");
        assert_eq!(doc.serialize(), "# Title\nbody");
        assert_eq!(doc.buffer().line_count(), 2);
    }

    #[test]
    fn test_insertion_kinds_write_their_text() {
        let mut doc = doc("ab");
        doc.insert(&Insertion::Typed("x".into()), 1);
        doc.insert(&Insertion::Pasted("yz".into()), 0);
        doc.insert(&Insertion::Suggestion { suffix: "!".into() }, 5);
        assert_eq!(doc.serialize(), "yzaxb!");
    }

    #[test]
    fn test_delete_backward_removes_whole_grapheme() {
        let mut doc = doc("ae\u{301}");
        let event = doc.delete_backward(3);
        assert_eq!(doc.serialize(), "a");
        assert_eq!(event.start, 1);
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut doc = doc("abc");
        let before = doc.generation();
        assert!(doc.delete_backward(0).is_noop());
        assert_eq!(doc.generation(), before);
    }

    #[test]
    fn test_delete_forward() {
        let mut doc = doc("a😀b");
        doc.delete_forward(1);
        assert_eq!(doc.serialize(), "ab");
    }

    #[test]
    fn test_styles_follow_edits() {
        let mut doc = doc("plain");
        assert!(doc.compute_styles(0).is_empty());

        doc.insert(&Insertion::Typed("**".into()), 0);
        doc.insert(&Insertion::Typed("**".into()), 7);
        let styles = doc.compute_styles(100);
        let hidden = Role::Syntax(SyntaxVisibility::Hidden);
        assert!(styles.iter().any(|s| s.category == Category::Bold && s.role == hidden));
    }

    #[test]
    fn test_link_at() {
        let mut doc = doc("see [docs](https://example.com) now");
        assert_eq!(doc.link_at(6).as_deref(), Some("https://example.com"));
        assert_eq!(doc.link_at(1), None);
    }

    #[test]
    fn test_search_invalidated_by_edit() {
        let mut doc = doc("the cat sat");
        assert_eq!(doc.set_query("a"), 2);

        doc.insert(&Insertion::Typed(" at".into()), 11);
        assert_eq!(doc.match_count(), 0);
        assert!(!doc.is_complete());

        assert!(doc.refresh_search());
        assert_eq!(doc.match_count(), 3);
        assert!(doc.is_complete());
    }

    #[test]
    fn test_background_result_for_old_generation_is_dropped() {
        let mut doc = doc("aaa");
        let job = doc.begin_background_query("a");
        doc.insert(&Insertion::Typed("a".into()), 0);

        assert!(!doc.apply_search_result(job.run()));
        assert_eq!(doc.match_count(), 0);

        let job = doc.search_job();
        assert!(doc.apply_search_result(job.run()));
        assert_eq!(doc.match_count(), 4);
    }

    #[test]
    fn test_navigation_and_visible_matches() {
        let mut doc = doc("a a a a");
        doc.set_query("a");
        let nav = doc.navigate_to_match(2).unwrap();
        assert_eq!(nav.selection, TextRange::new(4, 5));

        let visible = doc.visible_matches(TextRange::new(0, 7));
        assert_eq!(visible.highlights.len(), 4);
        assert!(visible.highlights[2].emphasized);
        assert!(doc.navigate_to_match(4).is_err());
    }

    #[test]
    fn test_word_prefix_at() {
        let doc = doc("an app\nx");
        assert_eq!(doc.word_prefix_at(6).as_deref(), Some("app"));
        assert_eq!(doc.word_prefix_at(4), None);
        assert_eq!(doc.word_prefix_at(3), None);
        assert_eq!(doc.word_prefix_at(7), None);
        assert_eq!(doc.word_prefix_at(8).as_deref(), Some("x"));
    }

    #[test]
    fn test_debounced_suggestion() {
        let mut doc = doc_with_words("I like app", &["apple", "application", "apply"], 100);
        let now = Instant::now();
        doc.schedule_suggestion(10, now);

        assert_eq!(doc.poll_suggestion(now), None);
        let suggestion = doc.poll_suggestion(now + Duration::from_millis(100)).unwrap();
        assert_eq!(suggestion.prefix, "app");
        assert_eq!(suggestion.suffix, "le");

        let (_, cursor) = doc.accept_suggestion(&suggestion);
        assert_eq!(doc.serialize(), "I like apple");
        assert_eq!(cursor, 12);
    }

    #[test]
    fn test_edit_cancels_stale_suggestion_request() {
        let mut doc = doc_with_words("app", &["apple"], 100);
        let now = Instant::now();
        doc.schedule_suggestion(3, now);
        doc.insert(&Insertion::Typed("l".into()), 3);

        assert_eq!(doc.poll_suggestion(now + Duration::from_secs(1)), None);
        assert_eq!(doc.suggestion_due_in(now), None);
    }

    #[test]
    fn test_from_config_applies_options() {
        let mut config = EditorConfig::default();
        config.suggestions.min_word_length = 7;
        config.suggestions.debounce_ms = 10;
        let doc = Document::from_config(&config, WordCorpus::from_words(["apple"]), None).unwrap();

        assert_eq!(doc.suggestion_engine().options().min_word_length, 7);
        assert_eq!(doc.suggestion_engine().corpus().len(), 1);
    }
}
