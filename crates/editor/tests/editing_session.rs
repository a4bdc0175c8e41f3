// Chunk: docs/chunks/document_model - Integration test for a typing session
//!
//! Integration tests that drive a `Document` the way a host would.
//!
//! A small harness tracks a cursor and turns keystrokes into `Insertion`s,
//! Backspace into grapheme deletions, and idle time into debounced
//! suggestion lookups. Styling and search are checked after each step.

use std::time::{Duration, Instant};

use markpad::{BackgroundSearch, Document, Suggestion};
use markpad_buffer::{Insertion, TextRange};
use markpad_markdown::{Category, MarkdownTheme, Role, SyntaxVisibility};
use markpad_search::{SearchOptions, WindowUpdate};
use markpad_suggest::{Debouncer, SuggestionEngine, SuggestionOptions, WordCorpus};
use pretty_assertions::assert_eq;

/// Test harness simulating a host with a single cursor.
struct Session {
    doc: Document,
    cursor: usize,
    clock: Instant,
}

impl Session {
    fn new(words: &[&str]) -> Self {
        let options = SuggestionOptions {
            min_word_length: 4,
            ..SuggestionOptions::default()
        };
        let corpus = WordCorpus::from_words(words.iter().copied());
        let engine = SuggestionEngine::corpus_only(corpus, options);
        let doc = Document::with_parts(
            MarkdownTheme::default(),
            SearchOptions::default(),
            engine,
            Debouncer::new(100),
        );
        Self {
            doc,
            cursor: 0,
            clock: Instant::now(),
        }
    }

    fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            let event = self.doc.insert(&Insertion::Typed(ch.to_string()), self.cursor);
            self.cursor = event.new_end;
            self.clock += Duration::from_millis(30);
            self.doc.schedule_suggestion(self.cursor, self.clock);
        }
    }

    fn paste(&mut self, text: &str) {
        let event = self.doc.insert(&Insertion::Pasted(text.to_string()), self.cursor);
        self.cursor = event.new_end;
    }

    fn backspace(&mut self) {
        let event = self.doc.delete_backward(self.cursor);
        self.cursor = event.start;
    }

    fn idle(&mut self, ms: u64) -> Option<Suggestion> {
        self.clock += Duration::from_millis(ms);
        self.doc.poll_suggestion(self.clock)
    }

    fn accept(&mut self, suggestion: &Suggestion) {
        let (_, cursor) = self.doc.accept_suggestion(suggestion);
        self.cursor = cursor;
    }

    fn hidden_syntax(&mut self) -> Vec<TextRange> {
        self.doc
            .compute_styles(self.cursor)
            .into_iter()
            .filter(|s| s.role == Role::Syntax(SyntaxVisibility::Hidden))
            .map(|s| s.range)
            .collect()
    }
}

#[test]
fn test_typing_then_backspace() {
    let mut session = Session::new(&[]);
    session.type_str("héllo");
    session.backspace();
    session.backspace();
    assert_eq!(session.doc.serialize(), "hél");
    assert_eq!(session.cursor, 3);
}

#[test]
fn test_backspace_over_emoji_and_combining_marks() {
    let mut session = Session::new(&[]);
    session.paste("a👍🏽e\u{301}");
    session.backspace();
    assert_eq!(session.doc.serialize(), "a👍🏽");
    session.backspace();
    assert_eq!(session.doc.serialize(), "a");
    assert_eq!(session.cursor, 1);
}

#[test]
fn test_markup_reveals_around_cursor_while_typing() {
    let mut session = Session::new(&[]);
    session.type_str("**bold**");
    // Cursor sits at the closing delimiter, inside the inclusive range.
    assert!(session.hidden_syntax().is_empty());

    session.type_str(" and more");
    assert_eq!(session.hidden_syntax(), vec![TextRange::new(0, 2), TextRange::new(6, 8)]);
}

#[test]
fn test_heading_styles_content() {
    let mut session = Session::new(&[]);
    session.type_str("## Notes\n");
    let styles = session.doc.compute_styles(session.cursor);
    let content = styles.iter().find(|s| s.role == Role::Content).unwrap();
    assert_eq!(content.category, Category::Heading2);
    assert_eq!(content.range, TextRange::new(3, 8));
}

#[test]
fn test_suggestion_appears_after_typing_pauses() {
    let mut session = Session::new(&["apple", "application", "apply"]);
    session.type_str("I ate an app");

    assert_eq!(session.idle(50), None);
    let suggestion = session.idle(60).unwrap();
    assert_eq!(suggestion.suffix, "le");

    session.accept(&suggestion);
    assert_eq!(session.doc.serialize(), "I ate an apple");
    assert_eq!(session.cursor, 14);
}

#[test]
fn test_typing_supersedes_pending_suggestion() {
    let mut session = Session::new(&["apple", "application"]);
    session.type_str("app");
    session.type_str("li");

    let suggestion = session.idle(200).unwrap();
    assert_eq!(suggestion.prefix, "appli");
    assert_eq!(suggestion.suffix, "cation");
    assert!(session.doc.suggestion_engine().cache().len() <= 1);
}

#[test]
fn test_no_suggestion_mid_word() {
    let mut session = Session::new(&["apple"]);
    session.paste("app pie");
    session.doc.schedule_suggestion(2, session.clock);
    assert_eq!(session.idle(200), None);
}

#[test]
fn test_search_follows_edits() {
    let mut session = Session::new(&[]);
    session.paste("the cat sat");
    assert_eq!(session.doc.set_query("a"), 2);

    session.type_str(" on a mat");
    assert!(!session.doc.is_complete());
    session.doc.refresh_search();
    assert_eq!(session.doc.match_count(), 4);

    let nav = session.doc.navigate_relative(-1).unwrap();
    assert_eq!(nav.index, 3);
    assert_eq!(session.doc.buffer().substring(nav.selection), "a");
}

#[test]
fn test_visible_matches_window_reuse() {
    let mut session = Session::new(&[]);
    session.paste(&"ab ".repeat(400));
    session.doc.set_query("ab");

    let first = session.doc.visible_matches(TextRange::new(300, 400));
    assert_eq!(first.update, WindowUpdate::Recomputed);
    let count = first.highlights.len();
    assert!(count > 0);

    // A small scroll stays under the threshold.
    let second = session.doc.visible_matches(TextRange::new(310, 410));
    assert_eq!(second.update, WindowUpdate::Unchanged);
    assert_eq!(second.highlights.len(), count);

    session.doc.navigate_to_match(110).unwrap();
    let third = session.doc.visible_matches(TextRange::new(310, 410));
    assert_eq!(third.update, WindowUpdate::EmphasisOnly);
    assert!(third.highlights.iter().any(|h| h.emphasized && h.match_index == 110));
}

#[test]
fn test_background_search_discards_stale_results() {
    let worker = BackgroundSearch::spawn();
    let mut session = Session::new(&[]);
    session.paste("one two one");

    let job = session.doc.begin_background_query("one");
    assert!(worker.submit(job));
    // An edit lands before the result is applied.
    session.type_str(" one");

    let stale = worker.wait(Duration::from_secs(5)).unwrap();
    assert!(!session.doc.apply_search_result(stale));
    assert_eq!(session.doc.match_count(), 0);

    assert!(worker.submit(session.doc.search_job()));
    let fresh = worker.wait(Duration::from_secs(5)).unwrap();
    assert!(session.doc.apply_search_result(fresh));
    assert_eq!(session.doc.match_count(), 3);
    assert!(session.doc.is_complete());
}
