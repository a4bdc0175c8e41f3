// Chunk: docs/chunks/document_model - Single-owner document over the editing engine
//!
//! markpad: a markdown-aware text editing engine.
//!
//! This crate ties the engine crates together behind one owner:
//!
//! - [`Document`] owns the text buffer, the style projector, the search index
//!   and the suggestion engine, and keeps their caches in step with edits.
//! - [`BackgroundSearch`] runs full-document searches on a worker thread over
//!   owned snapshots; stale results are dropped by the document.
//! - [`CorpusWatcher`] reloads the suggestion corpus when its folder changes.
//! - [`EditorConfig`] is the JSON configuration.
//!
//! ```
//! use markpad::Document;
//! use markpad_buffer::Insertion;
//!
//! let mut doc = Document::new();
//! doc.load("the cat");
//! doc.insert(&Insertion::Typed(" sat".into()), 7);
//! assert_eq!(doc.set_query("a"), 2);
//! ```

mod background;
pub mod cli;
mod config;
mod corpus_watcher;
mod document;
mod error;
pub mod logging;

pub use background::{BackgroundSearch, SearchJob};
pub use config::{
    config_file_path, EditorConfig, SearchConfig, SuggestionConfig, ThemeConfig, SCHEMA_VERSION,
};
pub use corpus_watcher::{CorpusWatcher, DEFAULT_RELOAD_DEBOUNCE_MS};
pub use document::{Document, Suggestion, SuggestionRequest};
pub use error::{ConfigError, WatchError};
