// Chunk: docs/chunks/word_suggestions - Prefix-indexed word suggestions

//! markpad-suggest: inline word completion.
//!
//! - [`WordCorpus`]: custom words sorted and deduplicated case-insensitively,
//!   with O(log n + k) prefix scans.
//! - [`CorpusLoader`]: builds a corpus from a folder of text files.
//! - [`CompletionProvider`]: an injected external completion source.
//! - [`SuggestionEngine`]: merges provider and corpus candidates behind an
//!   LRU [`PrefixCache`] and picks the suffix to offer.
//! - [`Debouncer`]: schedules suggestion requests, cancelling superseded ones.
//!
//! # Example
//!
//! ```
//! use markpad_suggest::{SuggestionEngine, SuggestionOptions, WordCorpus};
//!
//! let corpus = WordCorpus::from_words(["apple", "application", "apply"]);
//! let options = SuggestionOptions {
//!     min_word_length: 4,
//!     ..SuggestionOptions::default()
//! };
//! let mut engine = SuggestionEngine::corpus_only(corpus, options);
//! assert_eq!(engine.suggest("app").as_deref(), Some("le"));
//! ```

mod cache;
mod corpus;
mod debounce;
mod engine;
mod error;
mod loader;
mod provider;

pub use cache::{PrefixCache, DEFAULT_CACHE_CAPACITY};
pub use corpus::WordCorpus;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use engine::{
    merge_candidates, select_suffix, SuggestionEngine, SuggestionOptions, DEFAULT_LOCALE,
    DEFAULT_MIN_WORD_LENGTH,
};
pub use error::{CorpusError, ProviderError};
pub use loader::{CorpusLoader, DEFAULT_EXTENSIONS, DEFAULT_MIN_CORPUS_WORD};
pub use provider::{CompletionProvider, WordListProvider};
