// Chunk: docs/chunks/word_suggestions - Suggestion errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a [`CompletionProvider`](crate::CompletionProvider).
///
/// The engine never surfaces these; it falls back to the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("completion provider unavailable: {0}")]
    Unavailable(String),
    #[error("no completions for locale {0}")]
    UnsupportedLocale(String),
    #[error("completion provider failed: {0}")]
    Failed(String),
}

/// Errors raised while loading a word corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus folder does not exist: {}", .0.display())]
    Missing(PathBuf),
    #[error("corpus path is not a folder: {}", .0.display())]
    NotAFolder(PathBuf),
}
