// Chunk: docs/chunks/markdown_tokenizer - Tokenizer errors

use thiserror::Error;

use crate::category::Category;

/// Errors raised while building or running the tokenizer.
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// A rule's pattern does not compile.
    #[error("invalid pattern for {category}: {pattern}")]
    Pattern {
        category: Category,
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A rule's pattern lacks the capture groups its shape reads.
    #[error("pattern for {category} has {found} capture groups, expected at least {expected}: {pattern}")]
    MissingGroups {
        category: Category,
        pattern: String,
        expected: usize,
        found: usize,
    },

    /// Matching gave up, usually on the backtrack limit.
    #[error("matching {category} failed")]
    Match {
        category: Category,
        #[source]
        source: Box<fancy_regex::Error>,
    },
}

/// Errors raised while applying theme overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("invalid color {value:?} for {category}, expected #rrggbb")]
    InvalidColor { category: Category, value: String },
}
