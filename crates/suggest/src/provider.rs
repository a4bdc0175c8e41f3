// Chunk: docs/chunks/word_suggestions - External completion providers

//! Completion providers.
//!
//! A provider is an external source of completions such as a platform spell
//! checker. It is injected into the engine at construction; the engine treats
//! any error as "no provider results".

use crate::corpus::WordCorpus;
use crate::error::ProviderError;

/// A source of completions for a prefix in a locale.
pub trait CompletionProvider: Send {
    fn complete(&self, prefix: &str, locale: &str) -> Result<Vec<String>, ProviderError>;
}

impl<F> CompletionProvider for F
where
    F: Fn(&str, &str) -> Result<Vec<String>, ProviderError> + Send,
{
    fn complete(&self, prefix: &str, locale: &str) -> Result<Vec<String>, ProviderError> {
        self(prefix, locale)
    }
}

/// A provider backed by a fixed word list for one locale.
///
/// Stands in for a dictionary service, for example a bundled word list.
#[derive(Debug, Clone)]
pub struct WordListProvider {
    locale: String,
    words: WordCorpus,
}

impl WordListProvider {
    pub fn new(locale: impl Into<String>, words: WordCorpus) -> Self {
        Self {
            locale: locale.into(),
            words,
        }
    }
}

impl CompletionProvider for WordListProvider {
    fn complete(&self, prefix: &str, locale: &str) -> Result<Vec<String>, ProviderError> {
        if !self.locale.eq_ignore_ascii_case(locale) {
            return Err(ProviderError::UnsupportedLocale(locale.to_string()));
        }
        Ok(self.words.prefix_matches(prefix).map(str::to_string).collect())
    }
}
