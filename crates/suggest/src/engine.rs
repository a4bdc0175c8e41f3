// Chunk: docs/chunks/word_suggestions - Suggestion selection over provider and corpus

//! The suggestion engine.
//!
//! `suggest(prefix)` merges provider completions with corpus words sharing
//! the prefix, provider first, dropping case-insensitive duplicates. The first
//! candidate that is not the prefix itself and is long enough wins; only the
//! part after the prefix is returned, ready to insert at the cursor.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{PrefixCache, DEFAULT_CACHE_CAPACITY};
use crate::corpus::WordCorpus;
use crate::provider::CompletionProvider;

/// Default minimum candidate length, in chars.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Default provider locale.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Options controlling candidate selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionOptions {
    /// Candidates shorter than this, in chars, are skipped.
    pub min_word_length: usize,
    /// Query the injected provider before the corpus.
    pub use_external_provider: bool,
    pub locale: String,
    pub cache_capacity: usize,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            use_external_provider: true,
            locale: DEFAULT_LOCALE.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Prefix completion over a word corpus and an optional provider.
pub struct SuggestionEngine {
    corpus: WordCorpus,
    options: SuggestionOptions,
    provider: Option<Box<dyn CompletionProvider>>,
    cache: PrefixCache,
}

impl SuggestionEngine {
    pub fn new(
        corpus: WordCorpus,
        options: SuggestionOptions,
        provider: Option<Box<dyn CompletionProvider>>,
    ) -> Self {
        let cache = PrefixCache::new(options.cache_capacity);
        Self {
            corpus,
            options,
            provider,
            cache,
        }
    }

    /// An engine with no provider.
    pub fn corpus_only(corpus: WordCorpus, options: SuggestionOptions) -> Self {
        Self::new(corpus, options, None)
    }

    pub fn corpus(&self) -> &WordCorpus {
        &self.corpus
    }

    /// Replaces the corpus and clears the cache.
    pub fn set_corpus(&mut self, corpus: WordCorpus) {
        debug!(words = corpus.len(), "suggestion corpus replaced");
        self.corpus = corpus;
        self.cache.clear();
    }

    pub fn options(&self) -> &SuggestionOptions {
        &self.options
    }

    /// Replaces the options. The cache is rebuilt if any option affecting
    /// candidate lists changed.
    pub fn set_options(&mut self, options: SuggestionOptions) {
        if options.cache_capacity != self.options.cache_capacity {
            self.cache = PrefixCache::new(options.cache_capacity);
        } else if options.use_external_provider != self.options.use_external_provider
            || options.locale != self.options.locale
        {
            self.cache.clear();
        }
        self.options = options;
    }

    /// Replaces the provider and clears the cache.
    pub fn set_provider(&mut self, provider: Option<Box<dyn CompletionProvider>>) {
        self.provider = provider;
        self.cache.clear();
    }

    pub fn cache(&self) -> &PrefixCache {
        &self.cache
    }

    /// Returns the suffix to append to `prefix`, if any candidate qualifies.
    pub fn suggest(&mut self, prefix: &str) -> Option<String> {
        if prefix.is_empty() {
            return None;
        }
        let candidates = self.candidates(prefix);
        select_suffix(&candidates, prefix, self.options.min_word_length)
    }

    /// The merged candidate list for `prefix`, cached by lowercased prefix.
    pub fn candidates(&mut self, prefix: &str) -> Arc<[String]> {
        let key = prefix.to_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let provided = self.provider_candidates(prefix);
        let merged: Arc<[String]> =
            merge_candidates(provided, self.corpus.prefix_matches(&key)).into();
        self.cache.insert(key, Arc::clone(&merged));
        merged
    }

    fn provider_candidates(&self, prefix: &str) -> Vec<String> {
        if !self.options.use_external_provider {
            return Vec::new();
        }
        let Some(provider) = self.provider.as_ref() else {
            return Vec::new();
        };
        match provider.complete(prefix, &self.options.locale) {
            Ok(candidates) => candidates,
            Err(err) => {
                debug!(error = %err, "completion provider failed, using corpus only");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("corpus_len", &self.corpus.len())
            .field("options", &self.options)
            .field("has_provider", &self.provider.is_some())
            .field("cached_prefixes", &self.cache.len())
            .finish()
    }
}

/// Provider results then corpus results, dropping case-insensitive repeats.
pub fn merge_candidates<'a, P, C>(provided: P, corpus: C) -> Vec<String>
where
    P: IntoIterator<Item = String>,
    C: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    provided
        .into_iter()
        .chain(corpus.into_iter().map(str::to_string))
        .filter(|candidate| seen.insert(candidate.to_lowercase()))
        .collect()
}

/// The suffix of the first candidate that differs from `prefix` and has at
/// least `min_word_length` chars.
///
/// The suffix keeps the candidate's own spelling. Candidates that do not start
/// with `prefix` case-insensitively are skipped.
pub fn select_suffix(
    candidates: &[String],
    prefix: &str,
    min_word_length: usize,
) -> Option<String> {
    let prefix_lower = prefix.to_lowercase();
    candidates
        .iter()
        .filter(|candidate| {
            candidate.to_lowercase() != prefix_lower && candidate.chars().count() >= min_word_length
        })
        .find_map(|candidate| strip_lowercase_prefix(candidate, &prefix_lower))
        .map(str::to_string)
}

/// The rest of `word` after the chars whose lowercase form is `prefix_lower`.
///
/// Returns `None` when no char boundary of `word` lowercases to exactly
/// `prefix_lower`.
fn strip_lowercase_prefix<'a>(word: &'a str, prefix_lower: &str) -> Option<&'a str> {
    let mut lowered = String::new();
    for (index, ch) in word.char_indices() {
        if lowered.len() >= prefix_lower.len() {
            return (lowered == prefix_lower).then(|| &word[index..]);
        }
        lowered.extend(ch.to_lowercase());
    }
    (lowered == prefix_lower).then_some("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::provider::WordListProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn options(min_word_length: usize) -> SuggestionOptions {
        SuggestionOptions {
            min_word_length,
            ..SuggestionOptions::default()
        }
    }

    #[test]
    fn test_scenario_app_suggests_le() {
        let corpus = WordCorpus::from_words(["apple", "application", "apply"]);
        let mut engine = SuggestionEngine::corpus_only(corpus, options(4));
        assert_eq!(engine.suggest("app").as_deref(), Some("le"));
    }

    #[test]
    fn test_empty_prefix_suggests_nothing() {
        let corpus = WordCorpus::from_words(["a", "ab"]);
        let mut engine = SuggestionEngine::corpus_only(corpus, options(1));
        assert_eq!(engine.suggest(""), None);
    }

    #[test]
    fn test_skips_exact_prefix_and_short_words() {
        let corpus = WordCorpus::from_words(["car", "cart", "carton"]);
        let mut engine = SuggestionEngine::corpus_only(corpus, options(5));
        assert_eq!(engine.suggest("Car").as_deref(), Some("ton"));
    }

    #[test]
    fn test_no_candidate_returns_none() {
        let corpus = WordCorpus::from_words(["dog"]);
        let mut engine = SuggestionEngine::corpus_only(corpus, options(3));
        assert_eq!(engine.suggest("cat"), None);
        assert_eq!(engine.suggest("dog"), None);
    }

    #[test]
    fn test_provider_results_come_first() {
        let corpus = WordCorpus::from_words(["hello", "helmet"]);
        let provider = WordListProvider::new("en_US", WordCorpus::from_words(["help", "Hello"]));
        let mut engine = SuggestionEngine::new(corpus, options(3), Some(Box::new(provider)));

        let candidates = engine.candidates("hel");
        assert_eq!(&*candidates, &["Hello", "help", "helmet"]);
        assert_eq!(engine.suggest("hel").as_deref(), Some("lo"));
    }

    #[test]
    fn test_provider_failure_falls_back_to_corpus() {
        let corpus = WordCorpus::from_words(["window"]);
        let failing =
            |_: &str, _: &str| Err::<Vec<String>, _>(ProviderError::Unavailable("offline".into()));
        let mut engine = SuggestionEngine::new(corpus, options(3), Some(Box::new(failing)));
        assert_eq!(engine.suggest("win").as_deref(), Some("dow"));
    }

    #[test]
    fn test_disabled_provider_is_not_queried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let provider = move |_: &str, _: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ProviderError>(vec!["provided".to_string()])
        };
        let opts = SuggestionOptions {
            use_external_provider: false,
            ..options(3)
        };
        let corpus = WordCorpus::from_words(["protest"]);
        let mut engine = SuggestionEngine::new(corpus, opts, Some(Box::new(provider)));

        assert_eq!(engine.suggest("pro").as_deref(), Some("test"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cache_reused_per_lowercased_prefix() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let provider = move |_: &str, _: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ProviderError>(Vec::new())
        };
        let corpus = WordCorpus::from_words(["table"]);
        let mut engine = SuggestionEngine::new(corpus, options(3), Some(Box::new(provider)));

        engine.suggest("tab");
        engine.suggest("TAB");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.cache().hits(), 1);
    }

    #[test]
    fn test_set_corpus_clears_cache() {
        let corpus = WordCorpus::from_words(["alpha"]);
        let mut engine = SuggestionEngine::corpus_only(corpus, options(3));
        assert_eq!(engine.suggest("al").as_deref(), Some("pha"));

        engine.set_corpus(WordCorpus::from_words(["altitude"]));
        assert!(engine.cache().is_empty());
        assert_eq!(engine.suggest("al").as_deref(), Some("titude"));
    }

    #[test]
    fn test_suffix_counts_chars_not_bytes() {
        let corpus = WordCorpus::from_words(["éclair"]);
        let mut engine = SuggestionEngine::corpus_only(corpus, options(3));
        assert_eq!(engine.suggest("éc").as_deref(), Some("lair"));
    }

    #[test]
    fn test_suffix_keeps_candidate_case() {
        let corpus = WordCorpus::from_words(["JavaScript"]);
        let mut engine = SuggestionEngine::corpus_only(corpus, options(3));
        assert_eq!(engine.suggest("Jav").as_deref(), Some("aScript"));
        assert_eq!(engine.suggest("jav").as_deref(), Some("aScript"));
    }

    #[test]
    fn test_suffix_split_follows_lowercased_prefix() {
        // 'İ' lowercases to two chars, so the split point is found on the
        // lowercase form.
        let candidates = vec!["İstanbul".to_string()];
        assert_eq!(select_suffix(&candidates, "İs", 3).as_deref(), Some("tanbul"));
        assert_eq!(select_suffix(&candidates, "i\u{307}st", 3).as_deref(), Some("anbul"));
        assert_eq!(strip_lowercase_prefix("İstanbul", "i"), None);
    }

    #[test]
    fn test_candidates_without_prefix_are_skipped() {
        let candidates = vec!["other".to_string(), "carton".to_string()];
        assert_eq!(select_suffix(&candidates, "car", 3).as_deref(), Some("ton"));
    }

    #[test]
    fn test_merge_candidates_dedups_case_insensitively() {
        let merged = merge_candidates(vec!["Apple".to_string()], ["apple", "apply"]);
        assert_eq!(merged, vec!["Apple", "apply"]);
    }
}
