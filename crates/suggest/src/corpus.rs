// Chunk: docs/chunks/word_suggestions - Sorted word corpus with prefix scans

//! The custom-word corpus.
//!
//! Each word keeps its original spelling next to a lowercase key. Entries are
//! sorted and deduplicated on the key once at construction. A prefix lookup
//! binary-searches for the first key not less than the lowercased prefix and
//! scans forward while keys keep that prefix, so it costs O(log n + k) for k
//! results.

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    word: String,
}

/// A sorted word list, deduplicated case-insensitively.
///
/// When spellings differ only by case, an all-lowercase spelling is kept if
/// one exists, otherwise the smallest spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCorpus {
    entries: Vec<Entry>,
}

impl WordCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a corpus from arbitrary words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<Entry> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .map(|word| Entry {
                key: word.to_lowercase(),
                word,
            })
            .collect();
        entries.sort_unstable_by(|a, b| {
            a.key
                .cmp(&b.key)
                .then_with(|| (a.word != a.key).cmp(&(b.word != b.key)))
                .then_with(|| a.word.cmp(&b.word))
        });
        entries.dedup_by(|later, kept| later.key == kept.key);
        Self { entries }
    }

    /// Words whose lowercase form starts with the lowercased `prefix`, in
    /// their original spelling.
    pub fn prefix_matches<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = prefix.to_lowercase();
        let start = self.entries.partition_point(|e| e.key.as_str() < prefix.as_str());
        self.entries[start..]
            .iter()
            .take_while(move |e| e.key.starts_with(prefix.as_str()))
            .map(|e| e.word.as_str())
    }

    pub fn contains(&self, word: &str) -> bool {
        let key = word.to_lowercase();
        self.entries.binary_search_by(|e| e.key.as_str().cmp(key.as_str())).is_ok()
    }

    /// The words in key order, in their original spelling.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordCorpus {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_and_dedups_case_insensitively() {
        let corpus = WordCorpus::from_words(["Zebra", "APPLE", "apple", " mango ", ""]);
        assert_eq!(corpus.words().collect::<Vec<_>>(), vec!["apple", "mango", "Zebra"]);
    }

    #[test]
    fn test_keeps_original_spelling() {
        let corpus = WordCorpus::from_words(["JavaScript", "JAVASCRIPT"]);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.prefix_matches("jav").collect::<Vec<_>>(), vec!["JAVASCRIPT"]);

        let corpus = WordCorpus::from_words(["JavaScript"]);
        assert_eq!(corpus.prefix_matches("JAV").collect::<Vec<_>>(), vec!["JavaScript"]);
    }

    #[test]
    fn test_prefix_matches_stop_at_first_non_match() {
        let corpus = WordCorpus::from_words(["apple", "application", "apply", "apricot", "banana"]);
        let found: Vec<&str> = corpus.prefix_matches("app").collect();
        assert_eq!(found, vec!["apple", "application", "apply"]);
    }

    #[test]
    fn test_prefix_matches_case_insensitive() {
        let corpus = WordCorpus::from_words(["Rust", "rustacean"]);
        let found: Vec<&str> = corpus.prefix_matches("RU").collect();
        assert_eq!(found, vec!["Rust", "rustacean"]);
    }

    #[test]
    fn test_prefix_past_end() {
        let corpus = WordCorpus::from_words(["a", "b"]);
        assert_eq!(corpus.prefix_matches("zz").count(), 0);
    }

    #[test]
    fn test_contains() {
        let corpus: WordCorpus = ["Hello"].into_iter().collect();
        assert!(corpus.contains("HELLO"));
        assert!(!corpus.contains("hell"));
    }
}
