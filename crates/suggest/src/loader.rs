// Chunk: docs/chunks/corpus_loader - Corpus folder to sorted word list

//! Loads a [`WordCorpus`] from a folder of text files.
//!
//! The folder is walked recursively, honoring `.gitignore` and hidden-file
//! rules. Every file with an accepted extension is split into Unicode words;
//! unreadable files are skipped.

use std::fs;
use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, info, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::corpus::WordCorpus;
use crate::error::CorpusError;

/// File extensions read by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Shortest word kept in the corpus, in chars.
pub const DEFAULT_MIN_CORPUS_WORD: usize = 2;

/// Builds word corpora from folders.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    extensions: Vec<String>,
    min_word_chars: usize,
}

impl CorpusLoader {
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            min_word_chars: DEFAULT_MIN_CORPUS_WORD,
        }
    }

    /// Replaces the accepted extensions (without the leading dot).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_word_chars(mut self, min_word_chars: usize) -> Self {
        self.min_word_chars = min_word_chars;
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions.iter().any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
    }

    /// Splits `text` into the words this loader keeps.
    pub fn words_in<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        text.unicode_words().filter(move |word| {
            word.chars().count() >= self.min_word_chars && word.chars().any(char::is_alphabetic)
        })
    }

    /// Loads every accepted file under `folder`.
    pub fn load(&self, folder: &Path) -> Result<WordCorpus, CorpusError> {
        if !folder.exists() {
            return Err(CorpusError::Missing(folder.to_path_buf()));
        }
        if !folder.is_dir() {
            return Err(CorpusError::NotAFolder(folder.to_path_buf()));
        }

        let walker = WalkBuilder::new(folder).standard_filters(true).follow_links(false).build();

        let mut words: Vec<String> = Vec::new();
        let mut files = 0usize;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "corpus walk entry error");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) || !self.accepts(entry.path()) {
                continue;
            }

            match fs::read_to_string(entry.path()) {
                Ok(text) => {
                    files += 1;
                    words.extend(self.words_in(&text).map(str::to_string));
                }
                Err(err) => {
                    debug!(
                        path = %entry.path().display(),
                        error = %err,
                        "skipping unreadable corpus file"
                    );
                }
            }
        }

        let corpus = WordCorpus::from_words(words);
        info!(folder = %folder.display(), files, words = corpus.len(), "loaded word corpus");
        Ok(corpus)
    }

    /// Loads `folder`, falling back to an empty corpus on failure.
    pub fn load_or_empty(&self, folder: &Path) -> WordCorpus {
        self.load(folder).unwrap_or_else(|err| {
            warn!(error = %err, "corpus unavailable, continuing with an empty corpus");
            WordCorpus::new()
        })
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}
