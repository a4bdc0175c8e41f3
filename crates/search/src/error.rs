// Chunk: docs/chunks/find_in_document - Search errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// `navigate_to_match` was given an index past the last match.
    #[error("match index {index} out of range ({count} matches)")]
    IndexOutOfRange { index: usize, count: usize },

    /// The query could not be turned into a matcher.
    #[error("cannot search for {query:?}")]
    Query {
        query: String,
        #[source]
        source: regex::Error,
    },
}
