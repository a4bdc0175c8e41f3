// Chunk: docs/chunks/find_in_document - Whole-document search with viewport-bounded highlighting

//! markpad-search: find-in-document for markpad.
//!
//! [`SearchIndex`] holds the match list for one query over one buffer
//! generation. Matches are case-insensitive literal occurrences, found
//! leftmost-first without overlap, in UTF-16 code units.
//!
//! Highlights are produced per viewport: the viewport is padded by half its
//! length on each side, and small scrolls reuse the previous window.
//! Highlight spans are recycled through a bounded [`HighlightPool`].
//!
//! # Example
//!
//! ```
//! use markpad_buffer::{TextBuffer, TextRange};
//! use markpad_search::{wrap_index, SearchIndex};
//!
//! let buffer = TextBuffer::from_str("the cat sat");
//! let mut index = SearchIndex::default();
//! assert_eq!(index.set_query(&buffer, "A"), 2);
//!
//! let next = wrap_index(1, 1, index.match_count()).unwrap();
//! let nav = index.navigate_to_match(next).unwrap();
//! assert_eq!(nav.selection, TextRange::new(5, 6));
//! ```

mod error;
mod highlight_pool;
mod search_index;
mod window;

pub use error::SearchError;
pub use highlight_pool::{Highlight, HighlightPool, DEFAULT_POOL_CAPACITY};
pub use search_index::{
    find_matches, search, wrap_index, Navigation, SearchIndex, SearchOptions, SearchResult,
    VisibleMatches, WindowUpdate,
};
pub use window::{expand_viewport, matches_in, ViewportWindow, DEFAULT_THRESHOLD_RATIO};
