// Chunk: docs/chunks/markdown_tokenizer - Priority-ordered markdown tokenizer and style projection

//! markpad-markdown: markdown recognition and cursor-aware styling.
//!
//! # Overview
//!
//! - [`MarkdownTokenizer`]: a stateless, priority-ordered pass over a fixed
//!   [`PatternSet`]. Each category claims text in [`PRIORITY`] order and the
//!   accepted matches never overlap.
//! - [`StyleProjector`]: caches one parse per buffer generation and projects
//!   matches onto [`StyledRange`]s, hiding markup away from the cursor.
//! - [`MarkdownTheme`]: category to [`Style`](markpad_buffer::Style) mapping
//!   with the Catppuccin Mocha palette and per-category overrides.
//!
//! # Example
//!
//! ```
//! use markpad_buffer::{TextBuffer, TextRange};
//! use markpad_markdown::{Category, Role, StyleProjector, SyntaxVisibility};
//!
//! let buffer = TextBuffer::from_str("**bold** and _em_");
//! let mut projector = StyleProjector::default();
//!
//! let styles = projector.compute_styles(&buffer, 10);
//! let hidden = styles
//!     .iter()
//!     .filter(|s| s.role == Role::Syntax(SyntaxVisibility::Hidden))
//!     .count();
//! assert_eq!(hidden, 4);
//! assert_eq!(styles[0].category, Category::Bold);
//! assert_eq!(styles[0].range, TextRange::new(0, 2));
//! ```

mod category;
mod error;
mod patterns;
mod projector;
mod theme;
mod tokenizer;

pub use category::{Category, UnknownCategory, PRIORITY};
pub use error::{ThemeError, TokenizerError};
pub use patterns::{CompiledRule, PatternSet, Rule, Shape, BACKTRACK_LIMIT, BUILTIN_RULES};
pub use projector::{project, visibility_for, Role, StyleProjector, StyledRange, SyntaxVisibility};
pub use theme::{MarkdownTheme, StyleOverride};
pub use tokenizer::{parse, strip_markup, AcceptedIntervals, MarkdownMatch, MarkdownTokenizer};
