// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing

//! markpad-buffer: the text store underneath the markpad editing engine.
//!
//! This crate provides a gap buffer-backed [`TextBuffer`] addressed in UTF-16
//! code units, the shared range/position types, and the style attributes the
//! rendering layers hand to the host.
//!
//! # Overview
//!
//! [`TextBuffer`] provides:
//! - `insert` / `delete` / `replace` / `set_string` with clamped ranges
//! - `substring` / `character` / `string` reads
//! - a lazily rebuilt [`LineIndex`] (`line_for_offset`, `line_range`)
//! - a generation counter that downstream caches key on
//! - an injected [`UndoRegistrar`] that receives the inverse of every edit
//!
//! # Example
//!
//! ```
//! use markpad_buffer::{TextBuffer, TextRange, UndoLog};
//!
//! let undo = UndoLog::new();
//! let mut buffer = TextBuffer::new();
//! buffer.set_undo_registrar(undo.clone());
//!
//! buffer.insert("Hello, world!", 0);
//! buffer.replace(TextRange::new(7, 12), "markpad");
//! assert_eq!(buffer.string(), "Hello, markpad!");
//!
//! // Reverse the replacement.
//! undo.pop().unwrap().apply(&mut buffer);
//! assert_eq!(buffer.string(), "Hello, world!");
//! ```
//!
//! # Offsets
//!
//! Offsets count UTF-16 code units, so `"😀"` has length 2. [`utf16`] converts
//! from byte offsets; [`grapheme`] finds user-perceived character boundaries.

mod gap_buffer;
pub mod grapheme;
mod line_index;
mod style;
mod text_buffer;
mod types;
mod undo;
pub mod utf16;

pub use gap_buffer::GapBuffer;
pub use line_index::LineIndex;
pub use style::{Color, NamedColor, Style, UnderlineStyle};
pub use text_buffer::TextBuffer;
pub use types::{Affinity, EditEvent, Insertion, TextPosition, TextRange};
pub use undo::{InverseOp, UndoLog, UndoRegistrar};
