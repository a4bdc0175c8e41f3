// Chunk: docs/chunks/inverse_operations - Register-inverse hook for host undo stacks

//! The "register inverse operation" hook.
//!
//! markpad does not model undo history. Before every mutation the buffer hands
//! the injected [`UndoRegistrar`] an [`InverseOp`] that exactly reverses it;
//! the host decides how to group, store and replay those operations.
//! Replaying an inverse through [`InverseOp::apply`] registers *its* inverse
//! in turn, which is what a redo stack needs.

use std::sync::{Arc, Mutex};

use crate::text_buffer::TextBuffer;
use crate::types::{EditEvent, TextRange};

/// An operation that reverses one buffer mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InverseOp {
    /// Undo an insertion by deleting what was inserted.
    Delete { range: TextRange },
    /// Undo a deletion by re-inserting the removed code units.
    Insert { at: usize, units: Vec<u16> },
    /// Undo a replacement by putting the old code units back.
    Replace { range: TextRange, units: Vec<u16> },
}

impl InverseOp {
    /// Applies this operation to `buffer`.
    pub fn apply(&self, buffer: &mut TextBuffer) -> EditEvent {
        match self {
            InverseOp::Delete { range } => buffer.delete(*range),
            InverseOp::Insert { at, units } => buffer.insert_units(units, *at),
            InverseOp::Replace { range, units } => buffer.replace_units(*range, units),
        }
    }
}

/// Receives inverse operations before each mutation is applied.
pub trait UndoRegistrar: Send {
    fn register(&mut self, op: InverseOp);
}

impl<F> UndoRegistrar for F
where
    F: FnMut(InverseOp) + Send,
{
    fn register(&mut self, op: InverseOp) {
        self(op)
    }
}

/// A shareable stack of inverse operations.
///
/// Cloning yields another handle to the same stack, so one clone can be
/// injected into the buffer while the host keeps the other.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    ops: Arc<Mutex<Vec<InverseOp>>>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ops<R>(&self, f: impl FnOnce(&mut Vec<InverseOp>) -> R) -> R {
        let mut ops = self.ops.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut ops)
    }

    /// Removes and returns the most recently registered operation.
    pub fn pop(&self) -> Option<InverseOp> {
        self.with_ops(|ops| ops.pop())
    }

    pub fn len(&self) -> usize {
        self.with_ops(|ops| ops.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.with_ops(|ops| ops.clear())
    }

    /// Returns a copy of the registered operations, oldest first.
    pub fn snapshot(&self) -> Vec<InverseOp> {
        self.with_ops(|ops| ops.clone())
    }
}

impl UndoRegistrar for UndoLog {
    fn register(&mut self, op: InverseOp) {
        self.with_ops(|ops| ops.push(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_registers_delete() {
        let log = UndoLog::new();
        let mut buffer = TextBuffer::from_str("hello");
        buffer.set_undo_registrar(log.clone());

        buffer.insert(" world", 5);
        assert_eq!(
            log.snapshot(),
            vec![InverseOp::Delete {
                range: TextRange::new(5, 11)
            }]
        );
    }

    #[test]
    fn test_delete_registers_insert_of_removed_text() {
        let log = UndoLog::new();
        let mut buffer = TextBuffer::from_str("hello world");
        buffer.set_undo_registrar(log.clone());

        buffer.delete(TextRange::new(5, 11));
        assert_eq!(
            log.pop(),
            Some(InverseOp::Insert {
                at: 5,
                units: " world".encode_utf16().collect()
            })
        );
    }

    #[test]
    fn test_replace_registers_swapped_replace() {
        let log = UndoLog::new();
        let mut buffer = TextBuffer::from_str("hello world");
        buffer.set_undo_registrar(log.clone());

        buffer.replace(TextRange::new(6, 11), "there!");
        assert_eq!(
            log.pop(),
            Some(InverseOp::Replace {
                range: TextRange::new(6, 12),
                units: "world".encode_utf16().collect()
            })
        );
    }

    #[test]
    fn test_apply_inverse_restores_and_registers_redo() {
        let log = UndoLog::new();
        let mut buffer = TextBuffer::from_str("abc");
        buffer.set_undo_registrar(log.clone());

        buffer.replace(TextRange::new(1, 2), "XYZ");
        assert_eq!(buffer.string(), "aXYZc");

        let undo = log.pop().expect("replace registered an inverse");
        undo.apply(&mut buffer);
        assert_eq!(buffer.string(), "abc");

        // Undoing registered the redo operation.
        let redo = log.pop().expect("undo registered a redo");
        redo.apply(&mut buffer);
        assert_eq!(buffer.string(), "aXYZc");
    }

    #[test]
    fn test_inverse_restores_split_surrogate_pair() {
        let log = UndoLog::new();
        let mut buffer = TextBuffer::from_str("a😀b");
        buffer.set_undo_registrar(log.clone());
        let before = buffer.code_units(TextRange::new(0, 4));

        // Removes only the high surrogate.
        buffer.delete(TextRange::new(1, 2));
        assert_eq!(
            log.snapshot(),
            vec![InverseOp::Insert {
                at: 1,
                units: vec![0xD83D]
            }]
        );

        log.pop().unwrap().apply(&mut buffer);
        assert_eq!(buffer.code_units(TextRange::new(0, 4)), before);
        assert_eq!(buffer.string(), "a😀b");
    }

    #[test]
    fn test_replace_inverse_restores_split_surrogate_pair() {
        let log = UndoLog::new();
        let mut buffer = TextBuffer::from_str("😀x");
        buffer.set_undo_registrar(log.clone());

        // Replaces the low surrogate and the following letter.
        buffer.replace(TextRange::new(1, 3), "yz");
        log.pop().unwrap().apply(&mut buffer);
        assert_eq!(buffer.string(), "😀x");
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_noop_mutations_register_nothing() {
        let log = UndoLog::new();
        let mut buffer = TextBuffer::from_str("abc");
        buffer.set_undo_registrar(log.clone());

        buffer.insert("", 1);
        buffer.delete(TextRange::new(2, 2));
        buffer.delete(TextRange::new(10, 20));
        assert!(log.is_empty());
    }

    #[test]
    fn test_closure_registrar() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut buffer = TextBuffer::new();
        buffer.set_undo_registrar(move |op: InverseOp| {
            let _ = tx.send(op);
        });
        buffer.insert("hi", 0);
        assert_eq!(
            rx.try_recv().ok(),
            Some(InverseOp::Delete {
                range: TextRange::new(0, 2)
            })
        );
    }
}
