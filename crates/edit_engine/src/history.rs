//! Undo/redo history of canvas snapshots
//!
//! Canvases are plain values, so history is simply a pair of stacks of past
//! and undone canvases. The session records the canvas as it was right before
//! each change.

use crate::{EditError, Result};
use form_model::Canvas;

/// Snapshot-based undo and redo stacks
#[derive(Debug, Clone)]
pub struct History {
    /// Canvases that can be returned to with undo
    undo_stack: Vec<Canvas>,
    /// Canvases that were undone and can be redone
    redo_stack: Vec<Canvas>,
    /// Maximum number of undo entries
    max_entries: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(100)
    }

    /// Create with a custom entry limit (at least one entry is always kept)
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record the canvas as it was before a change
    pub fn record(&mut self, before: Canvas) {
        // Clear redo stack on new change
        self.redo_stack.clear();
        self.undo_stack.push(before);

        // Enforce max entries
        if self.undo_stack.len() > self.max_entries {
            let excess = self.undo_stack.len() - self.max_entries;
            self.undo_stack.drain(..excess);
        }
    }

    /// Step back: returns the previous canvas and remembers `current` for redo
    pub fn undo(&mut self, current: Canvas) -> Result<Canvas> {
        let previous = self.undo_stack.pop().ok_or(EditError::UndoStackEmpty)?;
        self.redo_stack.push(current);
        Ok(previous)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: Canvas) -> Result<Canvas> {
        let next = self.redo_stack.pop().ok_or(EditError::RedoStackEmpty)?;
        self.undo_stack.push(current);
        Ok(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_model::{ComponentType, Field, Node, NodeId};

    fn canvas(ids: &[&str]) -> Canvas {
        ids.iter()
            .map(|id| Node::Field(Field::new(NodeId::from(*id), ComponentType::TextInput)))
            .collect()
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::new();
        let v0 = canvas(&[]);
        let v1 = canvas(&["a"]);
        let v2 = canvas(&["a", "b"]);

        history.record(v0.clone());
        history.record(v1.clone());

        let back = history.undo(v2.clone()).unwrap();
        assert_eq!(back, v1);
        let back = history.undo(back).unwrap();
        assert_eq!(back, v0);
        assert!(!history.can_undo());

        let fwd = history.redo(back).unwrap();
        assert_eq!(fwd, v1);
        let fwd = history.redo(fwd).unwrap();
        assert_eq!(fwd, v2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(canvas(&[]));
        let _ = history.undo(canvas(&["a"])).unwrap();
        assert!(history.can_redo());

        history.record(canvas(&["x"]));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_stacks() {
        let mut history = History::new();
        assert!(matches!(history.undo(canvas(&[])), Err(EditError::UndoStackEmpty)));
        assert!(matches!(history.redo(canvas(&[])), Err(EditError::RedoStackEmpty)));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(2);
        history.record(canvas(&["1"]));
        history.record(canvas(&["2"]));
        history.record(canvas(&["3"]));
        assert_eq!(history.undo_len(), 2);

        let back = history.undo(canvas(&["4"])).unwrap();
        assert_eq!(back, canvas(&["3"]));
        let back = history.undo(back).unwrap();
        assert_eq!(back, canvas(&["2"]));
        assert!(!history.can_undo());
    }
}
