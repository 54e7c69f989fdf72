//! Bounded undo/redo stacks of invertible actions.
//!
//! [`ActionLog`] holds the process-local edit history. Recording a new
//! action unconditionally clears the redo stack (any fresh mutation
//! invalidates the whole redo branch) and evicts the oldest undo entry
//! past capacity -- a sliding window, not a hard error. History is never
//! persisted: a store reopened elsewhere starts with empty stacks even
//! when the document itself is restored.

use flowdoc_core::Action;

/// Maximum number of undoable actions retained.
pub const MAX_HISTORY: usize = 50;

/// Bounded LIFO undo/redo history.
#[derive(Debug, Default)]
pub struct ActionLog {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
}

impl ActionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        ActionLog::default()
    }

    /// Records a freshly committed action.
    ///
    /// Clears the redo stack and evicts the oldest undo entry when the
    /// stack would exceed [`MAX_HISTORY`].
    pub fn record(&mut self, action: Action) {
        self.undo_stack.push(action);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Pops the most recent action for undoing, if any.
    pub fn pop_for_undo(&mut self) -> Option<Action> {
        self.undo_stack.pop()
    }

    /// Pops the most recently undone action for redoing, if any.
    pub fn pop_for_redo(&mut self) -> Option<Action> {
        self.redo_stack.pop()
    }

    /// Moves an undone action onto the redo stack.
    pub fn push_undone(&mut self, action: Action) {
        self.redo_stack.push(action);
    }

    /// Moves a redone action back onto the undo stack.
    ///
    /// No capacity check here: a redo only returns an entry the bounded
    /// stack already held.
    pub fn push_redone(&mut self, action: Action) {
        self.undo_stack.push(action);
    }

    /// Clears both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Number of undoable actions.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable actions.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdoc_core::{Node, Position};

    fn add(id: &str) -> Action {
        Action::AddNode {
            node: Node::new(id, Position::default()),
        }
    }

    #[test]
    fn record_clears_redo_stack() {
        let mut log = ActionLog::new();
        log.record(add("a"));
        log.record(add("b"));

        let undone = log.pop_for_undo().unwrap();
        log.push_undone(undone);
        assert_eq!(log.redo_depth(), 1);

        log.record(add("c"));
        assert_eq!(log.redo_depth(), 0);
        assert_eq!(log.undo_depth(), 2);
    }

    #[test]
    fn overflow_evicts_oldest_entry() {
        let mut log = ActionLog::new();
        for i in 0..=MAX_HISTORY {
            log.record(add(&format!("n{}", i)));
        }
        assert_eq!(log.undo_depth(), MAX_HISTORY);

        // Drain the stack; the very first action (n0) must be gone and the
        // bottom entry must now be n1.
        let mut last = None;
        while let Some(action) = log.pop_for_undo() {
            last = Some(action);
        }
        assert_eq!(last.unwrap(), add("n1"));
    }

    #[test]
    fn undo_redo_shuttle() {
        let mut log = ActionLog::new();
        log.record(add("a"));

        let action = log.pop_for_undo().unwrap();
        log.push_undone(action);
        assert_eq!(log.undo_depth(), 0);
        assert_eq!(log.redo_depth(), 1);

        let action = log.pop_for_redo().unwrap();
        log.push_redone(action);
        assert_eq!(log.undo_depth(), 1);
        assert_eq!(log.redo_depth(), 0);
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut log = ActionLog::new();
        assert!(log.pop_for_undo().is_none());
        assert!(log.pop_for_redo().is_none());
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut log = ActionLog::new();
        log.record(add("a"));
        let action = log.pop_for_undo().unwrap();
        log.push_undone(action);
        log.record(add("b"));

        log.clear();
        assert_eq!(log.undo_depth(), 0);
        assert_eq!(log.redo_depth(), 0);
    }
}
