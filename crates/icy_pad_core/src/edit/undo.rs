/// Maximum number of undo steps kept per window
pub const MAX_UNDO_STEPS: usize = 256;

/// Buffer state before (or after, on the redo side) one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoSnapshot {
    pub description: String,
    pub(crate) text: String,
    pub(crate) caret: usize,
    pub(crate) anchor: Option<usize>,
}

impl UndoSnapshot {
    pub(crate) fn new(description: impl Into<String>, text: &str, caret: usize, anchor: Option<usize>) -> Self {
        Self {
            description: description.into(),
            text: text.to_string(),
            caret,
            anchor,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UndoStack {
    undo: Vec<UndoSnapshot>,
    redo: Vec<UndoSnapshot>,
    limit: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::with_limit(MAX_UNDO_STEPS)
    }
}

impl UndoStack {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a new edit. Invalidates the redo history.
    pub fn push(&mut self, snapshot: UndoSnapshot) {
        self.redo.clear();
        self.push_undo(snapshot);
    }

    pub(crate) fn push_undo(&mut self, snapshot: UndoSnapshot) {
        self.undo.push(snapshot);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
    }

    pub(crate) fn pop_undo(&mut self) -> Option<UndoSnapshot> {
        self.undo.pop()
    }

    pub(crate) fn push_redo(&mut self, snapshot: UndoSnapshot) {
        self.redo.push(snapshot);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<UndoSnapshot> {
        self.redo.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo.last().map(|s| s.description.as_str())
    }

    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_drops_oldest() {
        let mut stack = UndoStack::with_limit(2);
        stack.push(UndoSnapshot::new("a", "", 0, None));
        stack.push(UndoSnapshot::new("b", "", 0, None));
        stack.push(UndoSnapshot::new("c", "", 0, None));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop_undo().unwrap().description, "c");
        assert_eq!(stack.pop_undo().unwrap().description, "b");
        assert!(stack.pop_undo().is_none());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut stack = UndoStack::default();
        stack.push_redo(UndoSnapshot::new("redo", "", 0, None));
        assert!(stack.can_redo());
        stack.push(UndoSnapshot::new("edit", "", 0, None));
        assert!(!stack.can_redo());
        assert_eq!(stack.undo_description(), Some("edit"));
    }
}
