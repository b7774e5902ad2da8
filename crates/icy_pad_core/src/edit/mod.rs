//! Editing operations on a document buffer
//!
//! `EditState` carries the caret, the selection and the undo history of one
//! window. Every operation that changes the buffer:
//! 1. pushes exactly one undo snapshot
//! 2. notifies the controller via [`controller::mark_dirty`]
//!
//! Caret and selection offsets are byte offsets that always sit on a char
//! boundary.

mod undo;

use std::ops::Range;

use chrono::NaiveDateTime;
pub use undo::{MAX_UNDO_STEPS, UndoSnapshot, UndoStack};

use crate::clipboard::ClipboardProvider;
use crate::controller;
use crate::find::{self, FindDirection, FindOptions, floor_char_boundary};
use crate::Document;

/// Format used by "Insert Time/Date".
pub const TIME_DATE_FORMAT: &str = "%H:%M %d.%m.%Y";

#[derive(Debug, Clone, Default)]
pub struct EditState {
    caret: usize,
    anchor: Option<usize>,
    undo_stack: UndoStack,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget caret, selection and history. Called whenever the document
    /// buffer is replaced (new, open).
    pub fn reset(&mut self) {
        self.caret = 0;
        self.anchor = None;
        self.undo_stack.clear();
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Ordered, non-empty selection range.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some(anchor.min(self.caret)..anchor.max(self.caret))
    }

    pub fn selected_text<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        let range = self.selection()?;
        doc.text().get(range)
    }

    pub fn set_caret(&mut self, doc: &Document, offset: usize) {
        self.caret = floor_char_boundary(doc.text(), offset);
        self.anchor = None;
    }

    pub fn select_range(&mut self, doc: &Document, start: usize, end: usize) {
        self.anchor = Some(floor_char_boundary(doc.text(), start));
        self.caret = floor_char_boundary(doc.text(), end);
    }

    pub fn select_all(&mut self, doc: &Document) {
        self.anchor = Some(0);
        self.caret = doc.text().len();
    }

    /// Type or insert `text` at the caret, replacing the selection.
    pub fn insert_text(&mut self, doc: &mut Document, text: &str) -> bool {
        self.clamp(doc);
        let range = self.selection().unwrap_or(self.caret..self.caret);
        if text.is_empty() && range.is_empty() {
            return false;
        }
        let description = if range.is_empty() { "Typing" } else { "Replace selection" };
        self.replace_range(doc, range, text, description);
        true
    }

    pub fn backspace(&mut self, doc: &mut Document) -> bool {
        self.clamp(doc);
        if let Some(range) = self.selection() {
            self.replace_range(doc, range, "", "Delete");
            return true;
        }
        let Some(prev) = doc.text()[..self.caret].chars().next_back() else {
            return false;
        };
        let range = self.caret - prev.len_utf8()..self.caret;
        self.replace_range(doc, range, "", "Backspace");
        true
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete(&mut self, doc: &mut Document) -> bool {
        self.clamp(doc);
        if let Some(range) = self.selection() {
            self.replace_range(doc, range, "", "Delete");
            return true;
        }
        let Some(next) = doc.text()[self.caret..].chars().next() else {
            return false;
        };
        let range = self.caret..self.caret + next.len_utf8();
        self.replace_range(doc, range, "", "Delete");
        true
    }

    pub fn cut(&mut self, doc: &mut Document, clipboard: &mut dyn ClipboardProvider) -> bool {
        self.clamp(doc);
        let Some(range) = self.selection() else {
            return false;
        };
        clipboard.set_text(&doc.text()[range.clone()]);
        self.replace_range(doc, range, "", "Cut");
        true
    }

    /// Copy never modifies the document.
    pub fn copy(&mut self, doc: &Document, clipboard: &mut dyn ClipboardProvider) -> bool {
        match self.selected_text(doc) {
            Some(text) => {
                clipboard.set_text(text);
                true
            }
            None => false,
        }
    }

    pub fn paste(&mut self, doc: &mut Document, clipboard: &mut dyn ClipboardProvider) -> bool {
        let Some(text) = clipboard.get_text() else {
            return false;
        };
        if text.is_empty() {
            return false;
        }
        self.clamp(doc);
        let range = self.selection().unwrap_or(self.caret..self.caret);
        self.replace_range(doc, range, &text, "Paste");
        true
    }

    pub fn insert_time_date(&mut self, doc: &mut Document) -> bool {
        let now = chrono::Local::now().naive_local();
        self.insert_time_date_at(doc, now)
    }

    pub fn insert_time_date_at(&mut self, doc: &mut Document, time: NaiveDateTime) -> bool {
        let text = time.format(TIME_DATE_FORMAT).to_string();
        self.insert_text(doc, &text)
    }

    pub fn undo(&mut self, doc: &mut Document) -> bool {
        let Some(snapshot) = self.undo_stack.pop_undo() else {
            return false;
        };
        let current = UndoSnapshot::new(snapshot.description.clone(), doc.text(), self.caret, self.anchor);
        self.undo_stack.push_redo(current);
        self.restore(doc, snapshot);
        true
    }

    pub fn redo(&mut self, doc: &mut Document) -> bool {
        let Some(snapshot) = self.undo_stack.pop_redo() else {
            return false;
        };
        let current = UndoSnapshot::new(snapshot.description.clone(), doc.text(), self.caret, self.anchor);
        self.undo_stack.push_undo(current);
        self.restore(doc, snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.undo_description()
    }

    pub fn undo_stack_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Select the next match of `needle`. Searching down starts after the
    /// current selection so repeated finds walk through all matches.
    pub fn find(&mut self, doc: &Document, needle: &str, options: &FindOptions) -> Option<Range<usize>> {
        self.clamp(doc);
        let from = match (options.direction, self.selection()) {
            (FindDirection::Down, Some(sel)) => sel.end,
            (FindDirection::Up, Some(sel)) => sel.start,
            (_, None) => self.caret,
        };
        let found = find::find_next(doc.text(), needle, from, options)?;
        self.anchor = Some(found.start);
        self.caret = found.end;
        Some(found)
    }

    fn replace_range(&mut self, doc: &mut Document, range: Range<usize>, text: &str, description: &str) {
        self.undo_stack
            .push(UndoSnapshot::new(description, doc.text(), self.caret, self.anchor));
        doc.buffer_mut().replace_range(range.clone(), text);
        self.caret = range.start + text.len();
        self.anchor = None;
        controller::mark_dirty(doc);
    }

    fn restore(&mut self, doc: &mut Document, snapshot: UndoSnapshot) {
        doc.replace_buffer(snapshot.text);
        self.caret = snapshot.caret;
        self.anchor = snapshot.anchor;
        self.clamp(doc);
        controller::mark_dirty(doc);
    }

    fn clamp(&mut self, doc: &Document) {
        self.caret = floor_char_boundary(doc.text(), self.caret);
        self.anchor = self.anchor.map(|a| floor_char_boundary(doc.text(), a));
    }
}
