use std::fmt;

use crate::find::floor_char_boundary;
use crate::{Document, EditState};

/// Content of the status bar. Line and column are 1-based and counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    pub line: usize,
    pub column: usize,
    pub line_count: usize,
    pub char_count: usize,
    pub dirty: bool,
}

impl StatusInfo {
    pub fn new(doc: &Document, edit: &EditState) -> Self {
        let text = doc.text();
        let caret = floor_char_boundary(text, edit.caret());
        let before = &text[..caret];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);

        Self {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            line_count: text.matches('\n').count() + 1,
            char_count: text.chars().count(),
            dirty: doc.is_dirty(),
        }
    }
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}  |  {} lines, {} chars", self.line, self.column, self.line_count, self.char_count)?;
        if self.dirty {
            write!(f, "  |  Modified")?;
        }
        Ok(())
    }
}
