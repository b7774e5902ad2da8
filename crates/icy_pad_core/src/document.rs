//! The in-memory text buffer and its optional file association.

use std::path::{Path, PathBuf};

pub const UNTITLED: &str = "Untitled";

/// Derived from `(file_path, is_dirty)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// No backing file yet.
    Unassociated,
    Clean,
    Dirty,
}

/// A text buffer plus its optional backing file.
///
/// Owned by exactly one editor window. The fields are only changed through
/// [`crate::controller`] and [`crate::EditState`], which keep `is_dirty`
/// consistent with the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) buffer: String,
    pub(crate) file_path: Option<PathBuf>,
    pub(crate) is_dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Untitled document holding `text`. The text is not on disk anywhere,
    /// so it starts dirty.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            buffer: text.into(),
            file_path: None,
            is_dirty: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn state(&self) -> DocumentState {
        if self.is_dirty {
            DocumentState::Dirty
        } else if self.file_path.is_none() {
            DocumentState::Unassociated
        } else {
            DocumentState::Clean
        }
    }

    /// File name shown in the title bar and in prompts.
    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Window title: file name plus `*` when there are unsaved changes.
    pub fn title(&self) -> String {
        let modified = if self.is_dirty { "*" } else { "" };
        format!("{}{}", self.display_name(), modified)
    }

    pub(crate) fn replace_buffer(&mut self, text: String) {
        self.buffer = text;
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }
}
