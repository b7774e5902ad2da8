//! Document controller
//!
//! Load/save and dirty tracking for a [`Document`]. All functions take the
//! window's document explicitly and never touch any UI type; decisions that
//! need the user (discard confirmation, choosing a save path) are handed back
//! as tagged values.
//!
//! On failure the document is left exactly as it was.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Document, PadError, Result};

/// Result of [`new_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewDocument {
    /// Buffer was reset.
    Cleared,
    /// Buffer has unsaved changes; the caller has to ask the user and call
    /// [`discard`] if they agree.
    ConfirmDiscard,
}

/// Result of [`save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// No file associated yet. The caller asks for a path and sends a
    /// [`SaveAsRequest`].
    NeedsPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAsRequest {
    pub path: PathBuf,
}

/// Requests the UI layer sends to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    New,
    Discard,
    Open(OpenRequest),
    Save,
    SaveAs(SaveAsRequest),
}

/// Answers to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Cleared,
    ConfirmDiscard,
    Loaded(PathBuf),
    Saved(PathBuf),
    NeedsPath,
}

pub fn new_document(doc: &mut Document) -> NewDocument {
    if doc.is_dirty {
        log::debug!("New document requested with unsaved changes in {}", doc.display_name());
        return NewDocument::ConfirmDiscard;
    }
    discard(doc);
    NewDocument::Cleared
}

/// Drop the buffer and file association unconditionally.
pub fn discard(doc: &mut Document) {
    doc.buffer.clear();
    doc.file_path = None;
    doc.is_dirty = false;
}

pub fn load(doc: &mut Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| PadError::io(path, e))?;
    let text = String::from_utf8(data).map_err(|_| PadError::decode(path))?;

    doc.replace_buffer(text);
    doc.file_path = Some(path.to_path_buf());
    doc.is_dirty = false;
    log::info!("Loaded '{}' ({} bytes)", path.display(), doc.buffer.len());
    Ok(())
}

pub fn save(doc: &mut Document) -> Result<SaveOutcome> {
    let Some(path) = doc.file_path.clone() else {
        return Ok(SaveOutcome::NeedsPath);
    };
    write_buffer(doc, &path)?;
    doc.is_dirty = false;
    Ok(SaveOutcome::Saved(path))
}

pub fn save_as(doc: &mut Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_buffer(doc, path)?;
    doc.file_path = Some(path.to_path_buf());
    doc.is_dirty = false;
    Ok(())
}

/// Called on every buffer modification notification.
pub fn mark_dirty(doc: &mut Document) {
    doc.is_dirty = true;
}

pub fn is_unsaved_change_pending(doc: &Document) -> bool {
    doc.is_dirty
}

pub fn handle(doc: &mut Document, request: Request) -> Result<Response> {
    match request {
        Request::New => Ok(match new_document(doc) {
            NewDocument::Cleared => Response::Cleared,
            NewDocument::ConfirmDiscard => Response::ConfirmDiscard,
        }),
        Request::Discard => {
            discard(doc);
            Ok(Response::Cleared)
        }
        Request::Open(OpenRequest { path }) => {
            load(doc, &path)?;
            Ok(Response::Loaded(path))
        }
        Request::Save => Ok(match save(doc)? {
            SaveOutcome::Saved(path) => Response::Saved(path),
            SaveOutcome::NeedsPath => Response::NeedsPath,
        }),
        Request::SaveAs(SaveAsRequest { path }) => {
            save_as(doc, &path)?;
            Ok(Response::Saved(path))
        }
    }
}

fn write_buffer(doc: &Document, path: &Path) -> Result<()> {
    if let Err(err) = fs::write(path, doc.buffer.as_bytes()) {
        log::error!("Cannot save file '{}': {}", path.display(), err);
        return Err(PadError::io(path, err));
    }
    log::info!("Saved '{}' ({} bytes)", path.display(), doc.buffer.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_when_clean_resets() {
        let mut doc = Document {
            buffer: "old".to_string(),
            file_path: Some(PathBuf::from("/tmp/old.txt")),
            is_dirty: false,
        };
        assert_eq!(new_document(&mut doc), NewDocument::Cleared);
        assert!(doc.text().is_empty());
        assert!(doc.file_path().is_none());
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_new_document_when_dirty_keeps_buffer() {
        let mut doc = Document::with_text("unsaved work");
        assert_eq!(new_document(&mut doc), NewDocument::ConfirmDiscard);
        assert_eq!(doc.text(), "unsaved work");
        assert!(doc.is_dirty());

        discard(&mut doc);
        assert!(doc.text().is_empty());
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_mark_dirty_is_idempotent() {
        let mut doc = Document::new();
        assert!(!is_unsaved_change_pending(&doc));
        mark_dirty(&mut doc);
        mark_dirty(&mut doc);
        assert!(is_unsaved_change_pending(&doc));
    }

    #[test]
    fn test_save_without_path_needs_path() {
        let mut doc = Document::with_text("hello");
        assert_eq!(save(&mut doc).unwrap(), SaveOutcome::NeedsPath);
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_handle_new_maps_confirmation() {
        let mut doc = Document::with_text("x");
        assert_eq!(handle(&mut doc, Request::New).unwrap(), Response::ConfirmDiscard);
        assert_eq!(handle(&mut doc, Request::Discard).unwrap(), Response::Cleared);
        assert_eq!(handle(&mut doc, Request::New).unwrap(), Response::Cleared);
    }
}
