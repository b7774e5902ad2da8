use std::fs;

use icy_pad_core::controller::{self, NewDocument, Request, Response, SaveOutcome};
use icy_pad_core::{Document, EditState, OpenRequest, SaveAsRequest};

#[test]
fn test_type_save_as_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.txt");

    let mut doc = Document::new();
    let mut edit = EditState::new();
    edit.insert_text(&mut doc, "hello");
    assert!(controller::is_unsaved_change_pending(&doc));

    assert_eq!(controller::save(&mut doc).unwrap(), SaveOutcome::NeedsPath);
    controller::save_as(&mut doc, &path).unwrap();
    assert!(!controller::is_unsaved_change_pending(&doc));
    assert_eq!(doc.file_path(), Some(path.as_path()));
    assert_eq!(fs::read(&path).unwrap(), b"hello");

    let mut other = Document::new();
    controller::load(&mut other, &path).unwrap();
    assert_eq!(other.text(), "hello");
    assert!(!other.is_dirty());
}

#[test]
fn test_save_writes_exact_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crlf.txt");
    let text = "line one\r\nline two\nünïcode\n";
    fs::write(&path, text).unwrap();

    let mut doc = Document::new();
    controller::load(&mut doc, &path).unwrap();
    assert_eq!(doc.text(), text);

    fs::remove_file(&path).unwrap();
    assert_eq!(controller::save(&mut doc).unwrap(), SaveOutcome::Saved(path.clone()));
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn test_save_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twice.txt");

    let mut doc = Document::with_text("same content");
    controller::save_as(&mut doc, &path).unwrap();
    let first = fs::read(&path).unwrap();
    controller::save(&mut doc).unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
    assert!(!doc.is_dirty());
}

#[test]
fn test_edit_after_save_as_then_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.txt");

    let mut doc = Document::with_text("hello");
    controller::save_as(&mut doc, &path).unwrap();
    assert!(!doc.is_dirty());

    controller::mark_dirty(&mut doc);
    assert!(controller::is_unsaved_change_pending(&doc));
    assert_eq!(controller::save(&mut doc).unwrap(), SaveOutcome::Saved(path.clone()));
    assert!(!doc.is_dirty());

    let mut edit = EditState::new();
    edit.set_caret(&doc, doc.text().len());
    edit.insert_text(&mut doc, " world");
    controller::mark_dirty(&mut doc);
    assert!(doc.is_dirty());

    assert_eq!(controller::save(&mut doc).unwrap(), SaveOutcome::Saved(path.clone()));
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
    assert!(!doc.is_dirty());
}

#[test]
fn test_load_missing_file_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = Document::with_text("keep me");

    let err = controller::load(&mut doc, dir.path().join("missing.txt")).unwrap_err();
    assert!(err.is_io());
    assert_eq!(doc.text(), "keep me");
    assert!(doc.is_dirty());
    assert!(doc.file_path().is_none());
}

#[test]
fn test_load_invalid_utf8_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.pyc");
    fs::write(&path, [0x42, 0x0d, 0xff, 0xfe, 0x00]).unwrap();

    let mut doc = Document::new();
    let err = controller::load(&mut doc, &path).unwrap_err();
    assert!(err.is_decode());
    assert_eq!(err.path(), Some(path.as_path()));
    assert!(doc.is_empty());
    assert!(doc.file_path().is_none());
}

#[test]
fn test_save_as_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.txt");

    let mut doc = Document::with_text("data");
    let err = controller::save_as(&mut doc, &path).unwrap_err();
    assert!(err.is_io());
    assert!(doc.is_dirty());
    assert!(doc.file_path().is_none());
}

#[test]
fn test_new_document_after_save_clears() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");

    let mut doc = Document::with_text("abc");
    assert_eq!(controller::new_document(&mut doc), NewDocument::ConfirmDiscard);
    controller::save_as(&mut doc, &path).unwrap();
    assert_eq!(controller::new_document(&mut doc), NewDocument::Cleared);
    assert!(doc.is_empty());
    assert!(doc.file_path().is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), "abc");
}

#[test]
fn test_tagged_requests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("req.txt");

    let mut doc = Document::with_text("via request");
    assert_eq!(controller::handle(&mut doc, Request::Save).unwrap(), Response::NeedsPath);
    assert_eq!(
        controller::handle(&mut doc, Request::SaveAs(SaveAsRequest { path: path.clone() })).unwrap(),
        Response::Saved(path.clone())
    );

    let mut other = Document::new();
    assert_eq!(
        controller::handle(&mut other, Request::Open(OpenRequest { path: path.clone() })).unwrap(),
        Response::Loaded(path)
    );
    assert_eq!(other.text(), "via request");
}
