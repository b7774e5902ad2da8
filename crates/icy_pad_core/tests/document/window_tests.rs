use std::fs;
use std::sync::Arc;

use parking_lot::RwLock;

use icy_pad_core::commands::Command;
use icy_pad_core::{ConfirmAnswer, EditorWindow, MemoryClipboard, Message, Notification, Prompt, Settings, WindowEvent, WindowManager};

fn window() -> EditorWindow {
    EditorWindow::new(Arc::new(RwLock::new(Settings::default())))
}

#[test]
fn test_save_prompt_then_path_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    let mut clip = MemoryClipboard::new();
    let mut win = window();

    win.update(Message::TypeText("hello".into()), &mut clip);
    assert_eq!(win.title(), "Untitled*");
    assert!(matches!(win.update(Message::Command(Command::Save), &mut clip), WindowEvent::Prompt(Prompt::ChooseSavePath { .. })));

    let event = win.update(Message::SaveAsPath(path.clone()), &mut clip);
    assert!(matches!(event, WindowEvent::Notify(Notification::Saved(ref p)) if p == &path));
    assert_eq!(win.title(), "note.txt");
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
}

#[test]
fn test_confirm_save_then_new() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draft.txt");
    let mut clip = MemoryClipboard::new();
    let mut win = window();

    win.update(Message::TypeText("draft".into()), &mut clip);
    assert!(matches!(win.update(Message::Command(Command::NewFile), &mut clip), WindowEvent::Prompt(Prompt::ConfirmDiscard { .. })));
    assert!(matches!(win.update(Message::Confirm(ConfirmAnswer::Save), &mut clip), WindowEvent::Prompt(Prompt::ChooseSavePath { .. })));

    win.update(Message::SaveAsPath(path.clone()), &mut clip);
    assert_eq!(fs::read_to_string(&path).unwrap(), "draft");
    assert!(win.document().is_empty());
    assert!(win.document().file_path().is_none());
    assert!(!win.is_modified());
}

#[test]
fn test_open_replaces_clean_document_and_resets_undo() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.py");
    fs::write(&path, "print('hi')\n").unwrap();
    let mut clip = MemoryClipboard::new();
    let mut win = window();

    assert!(matches!(
        win.update(Message::Command(Command::Open), &mut clip),
        WindowEvent::Prompt(Prompt::ChooseOpenPath { ref filters }) if filters[1].pattern() == "*.py;*.pyc"
    ));
    let event = win.update(Message::OpenPath(path.clone()), &mut clip);
    assert!(matches!(event, WindowEvent::Notify(Notification::Loaded(_))));
    assert_eq!(win.document().text(), "print('hi')\n");
    assert!(!win.edit_state().can_undo());
    assert_eq!(win.title(), "in.py");
}

#[test]
fn test_open_invalid_utf8_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, [0xc3, 0x28]).unwrap();
    let mut clip = MemoryClipboard::new();
    let mut win = window();
    win.update(Message::TypeText("old".into()), &mut clip);

    match win.update(Message::OpenPath(path), &mut clip) {
        WindowEvent::Notify(Notification::OpenFailed(err)) => assert!(err.is_decode()),
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(win.document().text(), "old");
    assert!(win.is_modified());
}

#[test]
fn test_edit_menu_marks_dirty_and_undoes() {
    let mut clip = MemoryClipboard::new();
    let mut win = window();
    win.update(Message::TypeText("abc".into()), &mut clip);
    win.update(Message::Command(Command::SelectAll), &mut clip);
    win.update(Message::Command(Command::Cut), &mut clip);
    assert_eq!(win.document().text(), "");
    win.update(Message::Command(Command::Paste), &mut clip);
    win.update(Message::Command(Command::Paste), &mut clip);
    assert_eq!(win.document().text(), "abcabc");
    win.update(Message::Command(Command::Undo), &mut clip);
    assert_eq!(win.document().text(), "abc");
    assert!(win.is_modified());
}

#[test]
fn test_recent_files_shared_between_windows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.txt");
    fs::write(&path, "x").unwrap();

    let mut wm = WindowManager::new(Settings::default(), Box::new(MemoryClipboard::new()));
    let first = wm.active_id().unwrap();
    wm.update(first, Message::OpenPath(path));
    let second = wm.open_window();

    assert_eq!(wm.settings().read().recent_files.files().len(), 1);
    assert!(wm.window(second).unwrap().document().is_empty());
}

#[test]
fn test_with_path_loads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("start.txt");
    fs::write(&path, "start").unwrap();

    let (wm, event) = WindowManager::with_path(Settings::default(), Box::new(MemoryClipboard::new()), path);
    assert!(matches!(event, WindowEvent::Notify(Notification::Loaded(_))));
    assert_eq!(wm.active().unwrap().document().text(), "start");
}
