use std::fs;
use std::path::Path;

use icy_pad_core::{FindDirection, FontSettings, MostRecentlyUsedFiles, Settings};

#[test]
fn test_settings_persist_across_loads() {
    let dir = tempfile::tempdir().unwrap();

    let settings = Settings::load_from(Some(dir.path().to_path_buf()));
    assert!(!*settings.word_wrap.read());
    settings.toggle_word_wrap();
    settings.set_font(FontSettings::new("Courier New", 14));
    settings.find.write().direction = FindDirection::Up;
    settings.store_persistent();

    assert!(dir.path().join(Settings::FILE_NAME).exists());

    let reloaded = Settings::load_from(Some(dir.path().to_path_buf()));
    assert!(*reloaded.word_wrap.read());
    assert!(*reloaded.show_status_bar.read());
    assert_eq!(reloaded.font.read().family, "Courier New");
    assert_eq!(reloaded.font.read().size, 14);
    assert_eq!(reloaded.find.read().direction, FindDirection::Up);
}

#[test]
fn test_broken_settings_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(Settings::FILE_NAME), "word_wrap = [").unwrap();

    let settings = Settings::load_from(Some(dir.path().to_path_buf()));
    assert!(!*settings.word_wrap.read());
    assert_eq!(*settings.font.read(), FontSettings::default());
}

#[test]
fn test_recent_files_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "a").unwrap();
    fs::write(&b, "b").unwrap();

    let mut mru = MostRecentlyUsedFiles::load_from(dir.path());
    mru.add_recent_file(&a);
    mru.add_recent_file(&b);
    mru.add_recent_file(&a);

    let mut reloaded = MostRecentlyUsedFiles::load_from(dir.path());
    let files = reloaded.get_recent_files().to_vec();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("b.txt"));
    assert!(files[1].ends_with("a.txt"));

    fs::remove_file(&b).unwrap();
    assert_eq!(reloaded.get_recent_files().len(), 1);
}

#[test]
fn test_recent_files_ignores_garbage() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("recent_files.json"), "not json").unwrap();
    let mru = MostRecentlyUsedFiles::load_from(dir.path());
    assert!(mru.is_empty());
    assert!(!Path::new(&dir.path().join("recent_files.json.tmp")).exists());
}
