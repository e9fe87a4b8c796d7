use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn list_dir_orders_names_and_prepends_parent() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden"), b"x").unwrap();
    fs::write(dir.path().join("b.wav"), b"x").unwrap();
    fs::write(dir.path().join("a.mp3"), b"x").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let entries = list_dir(dir.path(), &LibrarySettings::default()).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["..", "a.mp3", "b.wav", "sub"]);

    assert_eq!(entries[0].kind, EntryKind::Directory);
    assert_eq!(entries[1].kind, EntryKind::AudioFile);
    assert_eq!(entries[2].kind, EntryKind::AudioFile);
    assert_eq!(entries[3].kind, EntryKind::Directory);
}

#[test]
fn list_dir_sort_is_case_sensitive_ascending() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Beta.txt"), b"x").unwrap();
    fs::write(dir.path().join("alpha.txt"), b"x").unwrap();

    let entries = list_dir(dir.path(), &LibrarySettings::default()).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    // Uppercase sorts before lowercase byte-wise.
    assert_eq!(names, vec!["..", "Beta.txt", "alpha.txt"]);
}

#[test]
fn list_dir_classifies_extensions_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("loud.WAV"), b"x").unwrap();
    fs::write(dir.path().join("quiet.Flac"), b"x").unwrap();
    fs::write(dir.path().join("readme.txt"), b"x").unwrap();
    fs::write(dir.path().join("noext"), b"x").unwrap();

    let entries = list_dir(dir.path(), &LibrarySettings::default()).unwrap();
    let kind_of = |name: &str| entries.iter().find(|e| e.name == name).unwrap().kind;
    assert_eq!(kind_of("loud.WAV"), EntryKind::AudioFile);
    assert_eq!(kind_of("quiet.Flac"), EntryKind::AudioFile);
    assert_eq!(kind_of("readme.txt"), EntryKind::Other);
    assert_eq!(kind_of("noext"), EntryKind::Other);
}

#[test]
fn list_dir_include_hidden_setting_keeps_dotfiles() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".secret.wav"), b"x").unwrap();

    let settings = LibrarySettings {
        include_hidden: true,
        ..LibrarySettings::default()
    };
    let entries = list_dir(dir.path(), &settings).unwrap();
    assert!(entries.iter().any(|e| e.name == ".secret.wav"));
}

#[test]
fn list_dir_reports_unreadable_directory() {
    let err = list_dir(Path::new("/nonexistent/beatpick-void"), &LibrarySettings::default())
        .unwrap_err();
    let LibraryError::PathNotAccessible { path, .. } = err;
    assert_eq!(path, Path::new("/nonexistent/beatpick-void"));
}

#[test]
fn list_dir_entries_carry_stat_columns() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("clip.wav"), vec![0u8; 2048]).unwrap();

    let entries = list_dir(dir.path(), &LibrarySettings::default()).unwrap();
    let clip = entries.iter().find(|e| e.name == "clip.wav").unwrap();
    assert_eq!(clip.size_bytes, 2048);
    assert!(clip.mode_bits != 0);
    assert!(clip.modified.is_some());
}

#[test]
fn parent_entry_at_root_is_a_noop_target() {
    let entries = list_dir(Path::new("/"), &LibrarySettings::default()).unwrap();
    assert_eq!(entries[0].name, "..");
    assert_eq!(entries[0].path, Path::new("/"));
}

#[test]
fn humanize_size_steps_through_units() {
    assert_eq!(humanize_size(512), "512.0bytes");
    assert_eq!(humanize_size(2048), "2.0KB");
    assert_eq!(humanize_size(5 * 1024 * 1024), "5.0MB");
}

#[test]
fn format_mode_masks_to_permission_bits() {
    assert_eq!(format_mode(0o100644), "644");
    assert_eq!(format_mode(0o040755), "755");
}
