//! Batch export: loading, writing notes, the version stamp and the zip archive.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::fs;
use std::io::Read;

use serde_json::json;
use spellmark::export::{self, archive};
use spellmark::Error;
use tempfile::TempDir;

fn write_input(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("spells.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_spells_reads_array() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, r#"[{"name": "Aid"}, {"name": "Alarm"}]"#);

    let spells = export::load_spells(&path).unwrap();
    assert_eq!(spells.len(), 2);
    assert_eq!(spells[1]["name"], "Alarm");
}

#[test]
fn load_spells_rejects_non_array() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, r#"{"spell": []}"#);

    match export::load_spells(&path) {
        Err(Error::InvalidInput(message)) => assert!(message.contains("array")),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn load_spells_reports_parse_errors_with_file() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "[{\"name\": ");

    match export::load_spells(&path) {
        Err(Error::Parse { file: Some(file), .. }) => assert_eq!(file, path),
        other => panic!("Expected Parse error, got {other:?}"),
    }
}

#[test]
fn load_spells_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = export::load_spells(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Io { path: Some(_), .. }));
}

#[test]
fn export_writes_one_note_per_spell() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("output").join("spells");
    let spells = vec![
        json!({"name": "Fire Bolt", "level": 0, "entries": ["A mote of fire."]}),
        json!({"name": "Antipathy/Sympathy", "level": 8, "entries": ["Attract or repel."]}),
        json!({"level": 1, "entries": ["No name."]}),
    ];

    let report = export::export_spells(&spells, &out).unwrap();
    assert!(report.is_success());
    assert_eq!(
        report.written,
        vec![out.join("Fire Bolt.md"), out.join("Antipathy-Sympathy.md"), out.join("unnamed.md")]
    );

    let fire_bolt = fs::read_to_string(out.join("Fire Bolt.md")).unwrap();
    assert!(fire_bolt.starts_with("---\ntags:\n  - Spell\n  - Cantrip\n"));
    assert!(fire_bolt.ends_with("A mote of fire.\n"));
}

#[test]
fn colliding_names_keep_the_last_record() {
    let dir = TempDir::new().unwrap();
    let spells = vec![
        json!({"name": "Shield", "entries": ["first"]}),
        json!({"name": "Shield", "entries": ["second"]}),
    ];

    export::export_spells(&spells, dir.path()).unwrap();
    let note = fs::read_to_string(dir.path().join("Shield.md")).unwrap();
    assert!(note.ends_with("second\n"));
}

#[test]
fn version_file_contains_only_the_version() {
    let dir = TempDir::new().unwrap();
    let path = export::write_version_file(dir.path(), "0.3.1").unwrap();
    assert_eq!(path, dir.path().join("_version.txt"));
    assert_eq!(fs::read_to_string(path).unwrap(), "0.3.1");
}

#[test]
fn archive_contains_sorted_notes_and_version() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("spells");
    let spells = vec![
        json!({"name": "Sending", "entries": ["Send a message."]}),
        json!({"name": "Aid", "entries": ["Bolster allies."]}),
    ];
    export::export_spells(&spells, &out).unwrap();
    export::write_version_file(&out, "1.0.0").unwrap();

    let archive_dir = dir.path().join("dist");
    let zip_path = archive::create_archive(&out, &archive_dir, "1.0.0").unwrap();
    assert_eq!(zip_path, archive_dir.join("spells-1.0.0.zip"));

    let mut zip = zip::ZipArchive::new(fs::File::open(&zip_path).unwrap()).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["Aid.md", "Sending.md", "_version.txt"]);

    let mut aid = String::new();
    zip.by_name("Aid.md").unwrap().read_to_string(&mut aid).unwrap();
    assert_eq!(aid, fs::read_to_string(out.join("Aid.md")).unwrap());
}
