use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use adr_core::config::LogLayout;
use adr_core::patch::{patch_file, AnchorNotFoundPolicy, InsertionMode};
use adr_core::{
    CrossReferenceEngine, LinkRelation, OsFs, RecordError, RecordKind, RecordStore, RecordWriter,
};

fn layout(root: &Path) -> LogLayout {
    LogLayout::new(root.join("docs").join("adr"))
}

#[test]
fn create_then_find_round_trips_title() {
    let temp = TempDir::new().expect("tempdir");
    let writer = RecordWriter::new(OsFs, layout(temp.path()));
    let store = RecordStore::new(OsFs, layout(temp.path()));

    writer
        .create("ignored", RecordKind::Initial)
        .expect("initial");
    let record = writer
        .create("My Decision", RecordKind::Standard)
        .expect("create");
    assert_eq!(record.number, 2);
    assert!(record.path.is_absolute());
    assert!(record.path.is_file());

    let found = store
        .find_by_number(record.number)
        .expect("find")
        .expect("record");
    assert_eq!(found.title, "My Decision");
    assert_eq!(found.file_name(), Some("0002-my_decision.md"));
}

#[test]
fn next_number_over_real_directory() {
    let temp = TempDir::new().expect("tempdir");
    let store = RecordStore::new(OsFs, layout(temp.path()));
    assert_eq!(store.next_number().expect("next"), 1);

    let dir = temp.path().join("docs").join("adr");
    fs::create_dir_all(dir.join("0100-subdir.md")).expect("subdir");
    fs::write(dir.join("0003-c.md"), "# 3. C\n").expect("write");
    fs::write(dir.join("0012-l.md"), "# 12. L\n").expect("write");
    fs::write(dir.join("notes.md"), "# Notes\n").expect("write");
    assert_eq!(store.next_number().expect("next"), 13);
}

#[test]
fn supersede_updates_both_files_on_disk() {
    let temp = TempDir::new().expect("tempdir");
    let writer = RecordWriter::new(OsFs, layout(temp.path()));
    let engine = CrossReferenceEngine::new(OsFs, layout(temp.path()));

    let old = writer
        .create("Use MySQL", RecordKind::Standard)
        .expect("old");
    let new = writer
        .create("Use Postgres", RecordKind::Standard)
        .expect("new");
    engine.supersede(old.number, &new).expect("supersede");

    let old_text = fs::read_to_string(&old.path).expect("old text");
    let status_idx = old_text.find("## Status").expect("status");
    let context_idx = old_text.find("## Context").expect("context");
    assert_eq!(
        &old_text[status_idx..context_idx],
        "## Status\n\nSuperceded by: [Use Postgres](0002-use_postgres.md)\n\n"
    );

    let new_text = fs::read_to_string(&new.path).expect("new text");
    assert!(new_text.contains("Supercedes: [Use MySQL](0001-use_mysql.md)\n\n## Context"));
    assert!(new_text.contains("## Status\n\nProposed\n"));
}

#[test]
fn link_by_token_writes_reverse_link() {
    let temp = TempDir::new().expect("tempdir");
    let writer = RecordWriter::new(OsFs, layout(temp.path()));
    let engine = CrossReferenceEngine::new(OsFs, layout(temp.path()));

    let base = writer.create("Base", RecordKind::Standard).expect("base");
    let amend = writer.create("Amend base", RecordKind::Standard).expect("amend");
    let relation: LinkRelation = "1:Amends:Amended by".parse().expect("token");
    let target = engine.link(&amend, &relation).expect("link");
    assert_eq!(target.number, base.number);

    let base_text = fs::read_to_string(&base.path).expect("base text");
    assert!(base_text.contains("Amended by: [Amend base](0002-amend_base.md)"));
    assert!(base_text.contains("## Status\n\nProposed\n"));
    let amend_text = fs::read_to_string(&amend.path).expect("amend text");
    assert!(amend_text.contains("Amends: [Base](0001-base.md)\n\n## Context"));
}

#[test]
fn cross_reference_on_missing_directory_reports_it() {
    let temp = TempDir::new().expect("tempdir");
    let engine = CrossReferenceEngine::new(OsFs, layout(temp.path()));
    let orphan = adr_core::Record {
        number: 1,
        title: "Orphan".to_string(),
        path: temp.path().join("0001-orphan.md"),
    };
    fs::write(&orphan.path, "# 1. Orphan\n").expect("write");
    let err = engine.supersede(3, &orphan).expect_err("no dir");
    assert!(matches!(err, RecordError::DirectoryNotFound(_)));
}

#[test]
fn patch_file_is_not_idempotent() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("0001-a.md");
    fs::write(&path, "# 1. A\n\n## Status\n\nAccepted\n\n## Context\n").expect("write");
    let block = vec!["Amends: [B](0002-b.md)".to_string(), String::new()];
    for _ in 0..2 {
        patch_file(
            &OsFs,
            &path,
            "## Context",
            &block,
            InsertionMode::Prepend,
            AnchorNotFoundPolicy::InsertAtStart,
        )
        .expect("patch");
    }
    let text = fs::read_to_string(&path).expect("read");
    assert_eq!(text.matches("Amends: [B](0002-b.md)").count(), 2);
}
