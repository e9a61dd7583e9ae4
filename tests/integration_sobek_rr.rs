//! Integration tests for Sobek RR model directories
//!
//! These tests write a small rainfall-runoff model with nodes, paved areas
//! and paved storage, then read it file by file and as one batch.

use hydro_formats::ReaderConfig;
use hydro_formats::app::services::batch_import::{
    BatchImporter, FileKind, ImportStatus, ImportedData,
};
use hydro_formats::app::services::progress::{ProgressUpdate, no_progress};
use hydro_formats::app::services::sobek_rr::{
    PavedRecord, SobekFileKind, SobekRecords, SobekRrReader, StorageRecord,
};
use hydro_formats::app::services::tagged_records::MissingTagPolicy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const NODES: &str = r#"NODE id 'GS01' nm 'paved 1' ri '-1' mt 1 '1' ObID '3B_PAVED' px 100 py 200 node
NODE id 'GS02' nm 'paved 2' ri '-1' mt 1 '1' ObID '3B_PAVED' px 150 py 200 node
NODE id 'BND1' nm 'outlet' ri '-1' mt 1 '6' ObID '3B_BOUNDARY' px 300 py 200 node
"#;

const PAVED: &str = r#"PAVE id 'GS01' ar 5400 lv 9.99 ss 1 sd 'PAV1' qc 0 0 0.0315 qo 2 0 ms 'GFE1000' aaf 1 is 0 np 70 dw '1' ro 0 ru 0 qh '' pave
PAVE id 'GS02' ar 1200
     lv 3.5 sd 'PAV2' ms 'GFE1000' pave
PAVE nm 'no id' ar 10 pave
"#;

const PAVED_STORAGE: &str = r#"STDF id 'PAV1' nm 'PAV1' ms 1 is 0 mr 0.5 0.25 ir 0 0.1 stdf
STDF id 'PAV2' nm 'PAV2' ms 2 is 0 mr 1 1 ir 0 0 stdf
"#;

fn write_file(directory: &Path, name: &str, content: &str) -> PathBuf {
    let path = directory.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn create_model() -> TempDir {
    let model = TempDir::new().unwrap();
    write_file(model.path(), "3B_NOD.TP", NODES);
    write_file(model.path(), "PAVED.3B", PAVED);
    write_file(model.path(), "PAVED.STO", PAVED_STORAGE);
    model
}

/// Test that paved areas reference storage definitions and nodes of the same model
///
/// Purpose: Validate record extraction across the files of one model
/// Benefit: Ensures ids read from different files can be joined
#[test]
fn test_paved_areas_resolve_storage_and_nodes() {
    let model = create_model();
    let reader = SobekRrReader::new(&ReaderConfig::default().sobek);

    let paved = reader
        .read_file::<PavedRecord>(&model.path().join("PAVED.3B"))
        .unwrap();
    let storage = reader
        .read_file::<StorageRecord>(&model.path().join("PAVED.STO"))
        .unwrap();
    let (nodes, node_stats) = reader
        .read_known_file(&model.path().join("3B_NOD.TP"))
        .unwrap();

    // The record without an id is skipped and reported with its line
    assert_eq!(paved.stats.blocks, 3);
    assert_eq!(paved.records.len(), 2);
    assert_eq!(paved.stats.skipped.len(), 1);
    assert_eq!(paved.stats.skipped[0].line(), Some(4));
    assert!(node_stats.is_complete());

    let storage_by_id: HashMap<&str, &StorageRecord> = storage
        .records
        .iter()
        .map(|record| (record.id.as_str(), record))
        .collect();
    let SobekRecords::Nodes(nodes) = nodes else {
        panic!("expected node records");
    };

    for area in &paved.records {
        let storage_id = area.storage_id.as_deref().unwrap();
        assert!(storage_by_id.contains_key(storage_id));
        assert!(nodes.iter().any(|node| node.id == area.id));
    }

    // A record spanning two lines keeps its fields
    let second = &paved.records[1];
    assert_eq!(second.area, 1200.0);
    assert_eq!(second.street_level, 3.5);
    assert_eq!(
        storage_by_id["PAV2"].max_sewer_storage,
        Some((1.0, 1.0))
    );
}

/// Test the missing-tag policy on a file without any records
#[test]
fn test_empty_file_follows_missing_tag_policy() {
    let model = TempDir::new().unwrap();
    let path = write_file(model.path(), "PAVED.STO", "* no storage defined\n");

    let lenient = SobekRrReader::new(&ReaderConfig::default().sobek);
    assert!(lenient.read_file::<StorageRecord>(&path).unwrap().records.is_empty());

    let strict = lenient.with_missing_tag_policy(MissingTagPolicy::Error);
    assert!(strict.read_file::<StorageRecord>(&path).is_err());
}

/// Test importing the model directory with progress reporting
///
/// Purpose: Validate Sobek file detection by name and record counting per file
/// Benefit: Ensures skipped records surface as warnings instead of failures
#[test]
fn test_import_sobek_model() {
    let model = create_model();
    let importer = BatchImporter::new(ReaderConfig::default());

    let mut updates: Vec<ProgressUpdate> = Vec::new();
    let summary = importer
        .import(
            &[model.path().to_path_buf()],
            &mut |update: &ProgressUpdate| updates.push(update.clone()),
            &CancellationToken::new(),
        )
        .unwrap();

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.imported_count(), 3);
    assert_eq!(summary.total_items(), 3 + 2 + 2);
    assert_eq!(summary.warning_count(), 1);

    let paved = summary
        .files
        .iter()
        .find(|file| file.path.ends_with("PAVED.3B"))
        .unwrap();
    assert_eq!(paved.kind, Some(FileKind::Sobek(SobekFileKind::Paved)));
    assert_eq!(paved.status, ImportStatus::Imported);
    assert!(matches!(
        paved.data,
        Some(ImportedData::Sobek(SobekRecords::Paved(ref records))) if records.len() == 2
    ));

    let last = updates.last().unwrap();
    assert_eq!((last.current, last.total), (3, 3));
}

/// Test that a cancelled batch reads nothing and says so
#[test]
fn test_cancelled_import_reads_nothing() {
    let model = create_model();
    let token = CancellationToken::new();
    token.cancel();

    let summary = BatchImporter::new(ReaderConfig::default())
        .import(&[model.path().to_path_buf()], &mut no_progress, &token)
        .unwrap();

    assert!(summary.cancelled);
    assert!(summary.files.is_empty());
    assert!(!summary.is_successful());
}
