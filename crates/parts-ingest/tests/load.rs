//! Integration tests for loading batches of sources.

use std::path::PathBuf;

use parts_ingest::{IngestError, load_source, load_sources};

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn failed_sources_are_skipped_and_recorded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let grenade = write(
        &dir,
        "grenade_main_perk.csv",
        "Grenade_perk_main_ID,Part_ID,Part_type,Stat\n245,1,Perk,Damage\n245,2,Perk,Radius\n",
    );
    let broken = write(&dir, "broken.json", "{ not json");
    let extra = write(&dir, "extra.json", r#"{"parts": [{"Part_ID": 3, "Stat": "Fuse"}]}"#);
    let missing = dir.path().join("missing.csv");

    let outcome = load_sources(&[
        ("grenade_main_perk".to_string(), grenade),
        ("broken".to_string(), broken),
        ("missing".to_string(), missing),
        ("extra".to_string(), extra),
    ]);

    let names: Vec<&str> = outcome.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["grenade_main_perk", "extra"]);
    assert_eq!(outcome.tables[0].records.len(), 2);
    assert_eq!(outcome.tables[1].records[0].get("Part_ID"), Some("3"));

    let failed: Vec<&str> = outcome.failures.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec!["broken", "missing"]);
    assert!(outcome.failures[0].reason.contains("failed to parse JSON"));
    assert!(outcome.failures[1].reason.contains("not found"));
}

#[test]
fn invalid_utf8_is_replaced_not_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("latin1.csv");
    std::fs::write(&path, b"ID,String\n1,Caf\xe9\n").expect("write fixture");

    let table = load_source(&path, "latin1").expect("load source");
    assert_eq!(table.name, "latin1");
    assert_eq!(table.records[0].get("String"), Some("Caf\u{fffd}"));
}

#[test]
fn missing_file_reports_not_found() {
    let err = load_source(std::path::Path::new("/no/such/table.csv"), "t").unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
