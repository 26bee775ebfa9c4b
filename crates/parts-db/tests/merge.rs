//! Merge properties over normalized source tables.

use chrono::{TimeZone, Utc};
use parts_db::{KeyPolicy, MergeMode, MergedTable, diff_rows, merge_sources, save_snapshot};
use parts_ingest::parse_csv_text;
use parts_map::{NormalizedSource, normalize_table};
use parts_model::Snapshot;

fn source(name: &str, csv: &str) -> NormalizedSource {
    let mut table = parse_csv_text(csv, &format!("{name}.csv")).unwrap();
    table.name = name.to_string();
    normalize_table(&table)
}

#[test]
fn completeness_five_beats_three_across_sources() {
    // source, code, ID = 3 fields
    let sparse = source("sparse", "Type ID,ID\n13,4\n");
    // source, code, ID, Part Type, String = 5 fields
    let rich = source("rich", "Type ID,ID,Part Type,String\n13,4,Barrel,Long\n");

    for order in [[&sparse, &rich], [&rich, &sparse]] {
        let sources: Vec<NormalizedSource> = order.iter().map(|s| (*s).clone()).collect();
        let merged = merge_sources(&sources, MergeMode::Updater);
        assert_eq!(merged.rows.len(), 1);
        assert_eq!(merged.rows[0].source, "rich");
        assert_eq!(merged.rows[0].completeness(), 5);
    }
}

#[test]
fn without_a_key_no_row_is_dropped() {
    let notes = source("notes", "Name,Effects\nShock,Arcs\nShock,Arcs\nFire,Burns\n");
    let merged = merge_sources(&[notes], MergeMode::Updater);
    assert_eq!(merged.key, KeyPolicy::Unkeyed);
    assert!(merged.key_fields().is_empty());
    assert_eq!(merged.rows.len(), 3);
}

#[test]
fn rows_with_blank_keys_pass_through_first() {
    let mixed = source("mixed", "ID,Stats\n1,a\n,orphan\n2,b\n");
    let merged = merge_sources(&[mixed], MergeMode::Updater);
    assert_eq!(merged.key, KeyPolicy::Code);
    let stats: Vec<&str> = merged.rows.iter().map(|r| r.stats.as_str()).collect();
    assert_eq!(stats, vec!["orphan", "a", "b"]);
}

fn saved_bytes(merged: MergedTable, dir: &tempfile::TempDir, file: &str) -> Vec<u8> {
    let at = Utc.with_ymd_and_hms(2025, 9, 14, 8, 30, 0).unwrap();
    let key_fields = merged.key_fields();
    let snapshot = Snapshot::generated(at, merged.sources, merged.columns, key_fields, merged.rows);
    let path = dir.path().join(file);
    save_snapshot(&snapshot, &path).unwrap();
    std::fs::read(path).unwrap()
}

#[test]
fn merge_is_deterministic() {
    let a = source("a", "ID,Stats\n1,x\n2,y\n1,xx\n");
    let b = source("b", "Part_ID,Stat,Description\n2,y,longer\n3,z,\n");
    let first = merge_sources(&[a.clone(), b.clone()], MergeMode::Builder);
    let second = merge_sources(&[a, b], MergeMode::Builder);

    let dir = tempfile::tempdir().unwrap();
    let first = saved_bytes(first, &dir, "first.json");
    let second = saved_bytes(second, &dir, "second.json");
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn token_key_ignores_column_casing_across_sources() {
    let upper = source("upper", "Token,Name\nabc,Shock\n");
    let lower = source("lower", "token,Name,Effects\nabc,Shock,Arcs\n");
    let merged = merge_sources(&[upper, lower], MergeMode::Updater);
    assert_eq!(merged.key, KeyPolicy::Token("Token".to_string()));
    assert_eq!(merged.rows.len(), 1);
    assert_eq!(merged.rows[0].source, "lower");
    assert_eq!(merged.rows[0].effects, "Arcs");

    let before = merge_sources(&[source("upper", "Token,Name\nabc,Shock\n")], MergeMode::Updater);
    let diff = diff_rows(&before.rows, &merged.rows, &merged.key_fields());
    assert_eq!((diff.added, diff.removed, diff.changed), (0, 0, 1));
}
