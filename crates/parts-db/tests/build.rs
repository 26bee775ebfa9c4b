//! End-to-end full builds over a temporary project tree.

use std::fs;
use std::path::Path;

use parts_db::{BuildConfig, RefreshError, build, collect_build_inputs, load_snapshot};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "db/sources/community.json",
        r#"{"rows": [
            {"Type ID": 13, "ID": 4, "Part Type": "Barrel"},
            {"token": "abc", "Name": "Unkeyed"}
        ]}"#,
    );
    write(root, "db/README.csv", "ignored\n");
    write(
        root,
        "db/Item Parts Master List - Weapons.csv",
        "Type ID,ID,Part Type,String,Model Name,Stats\n\
         13,4,Barrel,DAD_AR_Barrel_01,Hot Slugger,Damage +5%\n",
    );
    write(
        root,
        "grenade/grenade_main_perk.csv",
        "Grenade_perk_main_ID,Part_ID,Part_type,Stat\n245,1,Perk,Damage\n",
    );
    dir
}

#[test]
fn inputs_follow_location_order() {
    let dir = project();
    let inputs = collect_build_inputs(&BuildConfig::for_root(dir.path()));
    let names: Vec<&str> = inputs.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["community", "Item Parts Master List - Weapons", "grenade_main_perk"]
    );
}

#[test]
fn richer_duplicate_wins_regardless_of_order() {
    let dir = project();
    let config = BuildConfig::for_root(dir.path());
    let report = build(&config).unwrap();
    assert!(report.updated);
    assert_eq!(report.rows_before, 0);

    let snapshot = load_snapshot(&report.output).unwrap();
    assert_eq!(snapshot.key_fields, vec!["code"]);

    let barrel: Vec<_> = snapshot.rows.iter().filter(|r| r.code == "{13:4}").collect();
    assert_eq!(barrel.len(), 1);
    assert_eq!(barrel[0].source, "Item Parts Master List - Weapons");
    assert_eq!(barrel[0].model_name, "Hot Slugger");

    // The token row has no code, so it passes through first.
    assert_eq!(snapshot.rows[0].model_name, "Unkeyed");
    assert_eq!(snapshot.rows.len(), 3);
}

#[test]
fn rebuilding_unchanged_inputs_is_deterministic() {
    let dir = project();
    let config = BuildConfig::for_root(dir.path());
    let first = build(&config).unwrap();
    let first_snapshot = load_snapshot(&first.output).unwrap();

    let second = build(&config).unwrap();
    let second_snapshot = load_snapshot(&second.output).unwrap();

    assert!(!second.updated);
    assert!(second.diff.is_unchanged());
    assert_eq!(first_snapshot.rows, second_snapshot.rows);
    assert_eq!(first_snapshot.columns, second_snapshot.columns);
    assert_eq!(first_snapshot.sources, second_snapshot.sources);
}

#[test]
fn empty_project_has_no_sources() {
    let dir = tempfile::tempdir().unwrap();
    let err = build(&BuildConfig::for_root(dir.path())).unwrap_err();
    assert!(matches!(err, RefreshError::NoSources { ref failures } if failures.is_empty()));
}
