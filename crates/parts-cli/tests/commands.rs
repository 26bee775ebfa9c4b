//! Commands run against a temporary project tree.

use std::fs;
use std::path::Path;

use parts_cli::commands::{
    TokenEdits, Workspace, load_resolver, run_build, run_edit, run_inspect, run_resolve,
};
use parts_cli::settings::{CONFIG_FILENAME, Settings, load_settings, locate_settings};
use parts_resolve::render_lines;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "db/sources/weapons.csv",
        "Type ID,ID,Part Type,String,Stats\n\
         270,83,Barrel,Long Barrel,Damage +10%\n\
         270,82,Mag,Extended Mag,\n\
         270,62,Scope,Red Dot Scope,\n",
    );
    write(
        dir.path(),
        "weapon_edit/elemental.csv",
        "Elemental_ID,Part_ID,Stat\n1,10,Fire\n",
    );
    dir
}

#[test]
fn build_then_resolve() {
    let dir = project();
    let workspace = Workspace::new(dir.path(), Settings::default());

    let report = run_build(&workspace, None).unwrap();
    assert!(report.updated);
    assert_eq!(report.rows_after, 3);
    assert!(
        report
            .message()
            .starts_with("Parts DB updated. Rows: 0 -> 3. Added 3, removed 0, changed 0.")
    );

    let resolver = load_resolver(&workspace, None);
    let rows = run_resolve(
        &resolver,
        "270, 0, 1, 50| 2, 969|| {83} {82} {1:10} {62} {83} |",
        Some("weapon_edit"),
    );
    insta::assert_snapshot!(render_lines(&rows).join("\n"), @r"
    2x {270:83} [Barrel] Long Barrel - Damage +10%
    1x {1:10} [Elemental] Fire
    1x {270:82} [Mag] Extended Mag
    1x {270:62} [Scope] Red Dot Scope
    ");

    let snapshot = run_inspect(&workspace, None).unwrap();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.sources[0].name, "weapons");
}

#[test]
fn rebuilding_unchanged_sources_reports_no_change() {
    let dir = project();
    let workspace = Workspace::new(dir.path(), Settings::default());
    run_build(&workspace, None).unwrap();
    let again = run_build(&workspace, None).unwrap();
    assert!(!again.updated);
    assert_eq!(again.diff.added + again.diff.removed + again.diff.changed, 0);
}

#[test]
fn resolving_without_a_database_gives_unknown_parts() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = Workspace::new(dir.path(), Settings::default());
    let resolver = load_resolver(&workspace, None);
    let rows = run_resolve(&resolver, "13|| {4} |", None);
    assert_eq!(render_lines(&rows), vec!["1x {13:4} [Unknown] {4}"]);
    assert!(run_resolve(&resolver, "no separator {4}", None).is_empty());
    assert!(run_inspect(&workspace, None).is_err());
}

#[test]
fn edits_apply_in_order() {
    let decoded = "270, 0, 1, 50| 2, 969|| {83} {82} {62} |";
    let edits = TokenEdits {
        delete: Some(0),
        move_up: Some(1),
        skin: Some("Cosmetics_Weapon_Shiny_Ultimate".to_string()),
        ..TokenEdits::default()
    };
    assert_eq!(
        run_edit(decoded, &edits).unwrap(),
        r#"270, 0, 1, 50| 2, 969|| {62} {82} | "c", "Cosmetics_Weapon_Shiny_Ultimate" |"#
    );

    let out_of_range = TokenEdits {
        delete: Some(7),
        ..TokenEdits::default()
    };
    let err = run_edit(decoded, &out_of_range).unwrap_err();
    assert_eq!(err.to_string(), "no token at position 7 (3 tokens)");
    assert!(run_edit("270 {83}", &TokenEdits::default()).is_err());
}

#[test]
fn project_settings_are_found_and_applied() {
    let dir = project();
    write(
        dir.path(),
        CONFIG_FILENAME,
        "[build]\noutput = \"out/parts.json\"\n\n\
         [resolve]\nsnapshot = \"out/parts.json\"\n\n\
         [resolve.sections]\nweapon_edit = [\"weapons\"]\n",
    );

    let path = locate_settings(None, dir.path());
    assert_eq!(path.as_deref(), Some(dir.path().join(CONFIG_FILENAME).as_path()));
    let settings = load_settings(path.as_deref());
    assert_eq!(settings.update, Settings::default().update);
    assert_eq!(settings.resolve.sections.prefixes("weapon_edit"), ["weapons"]);
    assert!(settings.resolve.sections.prefixes("grenade").is_empty());

    let workspace = Workspace::new(dir.path(), settings);
    let report = run_build(&workspace, None).unwrap();
    assert_eq!(report.output, dir.path().join("out/parts.json"));
    assert_eq!(run_inspect(&workspace, None).unwrap().len(), 3);
}

#[test]
fn broken_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.toml", "[build\noutput = 3");
    let settings = load_settings(Some(&dir.path().join("broken.toml")));
    assert_eq!(settings, Settings::default());
    assert_eq!(load_settings(Some(&dir.path().join("absent.toml"))), Settings::default());
}
