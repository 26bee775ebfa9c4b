//! Tests for parts-model serialization shapes.

use parts_model::{CanonicalRow, Snapshot, SourceOrigin};

#[test]
fn canonical_row_uses_table_headers_and_flattens_extras() {
    let mut row = CanonicalRow::new("all_weapon_part");
    row.code = "{13:4}".to_string();
    row.item_category = "Assault Rifle".to_string();
    row.extras.insert(
        "Manufacturer & Weapon Type ID".to_string(),
        "13".to_string(),
    );

    let value = serde_json::to_value(&row).expect("serialize row");
    assert_eq!(value["source"], "all_weapon_part");
    assert_eq!(value["Weapon Type"], "Assault Rifle");
    assert_eq!(value["Manufacturer & Weapon Type ID"], "13");
    assert_eq!(value["Stats"], "");

    let round: CanonicalRow = serde_json::from_value(value).expect("deserialize row");
    assert_eq!(round, row);
}

#[test]
fn unknown_row_fields_land_in_extras() {
    let json = r#"{"source":"s","code":"{2:1}","token":"abc","ID":"1"}"#;
    let row: CanonicalRow = serde_json::from_str(json).expect("parse row");
    assert_eq!(row.id, "1");
    assert_eq!(row.extras.get("token").map(String::as_str), Some("abc"));
    assert!(row.manufacturer.is_empty());
}

#[test]
fn non_text_cells_are_read_as_text() {
    let json = r#"{"source":"s","ID":4,"Stats":null,"Type ID":13.0,"scale":1.5,"legacy":true,"tags":["a"]}"#;
    let row: CanonicalRow = serde_json::from_str(json).expect("parse row");
    assert_eq!(row.id, "4");
    assert_eq!(row.stats, "");
    assert_eq!(row.extras.get("Type ID").map(String::as_str), Some("13"));
    assert_eq!(row.extras.get("scale").map(String::as_str), Some("1.5"));
    assert_eq!(row.extras.get("legacy").map(String::as_str), Some("true"));
    assert_eq!(row.extras.get("tags").map(String::as_str), Some(""));
}

#[test]
fn snapshot_round_trips() {
    let snapshot = Snapshot {
        generated_at: "2025-09-14T08:30:00Z".to_string(),
        sources: vec![SourceOrigin::new("grenade_main_perk", "grenade/grenade_main_perk.csv")],
        columns: vec!["source".to_string(), "code".to_string()],
        key_fields: vec!["code".to_string()],
        rows: vec![CanonicalRow::new("grenade_main_perk")],
    };
    let json = serde_json::to_string_pretty(&snapshot).expect("serialize snapshot");
    let round: Snapshot = serde_json::from_str(&json).expect("deserialize snapshot");
    assert_eq!(round, snapshot);
    assert_eq!(round.len(), 1);
}
