//! Type ids of the serial format and the item kind each one names.
//!
//! This is reference data about the game's serial layout, not derived from
//! any source table. It lets a typed reference fall back to a
//! manufacturer/item-type/part-id lookup when no row carries its code.

/// `(type id, manufacturer, item type)`, sorted by type id.
pub const TYPE_TABLE: &[(u32, &str, &str)] = &[
    (1, "Element", "Element"),
    (2, "Daedalus", "Pistol"),
    (3, "Jakobs", "Pistol"),
    (4, "Order", "Pistol"),
    (5, "Tediore", "Pistol"),
    (6, "Torgue", "Pistol"),
    (7, "Ripper", "Shotgun"),
    (8, "Daedalus", "Shotgun"),
    (9, "Jakobs", "Shotgun"),
    (10, "Maliwan", "Shotgun"),
    (11, "Tediore", "Shotgun"),
    (12, "Torgue", "Shotgun"),
    (13, "Daedalus", "Assault Rifle"),
    (14, "Tediore", "Assault Rifle"),
    (15, "Order", "Assault Rifle"),
    (16, "Vladof", "Sniper"),
    (17, "Torgue", "Assault Rifle"),
    (18, "Vladof", "Assault Rifle"),
    (19, "Ripper", "SMG"),
    (20, "Daedalus", "SMG"),
    (21, "Maliwan", "SMG"),
    (22, "Vladof", "SMG"),
    (23, "Ripper", "Sniper"),
    (24, "Jakobs", "Sniper"),
    (25, "Maliwan", "Sniper"),
    (26, "Order", "Sniper"),
    (27, "Jakobs", "Assault Rifle"),
    (234, "Classmods", "Classmod"),
    (237, "Shield", "Armor Shield"),
    (243, "Repkit", "Repkit"),
    (245, "Grenade", "Grenade"),
    (246, "Shield", "Shield"),
    (247, "Enhancement", "Enhancement"),
    (248, "Shield", "Energy Shield"),
    (254, "Siren", "Classmod"),
    (255, "Paladin", "Classmod"),
    (256, "Exo Soldier", "Classmod"),
    (259, "Gravitar", "Classmod"),
    (261, "Torgue", "Repkit"),
    (263, "Maliwan", "Grenade"),
    (264, "Hyperion", "Enhancement"),
    (265, "Jakobs", "Repkit"),
    (266, "Maliwan", "Repkit"),
    (267, "Jakobs", "Grenade"),
    (268, "Jakobs", "Enhancement"),
    (269, "Vladof", "Repkit"),
    (270, "Daedalus", "Grenade"),
    (271, "Maliwan", "Enhancement"),
    (272, "Order", "Grenade"),
    (273, "Torgue", "Heavy Weapon"),
    (274, "Ripper", "Repkit"),
    (275, "Ripper", "Heavy Weapon"),
    (277, "Daedalus", "Repkit"),
    (278, "Ripper", "Grenade"),
    (279, "Maliwan", "Shield"),
    (281, "Order", "Enhancement"),
    (282, "Vladof", "Heavy Weapon"),
    (283, "Vladof", "Shield"),
    (284, "Atlas", "Enhancement"),
    (285, "Order", "Repkit"),
    (286, "COV", "Enhancement"),
    (287, "Tediore", "Shield"),
    (289, "Maliwan", "Heavy Weapon"),
    (290, "Tediore", "Repkit"),
    (291, "Vladof", "Grenade"),
    (292, "Tediore", "Enhancement"),
    (293, "Order", "Shield"),
    (296, "Ripper", "Enhancement"),
    (298, "Torgue", "Grenade"),
    (299, "Daedalus", "Enhancement"),
    (300, "Ripper", "Shield"),
    (303, "Torgue", "Enhancement"),
    (306, "Jakobs", "Shield"),
    (310, "Vladof", "Enhancement"),
    (311, "Tediore", "Grenade"),
    (312, "Daedalus", "Shield"),
    (321, "Torgue", "Shield"),
];

/// Manufacturer and item type of a type id.
#[must_use]
pub fn item_kind(type_id: u32) -> Option<(&'static str, &'static str)> {
    TYPE_TABLE
        .binary_search_by_key(&type_id, |(id, _, _)| *id)
        .ok()
        .map(|index| (TYPE_TABLE[index].1, TYPE_TABLE[index].2))
}
