/// Noodle slugs the legacy single-field encoding can carry. The vocabulary
/// never lived in a lookup table, so it is pinned here.
pub const KNOWN_NOODLE_SLUGS: [&str; 6] = [
    "flat_rice",
    "egg_noodle",
    "rice_vermicelli",
    "glass_noodle",
    "thin_rice",
    "wide_rice",
];

/// Legacy markers meaning "this item has no noodle choice".
pub const NOT_APPLICABLE_MARKERS: [&str; 3] = ["na", "n/a", "none"];

/// Name given to the synthetic group parsed from the legacy encoding.
pub const SYNTHETIC_NOODLE_GROUP_NAME: &str = "Noodles";

/// A raw option group row as stored. Select bounds are untrusted and get
/// clamped during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOptionGroupRow {
    pub id: i64,
    pub item_id: i64,
    pub name: String,
    pub kind: String,
    pub required: bool,
    pub min_select: i64,
    pub max_select: i64,
    pub sort_order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOptionValueRow {
    pub option_id: i64,
    pub name: String,
    pub label: Option<String>,
    pub enabled: bool,
    pub sort_order: i64,
}
