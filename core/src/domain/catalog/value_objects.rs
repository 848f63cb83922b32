use serde::{Deserialize, Serialize};

/// Which optional tables/columns the backing store actually has. Probed once
/// per projection by the read adapter; nothing downstream re-inspects the
/// schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogSchema {
    pub has_description: bool,
    pub has_image_path: bool,
    pub has_base_spice: bool,
    pub has_spice_range: bool,
    pub has_noodle_encoding: bool,
    pub has_course_join: bool,
    pub has_protein_edges: bool,
    pub has_option_groups: bool,
}

/// Spice storage reconciled into one variant at the projection boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpiceSpec {
    Single(u8),
    Range { min: u8, max: u8 },
    Unknown,
}

impl SpiceSpec {
    /// The single value used for coarse filtering: the rounded midpoint of a
    /// range, or 0 when the schema carries no spice at all.
    pub fn representative(&self) -> u8 {
        match *self {
            SpiceSpec::Single(value) => value,
            SpiceSpec::Range { min, max } => (min + max + 1) / 2,
            SpiceSpec::Unknown => 0,
        }
    }
}

/// A raw item row as the store returned it. Every column that can be absent
/// from an older or newer schema is optional here; the projector decides
/// what each absence means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItemRow {
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub base_spice: Option<i64>,
    pub min_spice: Option<i64>,
    pub max_spice: Option<i64>,
    pub course_slug: Option<String>,
    pub course_label: Option<String>,
    pub noodle_encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProteinEdge {
    pub item_id: i64,
    pub slug: String,
    pub label: String,
}
