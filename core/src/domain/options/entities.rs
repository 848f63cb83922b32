use serde::{Deserialize, Serialize};

/// Group kinds the store can hold. Only single/multi choice exists today;
/// the enum keeps the column forwards-compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    Choice,
}

/// A value a diner (or the draw) can pick within a group. Disabled stored
/// values are dropped before resolution, so a resolved value is always
/// pickable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub name: String,
    pub label: String,
}

/// A resolved option group for one item. `id` is `None` for the synthetic
/// group derived from the legacy single-field encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: Option<i64>,
    pub name: String,
    pub kind: OptionKind,
    pub required: bool,
    pub min_select: u32,
    pub max_select: u32,
    pub values: Vec<OptionValue>,
}
