use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog::entities::ProteinTag,
    filtering::value_objects::EligibleItem,
    options::entities::OptionValue,
};

/// The values drawn for one option group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    pub group_name: String,
    pub values: Vec<OptionValue>,
}

/// A completed draw: the headline item plus its sub-draws. A `None` protein
/// is meaningful; the dish is flexible, not protein-free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishPick {
    pub item: EligibleItem,
    pub protein: Option<ProteinTag>,
    pub options: Vec<OptionSelection>,
}
