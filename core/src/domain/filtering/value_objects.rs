use serde::{Deserialize, Serialize};

use crate::domain::catalog::entities::{CatalogItem, ProteinTag};

/// An item that survived the preference filter, annotated for the draw:
/// `matching_proteins` is the subset of the item's allowed-protein edges
/// that intersect the active protein preference (empty when the preference
/// is open or nothing intersects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleItem {
    pub item: CatalogItem,
    pub matching_proteins: Vec<ProteinTag>,
}
