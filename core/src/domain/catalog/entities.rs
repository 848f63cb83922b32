use serde::{Deserialize, Serialize};

use crate::domain::catalog::value_objects::SpiceSpec;

/// Label shown when an item's course cannot be resolved against the lookup
/// table.
pub const UNRESOLVED_COURSE_LABEL: &str = "Uncategorised";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub slug: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protein {
    pub id: i64,
    pub slug: String,
    pub label: String,
}

/// One allowed-protein edge carried on an item. The vector as a whole keeps
/// the "no edges recorded" case distinct from "edges present"; the filter
/// treats the two differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinTag {
    pub slug: String,
    pub label: String,
}

/// An item's course as seen by the filter: the slug is preserved verbatim
/// even when it cannot be joined to the lookup table, and is absent entirely
/// when the schema carries no course reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub slug: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub course: CourseRef,
    pub spice: SpiceSpec,
    pub proteins: Vec<ProteinTag>,
    /// Legacy free-text noodle encoding, kept raw for the option resolver.
    pub noodle_encoding: Option<String>,
}

/// The projector's output: only enabled items, in catalog read order, plus
/// the lookup enumerations the sanitizer and filter need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCatalog {
    pub courses: Vec<Course>,
    pub proteins: Vec<Protein>,
    pub items: Vec<CatalogItem>,
}

impl NormalizedCatalog {
    pub fn course_label(&self, slug: &str) -> Option<&str> {
        self.courses
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.label.as_str())
    }
}
