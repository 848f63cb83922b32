use serde::{Deserialize, Serialize};

/// A default-open slug selection: `All` means "no restriction", never
/// "nothing matches". A specific set is only ever a non-empty, proper
/// subset of the enumeration; sanitization collapses the empty and the
/// complete set to `All`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlugSelection {
    All,
    Only(Vec<String>),
}

impl SlugSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, SlugSelection::All)
    }

    /// Whether an item attribute passes this selection. A missing attribute
    /// only passes when the selection is open.
    pub fn permits(&self, slug: Option<&str>) -> bool {
        match self {
            SlugSelection::All => true,
            SlugSelection::Only(slugs) => {
                slug.is_some_and(|s| slugs.iter().any(|candidate| candidate == s))
            }
        }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.permits(Some(slug))
    }

    /// The explicit slug list this selection stands for, expanding `All` to
    /// the full enumeration (the persisted document shape is always a flat
    /// list).
    pub fn to_slugs(&self, full_enumeration: &[String]) -> Vec<String> {
        match self {
            SlugSelection::All => full_enumeration.to_vec(),
            SlugSelection::Only(slugs) => slugs.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub courses: SlugSelection,
    pub proteins: SlugSelection,
    pub max_spice: u8,
}

impl PreferenceRecord {
    /// The record handed out for an identity with nothing stored.
    pub fn defaults() -> Self {
        Self {
            courses: SlugSelection::All,
            proteins: SlugSelection::All,
            max_spice: 5,
        }
    }
}

impl Default for PreferenceRecord {
    fn default() -> Self {
        Self::defaults()
    }
}
