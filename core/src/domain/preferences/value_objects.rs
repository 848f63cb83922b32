use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lifetime of the anonymous client-side preference token: one year.
pub const PREFERENCE_TOKEN_TTL: Duration = Duration::from_secs(31_536_000);

/// Who the preferences belong to. Anonymous diners only have the
/// client-side token to their name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DinerIdentity {
    Account(i64),
    Anonymous,
}

/// The flat JSON shape every preference source speaks:
/// `{courses: string[], proteins: string[], max_spice: integer}`.
///
/// `max_spice` is deliberately loose: stored documents predate the numeric
/// guarantee, so anything JSON allows is accepted here and coerced during
/// sanitization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesDocument {
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub proteins: Vec<String>,
    #[serde(default = "default_max_spice")]
    pub max_spice: serde_json::Value,
}

fn default_max_spice() -> serde_json::Value {
    serde_json::Value::from(5)
}

/// The legacy account representation: one course choice, one spice
/// tolerance integer, and protein edge rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyPreferenceRow {
    pub course_slug: Option<String>,
    pub spice_tolerance: Option<i64>,
    pub protein_slugs: Vec<String>,
}

/// Human-readable rendering of a resolved record for the pre-spin summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceSummary {
    pub course_labels: Vec<String>,
    pub protein_labels: Vec<String>,
    pub max_spice: u8,
}
