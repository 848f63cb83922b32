use serde_json::Value;

use crate::domain::{
    catalog::entities::{Course, Protein},
    preferences::{
        entities::{PreferenceRecord, SlugSelection},
        value_objects::{LegacyPreferenceRow, PreferenceSummary, PreferencesDocument},
    },
};

/// Keep only known slugs, in submitted order, deduplicated. Empty and
/// complete selections both mean "no restriction".
fn sanitize_selection(submitted: &[String], known: &[&str]) -> SlugSelection {
    let mut kept: Vec<String> = Vec::new();
    for slug in submitted {
        if known.contains(&slug.as_str()) && !kept.iter().any(|k| k == slug) {
            kept.push(slug.clone());
        }
    }
    if kept.is_empty() || kept.len() == known.len() {
        SlugSelection::All
    } else {
        SlugSelection::Only(kept)
    }
}

/// Clamp a loosely-typed spice ceiling into [0,5]; anything non-numeric
/// means "no ceiling" and becomes 5. Fractional values truncate.
fn coerce_max_spice(value: &Value) -> u8 {
    let numeric = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match numeric {
        Some(f) if f.is_finite() => (f.trunc() as i64).clamp(0, 5) as u8,
        _ => 5,
    }
}

/// The single sanitization step every candidate passes through, whatever
/// its source. Unknown slugs are dropped silently; a selection emptied by
/// that filtering reverts to open, not to always-false.
pub fn sanitize_document(
    document: &PreferencesDocument,
    courses: &[Course],
    proteins: &[Protein],
) -> PreferenceRecord {
    let course_slugs: Vec<&str> = courses.iter().map(|c| c.slug.as_str()).collect();
    let protein_slugs: Vec<&str> = proteins.iter().map(|p| p.slug.as_str()).collect();

    PreferenceRecord {
        courses: sanitize_selection(&document.courses, &course_slugs),
        proteins: sanitize_selection(&document.proteins, &protein_slugs),
        max_spice: coerce_max_spice(&document.max_spice),
    }
}

/// Render a record back into the flat document shape. `All` is stored as
/// the full slug list, matching what every storage generation expects.
pub fn record_to_document(
    record: &PreferenceRecord,
    courses: &[Course],
    proteins: &[Protein],
) -> PreferencesDocument {
    let course_slugs: Vec<String> = courses.iter().map(|c| c.slug.clone()).collect();
    let protein_slugs: Vec<String> = proteins.iter().map(|p| p.slug.clone()).collect();

    PreferencesDocument {
        courses: record.courses.to_slugs(&course_slugs),
        proteins: record.proteins.to_slugs(&protein_slugs),
        max_spice: Value::from(record.max_spice),
    }
}

/// Field-by-field translation of the legacy representation into the
/// current document shape, ready for sanitization.
pub fn document_from_legacy(legacy: &LegacyPreferenceRow) -> PreferencesDocument {
    PreferencesDocument {
        courses: legacy.course_slug.clone().into_iter().collect(),
        proteins: legacy.protein_slugs.clone(),
        max_spice: legacy
            .spice_tolerance
            .map(Value::from)
            .unwrap_or_else(|| Value::from(5)),
    }
}

/// Resolve a record's slugs to display labels. Unknown slugs echo the slug
/// itself rather than disappearing.
pub fn summarize(
    record: &PreferenceRecord,
    courses: &[Course],
    proteins: &[Protein],
) -> PreferenceSummary {
    let label_for = |slug: &str, pairs: &[(&str, &str)]| -> String {
        pairs
            .iter()
            .find(|(s, _)| *s == slug)
            .map(|(_, label)| (*label).to_string())
            .unwrap_or_else(|| slug.to_string())
    };

    let course_pairs: Vec<(&str, &str)> = courses
        .iter()
        .map(|c| (c.slug.as_str(), c.label.as_str()))
        .collect();
    let protein_pairs: Vec<(&str, &str)> = proteins
        .iter()
        .map(|p| (p.slug.as_str(), p.label.as_str()))
        .collect();

    let course_slugs: Vec<String> = courses.iter().map(|c| c.slug.clone()).collect();
    let protein_slugs: Vec<String> = proteins.iter().map(|p| p.slug.clone()).collect();

    PreferenceSummary {
        course_labels: record
            .courses
            .to_slugs(&course_slugs)
            .iter()
            .map(|s| label_for(s, &course_pairs))
            .collect(),
        protein_labels: record
            .proteins
            .to_slugs(&protein_slugs)
            .iter()
            .map(|s| label_for(s, &protein_pairs))
            .collect(),
        max_spice: record.max_spice,
    }
}
