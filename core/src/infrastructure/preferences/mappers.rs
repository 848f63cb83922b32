use crate::domain::preferences::value_objects::LegacyPreferenceRow;
use crate::entity::user_filter_settings;

/// Assemble the legacy row from its two tables. A user with neither a
/// settings row nor protein edges has no legacy record at all; that must
/// read as a resolution miss, not as an empty record.
pub fn legacy_row_from_models(
    settings: Option<user_filter_settings::Model>,
    protein_slugs: Vec<String>,
) -> Option<LegacyPreferenceRow> {
    if settings.is_none() && protein_slugs.is_empty() {
        return None;
    }

    Some(LegacyPreferenceRow {
        course_slug: settings.as_ref().and_then(|model| model.course_slug.clone()),
        spice_tolerance: settings.and_then(|model| model.spice_tolerance),
        protein_slugs,
    })
}
