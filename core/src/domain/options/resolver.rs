use std::collections::HashMap;

use crate::domain::options::{
    entities::{OptionGroup, OptionKind, OptionValue},
    helpers::{clamp_select_bounds, denotes_noodle, denotes_spice, humanize_slug, parse_legacy_noodles},
    value_objects::{RawOptionGroupRow, RawOptionValueRow, SYNTHETIC_NOODLE_GROUP_NAME},
};

/// Merge structured option rows with the legacy single-field noodle
/// encoding into the ordered group list for one item.
///
/// The structured source wins: a stored group whose name covers the noodle
/// choice suppresses the synthetic legacy group, so a migrated item never
/// prompts twice. Spice-named groups are dropped outright; the spice field
/// already asks that question.
pub fn resolve_option_groups(
    noodle_encoding: Option<&str>,
    mut groups: Vec<RawOptionGroupRow>,
    values: Vec<RawOptionValueRow>,
) -> Vec<OptionGroup> {
    let mut values_by_group: HashMap<i64, Vec<RawOptionValueRow>> = HashMap::new();
    for value in values {
        if value.enabled {
            values_by_group.entry(value.option_id).or_default().push(value);
        }
    }
    for group_values in values_by_group.values_mut() {
        group_values.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
    }

    groups.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));

    let has_structured_noodle_group = groups.iter().any(|group| denotes_noodle(&group.name));

    let mut resolved: Vec<OptionGroup> = groups
        .into_iter()
        .filter(|group| !denotes_spice(&group.name))
        .map(|group| {
            let values: Vec<OptionValue> = values_by_group
                .remove(&group.id)
                .unwrap_or_default()
                .into_iter()
                .map(|value| OptionValue {
                    label: value.label.unwrap_or_else(|| humanize_slug(&value.name)),
                    name: value.name,
                })
                .collect();
            let (min_select, max_select) =
                clamp_select_bounds(group.min_select, group.max_select, values.len());
            OptionGroup {
                id: Some(group.id),
                name: group.name,
                kind: OptionKind::Choice,
                required: group.required,
                min_select,
                max_select,
                values,
            }
        })
        .collect();

    if !has_structured_noodle_group {
        if let Some(raw) = noodle_encoding {
            let slugs = parse_legacy_noodles(raw);
            if !slugs.is_empty() {
                resolved.push(OptionGroup {
                    id: None,
                    name: SYNTHETIC_NOODLE_GROUP_NAME.to_string(),
                    kind: OptionKind::Choice,
                    required: true,
                    min_select: 1,
                    max_select: 1,
                    values: slugs
                        .into_iter()
                        .map(|slug| OptionValue {
                            label: humanize_slug(&slug),
                            name: slug,
                        })
                        .collect(),
                });
            }
        }
    }

    resolved
}
