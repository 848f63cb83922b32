use rand::Rng;

use crate::domain::{
    catalog::entities::ProteinTag,
    common::entities::app_errors::CoreError,
    draw::value_objects::OptionSelection,
    filtering::value_objects::EligibleItem,
    options::entities::OptionGroup,
};

/// Uniform draw over the eligible pool. The caller is expected to have
/// checked non-emptiness already; an empty pool here is a call-site bug.
pub fn draw_item<'a, R: Rng>(
    pool: &'a [EligibleItem],
    rng: &mut R,
) -> Result<&'a EligibleItem, CoreError> {
    if pool.is_empty() {
        return Err(CoreError::EmptyPool);
    }
    Ok(&pool[rng.gen_range(0..pool.len())])
}

/// Pick a protein for a drawn item: uniformly among the edges intersecting
/// the diner's preference, else among all of the item's edges, else none.
pub fn draw_protein<R: Rng>(eligible: &EligibleItem, rng: &mut R) -> Option<ProteinTag> {
    let candidates = if !eligible.matching_proteins.is_empty() {
        &eligible.matching_proteins
    } else if !eligible.item.proteins.is_empty() {
        &eligible.item.proteins
    } else {
        return None;
    };
    Some(candidates[rng.gen_range(0..candidates.len())].clone())
}

/// Draw values for one group. The pick count is itself random within the
/// group's clamped select bounds; a required group with values never comes
/// back empty. Sampling is without replacement via random-index swap-remove
/// on a working copy, so a fixed pseudo-random source reproduces exactly.
pub fn draw_option_values<R: Rng>(group: &OptionGroup, rng: &mut R) -> OptionSelection {
    let available = group.values.len() as u32;
    let max = group.max_select.min(available);
    let min = group.min_select.min(max);

    let mut count = if max == 0 {
        0
    } else {
        rng.gen_range(min..=max)
    };
    if count == 0 && group.required && available > 0 {
        count = 1;
    }

    let mut working = group.values.clone();
    let mut picked = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let index = rng.gen_range(0..working.len());
        picked.push(working.swap_remove(index));
    }

    OptionSelection {
        group_name: group.name.clone(),
        values: picked,
    }
}

/// Draw a value set for every resolved group of an item.
pub fn draw_options<R: Rng>(groups: &[OptionGroup], rng: &mut R) -> Vec<OptionSelection> {
    groups
        .iter()
        .map(|group| draw_option_values(group, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::domain::{
        catalog::{
            entities::{CatalogItem, CourseRef},
            value_objects::SpiceSpec,
        },
        options::entities::{OptionKind, OptionValue},
    };

    fn tag(slug: &str) -> ProteinTag {
        ProteinTag {
            slug: slug.to_string(),
            label: slug.to_string(),
        }
    }

    fn eligible(id: i64, proteins: &[&str], matching: &[&str]) -> EligibleItem {
        EligibleItem {
            item: CatalogItem {
                id,
                name: format!("item-{id}"),
                description: None,
                image_path: None,
                course: CourseRef {
                    slug: Some("mains".into()),
                    label: "Mains".into(),
                },
                spice: SpiceSpec::Single(0),
                proteins: proteins.iter().map(|s| tag(s)).collect(),
                noodle_encoding: None,
            },
            matching_proteins: matching.iter().map(|s| tag(s)).collect(),
        }
    }

    fn group(required: bool, min: u32, max: u32, values: &[&str]) -> OptionGroup {
        OptionGroup {
            id: Some(1),
            name: "Sides".to_string(),
            kind: OptionKind::Choice,
            required,
            min_select: min,
            max_select: max,
            values: values
                .iter()
                .map(|name| OptionValue {
                    name: name.to_string(),
                    label: name.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_pool_is_an_error_not_a_sentinel() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            draw_item(&[], &mut rng).unwrap_err(),
            CoreError::EmptyPool
        );
    }

    #[test]
    fn item_draw_is_uniform_under_a_fixed_source() {
        let pool: Vec<EligibleItem> = (0..4).map(|id| eligible(id, &[], &[])).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 40_000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            let picked = draw_item(&pool, &mut rng).unwrap();
            counts[picked.item.id as usize] += 1;
        }
        let expected = trials / pool.len();
        for count in counts {
            let deviation = count.abs_diff(expected) as f64 / expected as f64;
            assert!(deviation < 0.05, "counts = {counts:?}");
        }
    }

    #[test]
    fn protein_draw_prefers_the_preference_intersection() {
        let eligible = eligible(1, &["beef", "pork"], &["pork"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(draw_protein(&eligible, &mut rng).unwrap().slug, "pork");
        }
    }

    #[test]
    fn protein_draw_falls_back_to_all_edges() {
        let eligible = eligible(1, &["beef", "pork"], &[]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(draw_protein(&eligible, &mut rng).unwrap().slug);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn no_edges_asserts_no_protein() {
        let eligible = eligible(1, &[], &[]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(draw_protein(&eligible, &mut rng), None);
    }

    #[test]
    fn required_group_never_comes_back_empty() {
        let group = group(true, 0, 2, &["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let selection = draw_option_values(&group, &mut rng);
            assert!(!selection.values.is_empty());
            assert!(selection.values.len() <= 2);
        }
    }

    #[test]
    fn optional_group_may_come_back_empty_but_never_overdraws() {
        let group = group(false, 0, 2, &["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(13);
        let mut saw_empty = false;
        for _ in 0..500 {
            let selection = draw_option_values(&group, &mut rng);
            saw_empty |= selection.values.is_empty();
            assert!(selection.values.len() <= 2);
        }
        assert!(saw_empty);
    }

    #[test]
    fn sampling_is_without_replacement() {
        let group = group(true, 3, 3, &["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..100 {
            let selection = draw_option_values(&group, &mut rng);
            let mut names: Vec<&str> =
                selection.values.iter().map(|v| v.name.as_str()).collect();
            names.sort_unstable();
            assert_eq!(names, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn bounds_beyond_the_value_count_are_clamped() {
        let group = group(true, 4, 9, &["a", "b"]);
        let mut rng = StdRng::seed_from_u64(19);
        let selection = draw_option_values(&group, &mut rng);
        assert_eq!(selection.values.len(), 2);
    }

    #[test]
    fn required_group_without_values_stays_empty() {
        let group = group(true, 1, 1, &[]);
        let mut rng = StdRng::seed_from_u64(23);
        assert!(draw_option_values(&group, &mut rng).values.is_empty());
    }

    #[test]
    fn fixed_seed_reproduces_the_same_draws() {
        let pool: Vec<EligibleItem> = (0..5).map(|id| eligible(id, &[], &[])).collect();
        let group = group(true, 1, 2, &["a", "b", "c"]);

        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let item_id = draw_item(&pool, &mut rng).unwrap().item.id;
            let selection = draw_option_values(&group, &mut rng);
            (item_id, selection)
        };
        assert_eq!(run(99), run(99));
    }
}
