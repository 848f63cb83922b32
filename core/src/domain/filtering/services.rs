use tracing::debug;

use crate::domain::{
    catalog::entities::NormalizedCatalog,
    filtering::value_objects::EligibleItem,
    preferences::entities::{PreferenceRecord, SlugSelection},
};

/// Apply a resolved preference record to the normalized catalog. Pure; the
/// pool comes back sorted by item id so carousel layout is reproducible
/// across re-filters.
pub fn filter_pool(catalog: &NormalizedCatalog, preferences: &PreferenceRecord) -> Vec<EligibleItem> {
    let mut pool: Vec<EligibleItem> = catalog
        .items
        .iter()
        .filter(|item| preferences.courses.permits(item.course.slug.as_deref()))
        .filter(|item| match &preferences.proteins {
            SlugSelection::All => true,
            // Under an active protein filter, an item with no recorded edges
            // is excluded; no-edges only reads as "suits everyone" when the
            // filter is off.
            SlugSelection::Only(_) => item
                .proteins
                .iter()
                .any(|tag| preferences.proteins.contains(&tag.slug)),
        })
        .filter(|item| item.spice.representative() <= preferences.max_spice)
        .map(|item| EligibleItem {
            item: item.clone(),
            matching_proteins: match &preferences.proteins {
                SlugSelection::All => Vec::new(),
                SlugSelection::Only(_) => item
                    .proteins
                    .iter()
                    .filter(|tag| preferences.proteins.contains(&tag.slug))
                    .cloned()
                    .collect(),
            },
        })
        .collect();

    pool.sort_by_key(|eligible| eligible.item.id);

    debug!(
        total = catalog.items.len(),
        eligible = pool.len(),
        "filtered catalog against preferences"
    );

    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{
        entities::{CatalogItem, Course, CourseRef, Protein, ProteinTag},
        value_objects::SpiceSpec,
    };

    fn tag(slug: &str) -> ProteinTag {
        let mut label = slug.to_string();
        label[..1].make_ascii_uppercase();
        ProteinTag {
            slug: slug.to_string(),
            label,
        }
    }

    fn item(id: i64, name: &str, course: &str, spice: u8, proteins: &[&str]) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            description: None,
            image_path: None,
            course: CourseRef {
                slug: Some(course.to_string()),
                label: {
                    let mut label = course.to_string();
                    label[..1].make_ascii_uppercase();
                    label
                },
            },
            spice: SpiceSpec::Single(spice),
            proteins: proteins.iter().map(|slug| tag(slug)).collect(),
            noodle_encoding: None,
        }
    }

    fn catalog(items: Vec<CatalogItem>) -> NormalizedCatalog {
        NormalizedCatalog {
            courses: vec![
                Course {
                    id: 1,
                    slug: "mains".into(),
                    label: "Mains".into(),
                },
                Course {
                    id: 2,
                    slug: "appetisers".into(),
                    label: "Appetisers".into(),
                },
            ],
            proteins: vec![
                Protein {
                    id: 1,
                    slug: "beef".into(),
                    label: "Beef".into(),
                },
                Protein {
                    id: 2,
                    slug: "vegan".into(),
                    label: "Vegan".into(),
                },
            ],
            items,
        }
    }

    fn prefs(
        courses: SlugSelection,
        proteins: SlugSelection,
        max_spice: u8,
    ) -> PreferenceRecord {
        PreferenceRecord {
            courses,
            proteins,
            max_spice,
        }
    }

    #[test]
    fn end_to_end_scenario_keeps_only_the_matching_main() {
        let catalog = catalog(vec![
            item(1, "A", "mains", 2, &["beef"]),
            item(2, "B", "mains", 4, &[]),
            item(3, "C", "appetisers", 1, &["vegan"]),
        ]);
        let preferences = prefs(
            SlugSelection::Only(vec!["mains".into()]),
            SlugSelection::Only(vec!["beef".into()]),
            3,
        );

        let pool = filter_pool(&catalog, &preferences);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].item.name, "A");
        assert_eq!(pool[0].matching_proteins, vec![tag("beef")]);
    }

    #[test]
    fn no_edges_passes_an_open_protein_filter() {
        let catalog = catalog(vec![item(1, "B", "mains", 1, &[])]);
        let preferences = prefs(SlugSelection::All, SlugSelection::All, 5);

        let pool = filter_pool(&catalog, &preferences);
        assert_eq!(pool.len(), 1);
        assert!(pool[0].matching_proteins.is_empty());
    }

    #[test]
    fn no_edges_fails_an_active_protein_filter() {
        let catalog = catalog(vec![item(1, "B", "mains", 1, &[])]);
        let preferences = prefs(
            SlugSelection::All,
            SlugSelection::Only(vec!["beef".into()]),
            5,
        );

        assert!(filter_pool(&catalog, &preferences).is_empty());
    }

    #[test]
    fn disjoint_edges_fail_an_active_protein_filter() {
        let catalog = catalog(vec![item(1, "C", "mains", 1, &["vegan"])]);
        let preferences = prefs(
            SlugSelection::All,
            SlugSelection::Only(vec!["beef".into()]),
            5,
        );

        assert!(filter_pool(&catalog, &preferences).is_empty());
    }

    #[test]
    fn open_courses_match_every_course() {
        let catalog = catalog(vec![
            item(1, "A", "mains", 0, &[]),
            item(2, "C", "appetisers", 0, &[]),
        ]);

        let open = filter_pool(&catalog, &prefs(SlugSelection::All, SlugSelection::All, 5));
        let explicit = filter_pool(
            &catalog,
            &prefs(
                SlugSelection::Only(vec!["mains".into(), "appetisers".into()]),
                SlugSelection::All,
                5,
            ),
        );
        assert_eq!(open.len(), 2);
        assert_eq!(open.len(), explicit.len());
    }

    #[test]
    fn missing_course_slug_passes_only_when_courses_are_open() {
        let mut unplaced = item(1, "mystery", "mains", 0, &[]);
        unplaced.course.slug = None;
        let catalog = catalog(vec![unplaced]);

        let open = filter_pool(&catalog, &prefs(SlugSelection::All, SlugSelection::All, 5));
        assert_eq!(open.len(), 1);

        let active = filter_pool(
            &catalog,
            &prefs(
                SlugSelection::Only(vec!["mains".into()]),
                SlugSelection::All,
                5,
            ),
        );
        assert!(active.is_empty());
    }

    #[test]
    fn spice_ceiling_uses_the_representative_value() {
        let mut ranged = item(1, "larb", "mains", 0, &[]);
        ranged.spice = SpiceSpec::Range { min: 2, max: 3 };
        let catalog = catalog(vec![ranged]);

        // Midpoint of [2,3] rounds to 3.
        assert!(filter_pool(&catalog, &prefs(SlugSelection::All, SlugSelection::All, 2)).is_empty());
        assert_eq!(
            filter_pool(&catalog, &prefs(SlugSelection::All, SlugSelection::All, 3)).len(),
            1
        );
    }

    #[test]
    fn unknown_spice_counts_as_zero() {
        let mut unmarked = item(1, "salad", "mains", 0, &[]);
        unmarked.spice = SpiceSpec::Unknown;
        let catalog = catalog(vec![unmarked]);

        let pool = filter_pool(&catalog, &prefs(SlugSelection::All, SlugSelection::All, 0));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn pool_is_sorted_by_item_id() {
        let catalog = catalog(vec![
            item(3, "C", "mains", 0, &[]),
            item(1, "A", "mains", 0, &[]),
            item(2, "B", "mains", 0, &[]),
        ]);

        let pool = filter_pool(&catalog, &prefs(SlugSelection::All, SlugSelection::All, 5));
        let ids: Vec<i64> = pool.iter().map(|e| e.item.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
