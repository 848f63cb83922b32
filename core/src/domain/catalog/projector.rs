use std::collections::HashMap;

use tracing::debug;

use crate::domain::catalog::{
    entities::{CatalogItem, Course, CourseRef, NormalizedCatalog, Protein, ProteinTag},
    value_objects::{CatalogSchema, RawItemRow, RawProteinEdge, SpiceSpec},
    UNRESOLVED_COURSE_LABEL,
};

fn clamp_spice(value: i64) -> u8 {
    value.clamp(0, 5) as u8
}

/// Reconcile whichever spice columns the schema has into one variant.
fn reconcile_spice(schema: &CatalogSchema, row: &RawItemRow) -> SpiceSpec {
    if schema.has_spice_range {
        if let (Some(min), Some(max)) = (row.min_spice, row.max_spice) {
            let min = clamp_spice(min);
            let max = clamp_spice(max).max(min);
            return SpiceSpec::Range { min, max };
        }
    }
    if schema.has_base_spice {
        if let Some(base) = row.base_spice {
            return SpiceSpec::Single(clamp_spice(base));
        }
    }
    SpiceSpec::Unknown
}

fn resolve_course(schema: &CatalogSchema, row: &RawItemRow) -> CourseRef {
    if !schema.has_course_join {
        return CourseRef {
            slug: None,
            label: UNRESOLVED_COURSE_LABEL.to_string(),
        };
    }
    match (&row.course_slug, &row.course_label) {
        (Some(slug), Some(label)) => CourseRef {
            slug: Some(slug.clone()),
            label: label.clone(),
        },
        // Slug survived the schema but the lookup join did not resolve it;
        // keep the slug verbatim so the filter can still match on it.
        (Some(slug), None) => CourseRef {
            slug: Some(slug.clone()),
            label: UNRESOLVED_COURSE_LABEL.to_string(),
        },
        (None, _) => CourseRef {
            slug: None,
            label: UNRESOLVED_COURSE_LABEL.to_string(),
        },
    }
}

/// Normalize raw store rows into the in-memory catalog. Disabled items never
/// make it past this point.
pub fn project_catalog(
    schema: &CatalogSchema,
    courses: Vec<Course>,
    proteins: Vec<Protein>,
    rows: Vec<RawItemRow>,
    edges: Vec<RawProteinEdge>,
) -> NormalizedCatalog {
    let mut edges_by_item: HashMap<i64, Vec<ProteinTag>> = HashMap::new();
    for edge in edges {
        edges_by_item.entry(edge.item_id).or_default().push(ProteinTag {
            slug: edge.slug,
            label: edge.label,
        });
    }

    if !schema.has_course_join {
        debug!("catalog schema has no course join; items get a placeholder label");
    }
    if !schema.has_base_spice && !schema.has_spice_range {
        debug!("catalog schema has no spice columns; items get unknown spice");
    }

    let items = rows
        .into_iter()
        .filter(|row| row.enabled)
        .map(|row| {
            let spice = reconcile_spice(schema, &row);
            let course = resolve_course(schema, &row);
            CatalogItem {
                id: row.id,
                name: row.name,
                description: row.description,
                image_path: row.image_path,
                course,
                spice,
                proteins: edges_by_item.remove(&row.id).unwrap_or_default(),
                noodle_encoding: if schema.has_noodle_encoding {
                    row.noodle_encoding
                } else {
                    None
                },
            }
        })
        .collect();

    NormalizedCatalog {
        courses,
        proteins,
        items,
    }
}
