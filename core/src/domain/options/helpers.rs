use std::sync::OnceLock;

use regex::Regex;

use crate::domain::options::value_objects::{KNOWN_NOODLE_SLUGS, NOT_APPLICABLE_MARKERS};

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[|,]").unwrap())
}

/// Whether a group name denotes the spice prompt. Spice is asked through the
/// dedicated spice field, so such groups are dropped at resolution.
pub fn denotes_spice(name: &str) -> bool {
    name.to_lowercase().contains("spice")
}

/// Whether a group name covers the noodle choice, which suppresses the
/// legacy synthetic group.
pub fn denotes_noodle(name: &str) -> bool {
    name.to_lowercase().contains("noodle")
}

/// Turn a slug into a display label: separators become spaces, words get
/// capitalised.
pub fn humanize_slug(slug: &str) -> String {
    slug.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Parse the legacy single-field encoding (`flat_rice|egg_noodle`, comma
/// separators tolerated) into known noodle slugs. "Not applicable" markers
/// and unknown slugs drop out; an all-noise field parses to nothing.
pub fn parse_legacy_noodles(raw: &str) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    for part in separator().split(raw) {
        let slug = part.trim().to_lowercase();
        if slug.is_empty() || NOT_APPLICABLE_MARKERS.contains(&slug.as_str()) {
            continue;
        }
        if KNOWN_NOODLE_SLUGS.contains(&slug.as_str()) && !slugs.contains(&slug) {
            slugs.push(slug);
        }
    }
    slugs
}

/// Force stored select bounds into `0 <= min <= max <= value_count`.
pub fn clamp_select_bounds(min: i64, max: i64, value_count: usize) -> (u32, u32) {
    let ceiling = value_count as i64;
    let max = max.clamp(0, ceiling);
    let min = min.clamp(0, max);
    (min as u32, max as u32)
}
