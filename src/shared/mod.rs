pub mod fuzzy;
pub mod time;

pub use time::*;

use rayon::prelude::*;
use std::cmp::Ordering;

pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn normalized_name(&self) -> &str;
}

/// Lowercases the input, collapses internal whitespace and trims the ends.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Scores every entry in the haystack against the needle in parallel and
/// returns the entries that pass the threshold, best match first.
pub fn search<'a, T>(needle: &str, haystack: &'a [T]) -> Vec<&'a T>
where
    T: Send + Sync + Identifiable,
{
    let normalized_needle = normalize(needle);
    if normalized_needle.is_empty() {
        return Vec::new();
    }
    let mut results: Vec<(&T, f64)> = haystack
        .par_iter()
        .filter_map(|hay| {
            let score = fuzzy::score(&normalized_needle, hay.normalized_name());
            if score > 0.1 {
                Some((hay, score))
            } else {
                None
            }
        })
        .collect();

    // Stable so equal scores keep haystack order
    results.par_sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    results.into_iter().map(|(entity, _)| entity).collect()
}

#[test]
fn normalize_collapses_whitespace() {
    assert_eq!(normalize("  Main   St\tWest "), "main st west");
}

#[test]
fn normalize_empty() {
    assert_eq!(normalize("   "), "");
}
