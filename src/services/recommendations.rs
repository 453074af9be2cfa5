use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::{Catalog, RecommendationTable};

/// Precomputed recommendations for `title`, at most `count` of them
///
/// Exact-match lookup against the table built at startup. Returns the first
/// `count` stored titles in stored order (most similar first), or an empty
/// slice for unknown titles. Callers clamp `count`.
pub fn resolve<'a>(table: &'a RecommendationTable, title: &str, count: usize) -> &'a [String] {
    match table.get(title) {
        Some(similar) => &similar[..count.min(similar.len())],
        None => &[],
    }
}

/// Clamps a requested count into `1..=max`, defaulting to `max`
pub fn clamp_count(requested: Option<i64>, max: usize) -> usize {
    let max = max.max(1);
    match requested {
        Some(n) if n < 1 => 1,
        Some(n) => usize::try_from(n).map_or(max, |n| n.min(max)),
        None => max,
    }
}

/// Picks a catalog title uniformly at random
pub fn random_title<'a, R: Rng + ?Sized>(catalog: &'a Catalog, rng: &mut R) -> Option<&'a str> {
    catalog.titles().choose(rng).map(String::as_str)
}
