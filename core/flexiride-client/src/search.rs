//! Client-side catalog search and grouping.
//!
//! The admin inventory view searches the already-fetched catalog instead of
//! asking the server. Matching is approximate: a query matches a field when
//! some substring of the field is within a bounded edit distance of it.

use flexiride_types::{Booking, BookingStatus, Vehicle};

/// Weight of a brand match.
pub const BRAND_WEIGHT: f64 = 0.6;
/// Weight of a model match.
pub const MODEL_WEIGHT: f64 = 0.4;
/// Highest score still counted as a match (0 exact, 1 unrelated).
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// A search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub vehicle: &'a Vehicle,
    /// Combined match quality in `(0, 1]`; lower is better.
    pub score: f64,
    /// Index of the vehicle in the searched list.
    pub index: usize,
}

/// Fuzzy search over vehicle brand and model.
#[derive(Debug, Clone)]
pub struct VehicleSearch<'a> {
    vehicles: &'a [Vehicle],
    threshold: f64,
}

impl<'a> VehicleSearch<'a> {
    pub fn new(vehicles: &'a [Vehicle]) -> Self {
        Self {
            vehicles,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Overrides the match threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Returns matching vehicles, best first.
    ///
    /// A blank query returns every vehicle in its original order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&'a Vehicle> {
        self.hits(query).into_iter().map(|hit| hit.vehicle).collect()
    }

    /// Like [`VehicleSearch::search`] but keeps scores.
    #[must_use]
    pub fn hits(&self, query: &str) -> Vec<SearchHit<'a>> {
        let pattern: Vec<char> = query.trim().to_lowercase().chars().collect();
        if pattern.is_empty() {
            return self
                .vehicles
                .iter()
                .enumerate()
                .map(|(index, vehicle)| SearchHit {
                    vehicle,
                    score: 0.0,
                    index,
                })
                .collect();
        }

        let mut hits: Vec<SearchHit<'a>> = self
            .vehicles
            .iter()
            .enumerate()
            .filter_map(|(index, vehicle)| {
                let fields = [
                    (field_score(&pattern, &vehicle.brand), BRAND_WEIGHT),
                    (field_score(&pattern, &vehicle.model), MODEL_WEIGHT),
                ];
                combined_score(&fields, self.threshold).map(|score| SearchHit {
                    vehicle,
                    score,
                    index,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
        hits
    }
}

/// Weighted product of the fields that matched on their own, each score
/// raised to its weight. An exact match counts as `f64::EPSILON` so heavier
/// exact fields still rank first. `None` if no field is within `threshold`.
fn combined_score(fields: &[(f64, f64)], threshold: f64) -> Option<f64> {
    let mut matched = false;
    let mut total = 1.0;
    for &(score, weight) in fields {
        if score > threshold {
            continue;
        }
        matched = true;
        total *= score.max(f64::EPSILON).powf(weight);
    }
    matched.then_some(total)
}

/// Sorted, de-duplicated brand names.
#[must_use]
pub fn distinct_brands(vehicles: &[Vehicle]) -> Vec<String> {
    let mut brands: Vec<String> = vehicles.iter().map(|v| v.brand.clone()).collect();
    brands.sort();
    brands.dedup();
    brands
}

/// A user's bookings in one status, in the order given.
#[must_use]
pub fn bookings_for<'a>(
    user_id: &str,
    status: BookingStatus,
    bookings: &'a [Booking],
) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| b.user_id == user_id && b.status == status)
        .collect()
}

/// Normalized edit distance between `pattern` and its closest substring of
/// `text`.
fn field_score(pattern: &[char], text: &str) -> f64 {
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let distance = substring_distance(pattern, &text);
    (distance as f64 / pattern.len() as f64).min(1.0)
}

/// Sellers' algorithm: the match may start and end anywhere in `text`.
fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0; m + 1];
    let mut best = prev[m];

    for &tc in text {
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}
