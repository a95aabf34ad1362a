//! Candidate ordering
//!
//! Scores every summary under one policy, then sorts descending. The sort is
//! stable, so places with equal scores keep the order the directory returned
//! them in. The three policies are alternatives, not layers: the pipeline
//! picks exactly one per request.

use std::collections::HashSet;

use crate::models::{Category, PlaceSummary, ReviewCategory};

use super::aggregation::QUALIFYING_RATING;

/// How a request wants its candidates scored
#[derive(Debug, Clone)]
pub enum ScoringPolicy<'a> {
    /// Plain average rating; places without ratings score zero
    Baseline,
    /// Explicit per-request preference set, each selected category weighted
    /// 1/k
    Weighted(&'a [Category]),
    /// Persisted liked-category log: membership bonus plus normalized average
    Historical(&'a HashSet<Category>),
}

/// Scores and orders summaries by descending desirability
pub fn rank(mut summaries: Vec<PlaceSummary>, policy: &ScoringPolicy) -> Vec<PlaceSummary> {
    for summary in &mut summaries {
        summary.score = score(summary, policy);
    }

    // Stable sort: equal scores keep input order
    summaries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    summaries
}

fn score(summary: &PlaceSummary, policy: &ScoringPolicy) -> f64 {
    match policy {
        ScoringPolicy::Baseline => summary.overall_average.unwrap_or(0.0),
        ScoringPolicy::Weighted(selected) => weighted_score(summary, selected),
        ScoringPolicy::Historical(liked) => {
            let bonus = match summary.dominant_category {
                ReviewCategory::Known(category) if liked.contains(&category) => 1.0,
                _ => 0.0,
            };
            bonus + summary.overall_average.map_or(0.0, |avg| avg / 5.0)
        }
    }
}

/// Sum of weight × proportion over the selected categories
fn weighted_score(summary: &PlaceSummary, selected: &[Category]) -> f64 {
    if selected.is_empty() {
        return 0.0;
    }

    let weight = 1.0 / selected.len() as f64;
    selected
        .iter()
        .map(|category| weight * category_proportion(summary, *category))
        .sum()
}

/// Share of a place's qualifying reviews that were assigned the category
///
/// The denominator is the number of reviews at or above the qualifying
/// rating, including those whose label fell outside the fixed set. Zero when
/// the place has no qualifying reviews.
pub fn category_proportion(summary: &PlaceSummary, category: Category) -> f64 {
    let qualifying = summary
        .classified_reviews
        .iter()
        .filter(|review| matches!(review.rating, Some(r) if r >= QUALIFYING_RATING))
        .count();

    if qualifying == 0 {
        return 0.0;
    }

    let matching = summary
        .classified_reviews
        .iter()
        .filter(|review| review.category == ReviewCategory::Known(category))
        .count();

    matching as f64 / qualifying as f64
}
