use serde::{Deserialize, Serialize};

use super::ReviewCategory;

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A candidate place returned by the places directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    /// Directory-assigned place identifier
    pub id: String,
    pub name: String,
    pub location: Coordinates,
}

/// A single textual review, immutable once fetched
///
/// `rating` is `None` when the directory returned no numeric rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub text: String,
    pub rating: Option<f64>,
}

/// A review with its assigned category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedReview {
    pub text: String,
    pub rating: Option<f64>,
    pub category: ReviewCategory,
}

/// Per-place aggregation produced by the pipeline
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceSummary {
    pub place: Place,
    /// Reviews in fetch order
    pub classified_reviews: Vec<ClassifiedReview>,
    /// Mean of the numeric ratings; `None` when no review carried one.
    /// Never coerced to zero here; that is a scoring policy decision.
    pub overall_average: Option<f64>,
    pub dominant_category: ReviewCategory,
    /// Ranking key, set by the ranker. Ordering only, never shown as a rating.
    pub score: f64,
}
