//! External capability boundaries
//!
//! The pipeline only depends on these traits; the concrete implementations
//! wrap the Google Maps web services and the HuggingFace inference API.
//! Tests substitute mocks at the same seams.

use crate::{
    error::AppResult,
    models::{Coordinates, Place, Review, ReviewCategory},
};

pub mod google_maps;
pub mod zero_shot;

pub use google_maps::GoogleMapsDirectory;
pub use zero_shot::ZeroShotClassifier;

/// Directory of places: geocoding, nearby search, and review retrieval
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlaceDirectory: Send + Sync {
    /// Resolves a free-text address to coordinates
    ///
    /// Fails with `NotFound` when no match exists and `ExternalApi` for any
    /// other non-OK outcome.
    async fn geocode(&self, address: &str) -> AppResult<Coordinates>;

    /// Finds places near the given location, filtered by type
    ///
    /// Returns an empty list when the directory has no matches; non-OK
    /// upstream statuses are `ExternalApi` errors.
    async fn search_nearby(
        &self,
        location: Coordinates,
        radius_m: u32,
        place_type: &str,
        limit: usize,
    ) -> AppResult<Vec<Place>>;

    /// Fetches up to `limit` reviews for a place
    ///
    /// Reviews with empty or whitespace-only text are filtered out before
    /// returning. A place without reviews yields an empty list, not an error.
    async fn fetch_reviews(&self, place_id: &str, limit: usize) -> AppResult<Vec<Review>>;
}

/// Zero-shot review classification over the fixed category set
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReviewClassifier: Send + Sync {
    /// Classifies a review text into one of the fixed categories
    ///
    /// Returns `NotApplicable` when the top-ranked label falls outside the
    /// category set; that is an expected outcome, never an error.
    async fn classify(&self, text: &str) -> AppResult<ReviewCategory>;
}
