//! Google Maps provider
//!
//! Wraps three of the Maps web services behind the PlaceDirectory trait:
//!
//! 1. Geocoding: /maps/api/geocode/json → lat/lng for a free-text address
//! 2. Nearby Search: /maps/api/place/nearbysearch/json → candidate places
//! 3. Place Details: /maps/api/place/details/json → reviews for one place
//!
//! All three endpoints report their outcome in a body-level `status` field
//! alongside the HTTP status; ZERO_RESULTS is a benign condition, every other
//! non-OK status is surfaced verbatim.

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Coordinates, Place, Review},
    services::providers::PlaceDirectory,
};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Clone)]
pub struct GoogleMapsDirectory {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GoogleMapsDirectory {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

// Wire types

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlace {
    place_id: String,
    name: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<PlaceDetailsResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsResult {
    #[serde(default)]
    reviews: Vec<ApiReview>,
}

#[derive(Debug, Deserialize)]
struct ApiReview {
    #[serde(default)]
    text: String,
    #[serde(default)]
    rating: Option<f64>,
}

/// Drops reviews whose text is empty after trimming and caps the list
fn filter_reviews(reviews: Vec<ApiReview>, limit: usize) -> Vec<Review> {
    reviews
        .into_iter()
        .filter(|review| !review.text.trim().is_empty())
        .take(limit)
        .map(|review| Review {
            text: review.text,
            rating: review.rating,
        })
        .collect()
}

#[async_trait::async_trait]
impl PlaceDirectory for GoogleMapsDirectory {
    async fn geocode(&self, address: &str) -> AppResult<Coordinates> {
        if address.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Address cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/maps/api/geocode/json", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Geocoding API returned status {}: {}",
                status, body
            )));
        }

        let geocode: GeocodeResponse = response.json().await?;

        match geocode.status.as_str() {
            STATUS_OK => geocode
                .results
                .first()
                .map(|result| result.geometry.location)
                .ok_or_else(|| {
                    AppError::ExternalApi("Geocoding response contained no results".to_string())
                }),
            STATUS_ZERO_RESULTS => Err(AppError::NotFound(format!(
                "No match found for address '{}'",
                address
            ))),
            other => Err(AppError::ExternalApi(format!(
                "Geocoding failed with status {}",
                other
            ))),
        }
    }

    async fn search_nearby(
        &self,
        location: Coordinates,
        radius_m: u32,
        place_type: &str,
        limit: usize,
    ) -> AppResult<Vec<Place>> {
        let url = format!("{}/maps/api/place/nearbysearch/json", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("location", format!("{},{}", location.lat, location.lng)),
                ("radius", radius_m.to_string()),
                ("type", place_type.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Nearby search returned status {}: {}",
                status, body
            )));
        }

        let search: NearbySearchResponse = response.json().await?;

        match search.status.as_str() {
            // ZERO_RESULTS is a benign empty result, not a failure
            STATUS_OK | STATUS_ZERO_RESULTS => {
                let places: Vec<Place> = search
                    .results
                    .into_iter()
                    .take(limit)
                    .map(|result| Place {
                        id: result.place_id,
                        name: result.name,
                        location: result.geometry.location,
                    })
                    .collect();

                tracing::info!(
                    place_type = %place_type,
                    results = places.len(),
                    provider = "google_maps",
                    "Nearby search completed"
                );

                Ok(places)
            }
            other => Err(AppError::ExternalApi(format!(
                "Nearby search failed with status {}",
                other
            ))),
        }
    }

    async fn fetch_reviews(&self, place_id: &str, limit: usize) -> AppResult<Vec<Review>> {
        let url = format!("{}/maps/api/place/details/json", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", "reviews"),
                ("reviews_no_translation", "false"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Place details returned status {}: {}",
                status, body
            )));
        }

        let details: PlaceDetailsResponse = response.json().await?;

        match details.status.as_str() {
            STATUS_OK | STATUS_ZERO_RESULTS => {
                let reviews = filter_reviews(
                    details.result.map(|result| result.reviews).unwrap_or_default(),
                    limit,
                );

                tracing::debug!(
                    place_id = %place_id,
                    reviews = reviews.len(),
                    provider = "google_maps",
                    "Reviews fetched"
                );

                Ok(reviews)
            }
            other => Err(AppError::ExternalApi(format!(
                "Place details failed with status {}",
                other
            ))),
        }
    }
}
