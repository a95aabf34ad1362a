//! The per-request recommendation pipeline
//!
//! Strictly linear: resolve location → find places → fetch reviews →
//! aggregate → rank, fanned out over a small bounded candidate list. A place
//! whose review fetch fails is skipped with a warning; failures at any other
//! stage abort the whole request. Nothing is cached between requests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    db::FeedbackStore,
    error::{AppError, AppResult},
    models::{Category, ClassifiedReview, Coordinates, PlaceSummary, ReviewCategory},
    services::{
        aggregation, providers::PlaceDirectory, providers::ReviewClassifier, ranking,
        ranking::ScoringPolicy, similarity,
    },
};

const DEFAULT_PLACE_TYPE: &str = "restaurant";

/// Request-independent pipeline bounds, taken from configuration at startup
#[derive(Debug, Clone)]
pub struct PipelineLimits {
    pub search_radius_m: u32,
    pub max_places: usize,
    pub max_reviews: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    /// Free-text address, used when explicit coordinates are absent
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Directory place type filter, defaults to "restaurant"
    pub place_type: Option<String>,
    /// Explicit per-request preference categories
    #[serde(default)]
    pub preferred_categories: Vec<Category>,
    /// Identity for the personalization passes; the pipeline never reads
    /// ambient session state
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedPlace {
    pub id: String,
    pub name: String,
    pub overall_average: Option<f64>,
    pub dominant_category: ReviewCategory,
    pub score: f64,
    pub reviews: Vec<ClassifiedReview>,
}

impl From<PlaceSummary> for RankedPlace {
    fn from(summary: PlaceSummary) -> Self {
        Self {
            id: summary.place.id,
            name: summary.place.name,
            overall_average: summary.overall_average,
            dominant_category: summary.dominant_category,
            score: summary.score,
            reviews: summary.classified_reviews,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimilarPlace {
    pub id: String,
    pub name: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationResponse {
    pub results: Vec<RankedPlace>,
    /// Content-similarity ranking against previously liked places; surfaced
    /// alongside the primary ranking, present only when the user has liked
    /// history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_to_favorites: Option<Vec<SimilarPlace>>,
    /// Benign no-result explanation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationResponse {
    fn no_results(message: &str) -> Self {
        Self {
            results: vec![],
            similar_to_favorites: None,
            message: Some(message.to_string()),
        }
    }
}

/// Runs one full pipeline pass
pub async fn recommend(
    directory: Arc<dyn PlaceDirectory>,
    classifier: Arc<dyn ReviewClassifier>,
    feedback: &FeedbackStore,
    limits: &PipelineLimits,
    request: RecommendationRequest,
) -> AppResult<RecommendationResponse> {
    let location = resolve_location(directory.as_ref(), &request).await?;

    let place_type = request
        .place_type
        .as_deref()
        .unwrap_or(DEFAULT_PLACE_TYPE)
        .to_string();
    let limit = request
        .limit
        .unwrap_or(limits.max_places)
        .min(limits.max_places);

    let places = directory
        .search_nearby(location, limits.search_radius_m, &place_type, limit)
        .await?;

    if places.is_empty() {
        return Ok(RecommendationResponse::no_results("No places found nearby"));
    }

    let mut summaries = Vec::with_capacity(places.len());
    for place in places {
        // A failed review fetch skips the place; it does not abort the batch
        let reviews = match directory.fetch_reviews(&place.id, limits.max_reviews).await {
            Ok(reviews) => reviews,
            Err(e) => {
                tracing::warn!(
                    place_id = %place.id,
                    error = %e,
                    "Review fetch failed, skipping place"
                );
                continue;
            }
        };

        let summary = aggregation::summarize_place(place, reviews, classifier.as_ref()).await?;
        summaries.push(summary);
    }

    if summaries
        .iter()
        .all(|summary| summary.classified_reviews.is_empty())
    {
        return Ok(RecommendationResponse::no_results(
            "No reviews found for nearby places",
        ));
    }

    let liked_categories = match request.user_id.as_deref() {
        Some(user_id) => feedback.liked_categories(user_id).await?,
        None => Default::default(),
    };

    // The two personalization signals never compose: a liked-category history
    // supersedes the per-request preference set
    let policy = if !liked_categories.is_empty() {
        ScoringPolicy::Historical(&liked_categories)
    } else if !request.preferred_categories.is_empty() {
        ScoringPolicy::Weighted(&request.preferred_categories)
    } else {
        ScoringPolicy::Baseline
    };

    let ranked = ranking::rank(summaries, &policy);

    let similar_to_favorites = match request.user_id.as_deref() {
        Some(user_id) => {
            similarity_pass(directory.as_ref(), feedback, limits, user_id, &ranked).await?
        }
        None => None,
    };

    tracing::info!(
        results = ranked.len(),
        personalized = !matches!(policy, ScoringPolicy::Baseline),
        "Recommendation pipeline completed"
    );

    Ok(RecommendationResponse {
        results: ranked.into_iter().map(RankedPlace::from).collect(),
        similar_to_favorites,
        message: None,
    })
}

/// Explicit coordinates win over the free-text address
async fn resolve_location(
    directory: &dyn PlaceDirectory,
    request: &RecommendationRequest,
) -> AppResult<Coordinates> {
    if let (Some(lat), Some(lng)) = (request.lat, request.lng) {
        return Ok(Coordinates { lat, lng });
    }

    match request.location.as_deref().map(str::trim) {
        Some(address) if !address.is_empty() => directory.geocode(address).await,
        _ => Err(AppError::InvalidInput(
            "Provide a location or explicit coordinates".to_string(),
        )),
    }
}

/// Ranks candidates by review-text similarity to the user's liked places
///
/// The query document is the concatenated review text of previously liked
/// places; a liked place whose reviews cannot be fetched is skipped. Returns
/// `None` when the user has no usable liked history.
async fn similarity_pass(
    directory: &dyn PlaceDirectory,
    feedback: &FeedbackStore,
    limits: &PipelineLimits,
    user_id: &str,
    ranked: &[PlaceSummary],
) -> AppResult<Option<Vec<SimilarPlace>>> {
    let liked_place_ids = feedback.liked_place_ids(user_id).await?;
    if liked_place_ids.is_empty() {
        return Ok(None);
    }

    let mut query_parts = Vec::new();
    for place_id in liked_place_ids.iter().take(limits.max_places) {
        match directory.fetch_reviews(place_id, limits.max_reviews).await {
            Ok(reviews) => query_parts.extend(reviews.into_iter().map(|review| review.text)),
            Err(e) => {
                tracing::warn!(
                    place_id = %place_id,
                    error = %e,
                    "Review fetch for liked place failed, skipping"
                );
            }
        }
    }

    if query_parts.is_empty() {
        return Ok(None);
    }
    let query_doc = query_parts.join(" ");

    let candidate_docs: Vec<String> = ranked
        .iter()
        .map(|summary| {
            summary
                .classified_reviews
                .iter()
                .map(|review| review.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    let similar = similarity::rank_by_similarity(&query_doc, &candidate_docs)
        .into_iter()
        .map(|rank| SimilarPlace {
            id: ranked[rank.index].place.id.clone(),
            name: ranked[rank.index].place.name.clone(),
            similarity: rank.similarity,
        })
        .collect();

    Ok(Some(similar))
}
