use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use tastemap::{
    db::{sqlite::init_schema, FeedbackStore},
    error::{AppError, AppResult},
    models::{Category, Coordinates, Place, Review, ReviewCategory},
    routes::{create_router, AppState},
    services::{
        providers::{PlaceDirectory, ReviewClassifier},
        recommendations::PipelineLimits,
    },
};

/// Canned directory: one known address, a fixed candidate list, and
/// per-place review sets
struct StubDirectory {
    places: Vec<Place>,
    reviews: HashMap<String, Vec<Review>>,
}

impl StubDirectory {
    fn new() -> Self {
        let places = vec![
            place("cafe-1", "Corner Cafe"),
            place("bistro-2", "Harbor Bistro"),
        ];

        let mut reviews = HashMap::new();
        reviews.insert(
            "cafe-1".to_string(),
            vec![
                review("friendly staff and quick service", Some(4.0)),
                review("fine but nothing special", Some(3.0)),
            ],
        );
        reviews.insert(
            "bistro-2".to_string(),
            vec![
                review("the grilled fish was excellent food", Some(5.0)),
                review("great food, cozy terrace", Some(5.0)),
            ],
        );

        Self { places, reviews }
    }
}

fn place(id: &str, name: &str) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        location: Coordinates {
            lat: 41.0,
            lng: 29.0,
        },
    }
}

fn review(text: &str, rating: Option<f64>) -> Review {
    Review {
        text: text.to_string(),
        rating,
    }
}

#[async_trait::async_trait]
impl PlaceDirectory for StubDirectory {
    async fn geocode(&self, address: &str) -> AppResult<Coordinates> {
        match address {
            "Kadikoy, Istanbul" => Ok(Coordinates {
                lat: 40.9927,
                lng: 29.0277,
            }),
            _ => Err(AppError::NotFound(format!(
                "No match found for address '{}'",
                address
            ))),
        }
    }

    async fn search_nearby(
        &self,
        _location: Coordinates,
        _radius_m: u32,
        _place_type: &str,
        limit: usize,
    ) -> AppResult<Vec<Place>> {
        Ok(self.places.iter().take(limit).cloned().collect())
    }

    async fn fetch_reviews(&self, place_id: &str, limit: usize) -> AppResult<Vec<Review>> {
        Ok(self
            .reviews
            .get(place_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .collect())
    }
}

/// Keyword classifier standing in for the zero-shot model
struct StubClassifier;

#[async_trait::async_trait]
impl ReviewClassifier for StubClassifier {
    async fn classify(&self, text: &str) -> AppResult<ReviewCategory> {
        let category = if text.contains("food") || text.contains("fish") {
            Some(Category::FoodQuality)
        } else if text.contains("staff") || text.contains("service") {
            Some(Category::ServiceQuality)
        } else if text.contains("price") || text.contains("value") {
            Some(Category::ValueForMoney)
        } else if text.contains("cozy") || text.contains("terrace") {
            Some(Category::Ambiance)
        } else {
            None
        };
        Ok(ReviewCategory::from(category))
    }
}

async fn create_test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();

    let state = Arc::new(AppState {
        directory: Arc::new(StubDirectory::new()),
        classifier: Arc::new(StubClassifier),
        feedback: FeedbackStore::new(pool),
        limits: PipelineLimits {
            search_radius_m: 1500,
            max_places: 10,
            max_reviews: 5,
        },
    });

    create_router(state)
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_recommendations_require_a_location() {
    let app = create_test_app().await;

    let response = app
        .oneshot(json_request("/api/v1/recommendations", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("location"));
}

#[tokio::test]
async fn test_unknown_address_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "/api/v1/recommendations",
            json!({ "location": "Atlantis" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations_baseline_ranking() {
    let app = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "/api/v1/recommendations",
            json!({ "location": "Kadikoy, Istanbul" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    // The bistro averages 5.0, the cafe 3.5
    assert_eq!(results[0]["id"], "bistro-2");
    assert_eq!(results[0]["dominant_category"], "food_quality");
    assert_eq!(results[1]["id"], "cafe-1");
    assert_eq!(results[1]["overall_average"], 3.5);

    // The 3-star cafe review is never classified
    assert_eq!(results[1]["reviews"][1]["category"], Value::Null);

    assert!(body.get("similar_to_favorites").is_none());
}

#[tokio::test]
async fn test_feedback_then_personalized_recommendations() {
    let app = create_test_app().await;

    // Record a like for a service-quality place
    let response = app
        .clone()
        .oneshot(json_request(
            "/api/v1/feedback",
            json!({
                "user_id": "u1",
                "place_id": "cafe-1",
                "liked": true,
                "category": "service_quality"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let record = response_json(response).await;
    assert_eq!(record["category"], "service_quality");

    // The liked history now drives the ranking
    let response = app
        .oneshot(json_request(
            "/api/v1/recommendations",
            json!({ "location": "Kadikoy, Istanbul", "user_id": "u1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let results = body["results"].as_array().unwrap();
    // Historical: cafe scores 1.0 + 3.5/5 = 1.7, bistro 0.0 + 5/5 = 1.0
    assert_eq!(results[0]["id"], "cafe-1");
    assert_eq!(results[1]["id"], "bistro-2");

    // Content-similarity list is surfaced alongside, led by the place whose
    // reviews share vocabulary with the liked cafe
    let similar = body["similar_to_favorites"].as_array().unwrap();
    assert_eq!(similar.len(), 2);
    assert_eq!(similar[0]["id"], "cafe-1");
}

#[tokio::test]
async fn test_feedback_rejects_blank_user() {
    let app = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "/api/v1/feedback",
            json!({
                "user_id": "  ",
                "place_id": "cafe-1",
                "liked": true,
                "category": "ambiance"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weighted_preferences_reorder_results() {
    let app = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "/api/v1/recommendations",
            json!({
                "location": "Kadikoy, Istanbul",
                "preferred_categories": ["service_quality"]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let results = body["results"].as_array().unwrap();
    // Only the cafe has a qualifying service-quality review
    assert_eq!(results[0]["id"], "cafe-1");
    assert_eq!(results[0]["score"], 1.0);
    assert_eq!(results[1]["score"], 0.0);
}
