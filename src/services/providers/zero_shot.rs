//! Zero-shot classifier provider
//!
//! Calls the HuggingFace inference API with the four fixed categories as
//! candidate labels and keeps the top-ranked one. The model is a general
//! NLI model, not trained on these categories; the pipeline only relies on
//! the contract that the same text and label set yield a single top label.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Category, ReviewCategory},
    services::providers::ReviewClassifier,
};

#[derive(Clone)]
pub struct ZeroShotClassifier {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl ZeroShotClassifier {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters {
    candidate_labels: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    #[serde(default)]
    #[allow(dead_code)] // Scores are not used; only the top label matters
    scores: Vec<f64>,
}

/// Maps the classifier's top label into the fixed set
///
/// An out-of-set top label is an expected outcome and yields NotApplicable;
/// an empty label list means the upstream response was malformed.
fn resolve_top_label(response: &ZeroShotResponse) -> AppResult<ReviewCategory> {
    let top = response.labels.first().ok_or_else(|| {
        AppError::ExternalApi("Classifier response contained no labels".to_string())
    })?;

    Ok(ReviewCategory::from(Category::from_label(top)))
}

#[async_trait::async_trait]
impl ReviewClassifier for ZeroShotClassifier {
    async fn classify(&self, text: &str) -> AppResult<ReviewCategory> {
        if text.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Review text cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/models/{}", self.api_url, self.model);

        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: Category::ALL.iter().map(|c| c.label()).collect(),
            },
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Classifier API returned status {}: {}",
                status, body
            )));
        }

        let scored: ZeroShotResponse = response.json().await?;
        let category = resolve_top_label(&scored)?;

        tracing::debug!(
            category = %category,
            model = %self.model,
            "Review classified"
        );

        Ok(category)
    }
}
