use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database URL for the feedback log
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Google Maps API key (geocoding, nearby search, place details)
    pub maps_api_key: String,

    /// Google Maps API base URL
    #[serde(default = "default_maps_api_url")]
    pub maps_api_url: String,

    /// HuggingFace inference API token for zero-shot classification
    pub classifier_api_key: String,

    /// HuggingFace inference API base URL
    #[serde(default = "default_classifier_api_url")]
    pub classifier_api_url: String,

    /// Zero-shot classification model
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Nearby search radius in meters
    #[serde(default = "default_search_radius_m")]
    pub search_radius_m: u32,

    /// Maximum number of candidate places per request
    #[serde(default = "default_max_places")]
    pub max_places: usize,

    /// Maximum number of reviews fetched per place
    /// (Google's place details endpoint returns at most 5)
    #[serde(default = "default_max_reviews")]
    pub max_reviews: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database_url() -> String {
    "sqlite://tastemap.db?mode=rwc".to_string()
}

fn default_maps_api_url() -> String {
    "https://maps.googleapis.com".to_string()
}

fn default_classifier_api_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_classifier_model() -> String {
    "facebook/bart-large-mnli".to_string()
}

fn default_search_radius_m() -> u32 {
    1500
}

fn default_max_places() -> usize {
    10
}

fn default_max_reviews() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
