use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use tastemap::{
    config::Config,
    db::{self, FeedbackStore},
    routes::{create_router, AppState},
    services::{
        providers::{GoogleMapsDirectory, ZeroShotClassifier},
        recommendations::PipelineLimits,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tastemap=info,tower_http=info")),
        )
        .init();

    let pool = db::create_pool(&config.database_url).await?;

    // Pipeline context: built once, shared by reference across requests
    let state = Arc::new(AppState {
        directory: Arc::new(GoogleMapsDirectory::new(
            config.maps_api_key.clone(),
            config.maps_api_url.clone(),
        )),
        classifier: Arc::new(ZeroShotClassifier::new(
            config.classifier_api_key.clone(),
            config.classifier_api_url.clone(),
            config.classifier_model.clone(),
        )),
        feedback: FeedbackStore::new(pool),
        limits: PipelineLimits {
            search_radius_m: config.search_radius_m,
            max_places: config.max_places,
            max_reviews: config.max_reviews,
        },
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
