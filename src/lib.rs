// Library exports for the headlines API.
// Routing lives here so integration tests can build the app.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use services::rss::RssService;

#[derive(Clone)]
pub struct AppState {
    pub rss: Arc<RssService>,
    pub config: Config,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .nest("/api/rss/spiegel", create_rss_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

fn create_rss_routes() -> Router<AppState> {
    Router::new()
        .route("/latest", get(handlers::rss::latest))
        .route("/top5", get(handlers::rss::top))
        .route("/export", get(handlers::rss::export))
}
