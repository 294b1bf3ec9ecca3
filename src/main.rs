use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};

use headlines_api::fetcher::HttpFeedFetcher;
use headlines_api::services::rss::RssService;
use headlines_api::{create_app, AppError, AppResult, AppState, Config};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting headlines API");

    let config = Config::new()?;
    info!(environment = %config.environment, feed = %config.feed.url, "Configuration loaded");

    let fetcher = HttpFeedFetcher::new(config.feed.fetch_timeout)
        .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {}", err)))?;
    let rss = Arc::new(RssService::new(Arc::new(fetcher), config.feed.clone()));

    let state = AppState {
        rss,
        config: config.clone(),
    };
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|_| {
            AppError::Config(format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            ))
        })?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            warn!("Received SIGTERM, shutting down gracefully");
        },
    }
}
