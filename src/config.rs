use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_FEED_URL: &str = "https://www.spiegel.de/schlagzeilen/tops/index.rss";
pub const SOURCE_NAME: &str = "SPIEGEL ONLINE";

/// Cache entries older than this are refetched on the next request.
pub const CACHE_TTL: Duration = Duration::from_secs(300);
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(2);
/// Items fetched per refresh; filtering runs over this pool, not the page size.
pub const FETCH_LIMIT: usize = 250;

pub const DEFAULT_TOP_LIMIT: usize = 5;
pub const MAX_TOP_LIMIT: usize = 200;
pub const MAX_FILTER_LEN: usize = 100;
pub const EXPORT_LIMIT_CEILING: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub source_name: String,
    pub fetch_timeout: Duration,
    pub cache_ttl: Duration,
    pub fetch_limit: usize,
}

impl Config {
    pub fn new() -> AppResult<Self> {
        // Load environment variables
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                AppError::Config(format!(
                    "Invalid PORT '{}': must be a valid port number (e.g., 8080)",
                    raw
                ))
            })?,
            Err(_) => 8080,
        };

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
        };

        let feed = FeedConfig {
            url: env::var("RSS_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            source_name: SOURCE_NAME.to_string(),
            fetch_timeout: FETCH_TIMEOUT,
            cache_ttl: CACHE_TTL,
            fetch_limit: FETCH_LIMIT,
        };

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server,
            feed,
            environment,
        })
    }
}
