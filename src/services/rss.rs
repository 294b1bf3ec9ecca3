//! The fetch-parse-cache-filter pipeline.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::HeadlineCache;
use crate::config::FeedConfig;
use crate::error::{AppError, AppResult};
use crate::fetcher::FeedFetcher;
use crate::models::Headline;
use crate::parser;

pub struct RssService {
    fetcher: Arc<dyn FeedFetcher>,
    cache: HeadlineCache,
    feed: FeedConfig,
}

impl RssService {
    pub fn new(fetcher: Arc<dyn FeedFetcher>, feed: FeedConfig) -> Self {
        let cache = HeadlineCache::new(feed.cache_ttl);
        Self {
            fetcher,
            cache,
            feed,
        }
    }

    /// Newest headline, or the first one whose title matches `filter`.
    /// Only the unfiltered path reads or writes the single-item cache;
    /// filtered lookups are one-offs and must not pollute it.
    pub async fn latest(&self, filter: Option<&str>) -> AppResult<Headline> {
        if filter.is_none() {
            if let Some(cached) = self.cache.latest().await {
                debug!("serving latest headline from cache");
                return Ok(cached);
            }
        }

        let _guard = self.cache.fetch_guard().await;
        if filter.is_none() {
            if let Some(cached) = self.cache.latest().await {
                debug!("latest headline was refreshed while waiting for the fetch lock");
                return Ok(cached);
            }
        }

        let headlines = self.fetch_headlines().await?;
        let headline = match filter {
            Some(keyword) => headlines
                .into_iter()
                .find(|h| title_matches(&h.title, keyword)),
            None => headlines.into_iter().next(),
        }
        .ok_or(AppError::FeedUnavailable)?;

        if filter.is_none() {
            self.cache.store_latest(headline.clone()).await;
        }

        Ok(headline)
    }

    /// Filtered, limited slice of the pool plus the pre-filter pool size.
    /// The filter runs over the whole pool so matches beyond the first page
    /// are still found; truncation happens afterwards.
    pub async fn top(&self, limit: usize, filter: Option<&str>) -> AppResult<(Vec<Headline>, usize)> {
        let pool = self.pool(filter.is_none()).await?;
        let total = pool.len();
        let headlines = apply_filter(pool, filter).into_iter().take(limit).collect();
        Ok((headlines, total))
    }

    pub async fn export_set(&self, limit: usize, filter: Option<&str>) -> AppResult<Vec<Headline>> {
        let pool = self.pool(filter.is_none()).await?;
        Ok(apply_filter(pool, filter).into_iter().take(limit).collect())
    }

    /// Pool from cache, or fetch-and-populate under the fetch lock with a
    /// post-acquisition re-check. `store` is false for filtered queries; the
    /// pool cache holds the canonical recent feed, never a filtered view.
    async fn pool(&self, store: bool) -> AppResult<Vec<Headline>> {
        if let Some(pool) = self.cache.pool().await {
            debug!(items = pool.len(), "serving headline pool from cache");
            return Ok(pool);
        }

        let _guard = self.cache.fetch_guard().await;
        if let Some(pool) = self.cache.pool().await {
            debug!("headline pool was refreshed while waiting for the fetch lock");
            return Ok(pool);
        }

        let headlines = self.fetch_headlines().await?;
        if store {
            self.cache.store_pool(headlines.clone()).await;
        }
        Ok(headlines)
    }

    async fn fetch_headlines(&self) -> AppResult<Vec<Headline>> {
        let body = self.fetcher.fetch(&self.feed.url).await.map_err(|err| {
            warn!(url = %self.feed.url, error = %err, "failed to fetch RSS feed");
            AppError::FeedUnavailable
        })?;

        let headlines = parser::parse_feed(&body, &self.feed.source_name, self.feed.fetch_limit);
        if headlines.is_empty() {
            warn!(url = %self.feed.url, "feed contained no parseable items");
            return Err(AppError::FeedUnavailable);
        }

        info!(items = headlines.len(), "fetched RSS feed");
        Ok(headlines)
    }

    pub async fn reset_cache(&self) {
        self.cache.reset().await;
    }
}

/// Case-folded substring containment; the empty keyword matches everything.
pub fn title_matches(title: &str, keyword: &str) -> bool {
    keyword.is_empty() || title.to_lowercase().contains(&keyword.to_lowercase())
}

fn apply_filter(pool: Vec<Headline>, filter: Option<&str>) -> Vec<Headline> {
    match filter {
        Some(keyword) if !keyword.is_empty() => pool
            .into_iter()
            .filter(|h| title_matches(&h.title, keyword))
            .collect(),
        _ => pool,
    }
}
