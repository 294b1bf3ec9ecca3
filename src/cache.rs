//! In-memory TTL cache for parsed headlines.
//!
//! Two slots: the latest single headline and the fetched pool. Slots are
//! replaced wholesale, never mutated in place. Visibility is guarded by one
//! RwLock per slot; a separate mutex serializes the fetch-and-populate
//! critical section so concurrent misses produce a single upstream call.

use std::time::{Duration, Instant};

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::models::Headline;

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Slot<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

#[derive(Debug)]
pub struct HeadlineCache {
    ttl: Duration,
    latest: RwLock<Option<Slot<Headline>>>,
    pool: RwLock<Option<Slot<Vec<Headline>>>>,
    fetch_lock: Mutex<()>,
}

impl HeadlineCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            latest: RwLock::new(None),
            pool: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        }
    }

    pub async fn latest(&self) -> Option<Headline> {
        let slot = self.latest.read().await;
        slot.as_ref()
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.value.clone())
    }

    pub async fn pool(&self) -> Option<Vec<Headline>> {
        let slot = self.pool.read().await;
        slot.as_ref()
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.value.clone())
    }

    pub async fn store_latest(&self, headline: Headline) {
        *self.latest.write().await = Some(Slot::new(headline));
    }

    pub async fn store_pool(&self, headlines: Vec<Headline>) {
        *self.pool.write().await = Some(Slot::new(headlines));
    }

    /// Clears both slots. An in-flight fetch is not cancelled; it completes
    /// and may repopulate.
    pub async fn reset(&self) {
        *self.latest.write().await = None;
        *self.pool.write().await = None;
    }

    /// Serializes fetch-and-populate. Callers must re-check the slot after
    /// acquiring the guard.
    pub async fn fetch_guard(&self) -> MutexGuard<'_, ()> {
        self.fetch_lock.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headline(title: &str) -> Headline {
        Headline {
            title: title.to_string(),
            link: format!("https://example.com/{}", title),
            published_at: "2025-06-02T06:15:00+00:00".to_string(),
            source: "SPIEGEL ONLINE".to_string(),
        }
    }

    #[tokio::test]
    async fn fresh_entries_are_served() {
        let cache = HeadlineCache::new(Duration::from_secs(300));
        cache.store_latest(headline("a")).await;
        cache.store_pool(vec![headline("a"), headline("b")]).await;

        assert_eq!(cache.latest().await.unwrap().title, "a");
        assert_eq!(cache.pool().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_entries_are_stale_immediately() {
        let cache = HeadlineCache::new(Duration::ZERO);
        cache.store_latest(headline("a")).await;
        cache.store_pool(vec![headline("a")]).await;

        assert!(cache.latest().await.is_none());
        assert!(cache.pool().await.is_none());
    }

    #[tokio::test]
    async fn stores_replace_wholesale() {
        let cache = HeadlineCache::new(Duration::from_secs(300));
        cache.store_pool(vec![headline("a"), headline("b")]).await;
        cache.store_pool(vec![headline("c")]).await;

        let pool = cache.pool().await.unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].title, "c");
    }

    #[tokio::test]
    async fn reset_clears_both_slots() {
        let cache = HeadlineCache::new(Duration::from_secs(300));
        cache.store_latest(headline("a")).await;
        cache.store_pool(vec![headline("a")]).await;

        cache.reset().await;

        assert!(cache.latest().await.is_none());
        assert!(cache.pool().await.is_none());
    }
}
