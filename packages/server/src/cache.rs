//! TTL response cache.
//!
//! One shared cache for both endpoints; the content-level key functions
//! already namespace generation and extraction entries, so the value is
//! a small enum rather than two caches.

use std::time::Duration;

use moka::future::Cache;

#[derive(Debug, Clone)]
pub enum CacheEntry {
    Generation { output: String, tokens: usize },
    Extraction { text: String },
}

#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<String, CacheEntry>,
}

impl ResponseCache {
    pub fn new(max_size: u64, ttl_seconds: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_size)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, entry: CacheEntry) {
        self.inner.insert(key, entry).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let cache = ResponseCache::new(10, 60);
        cache
            .insert(
                "k".to_string(),
                CacheEntry::Extraction {
                    text: "body".to_string(),
                },
            )
            .await;

        match cache.get("k").await {
            Some(CacheEntry::Extraction { text }) => assert_eq!(text, "body"),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let cache = ResponseCache::new(10, 60);
        assert!(cache.get("absent").await.is_none());
    }
}
