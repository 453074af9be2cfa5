use std::fmt::Display;
use std::sync::Arc;

use moka::future::Cache as MokaCache;

use crate::models::MovieDetails;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Details for an exact catalog title
    Details(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Details(title) => write!(f, "details:{}", title),
        }
    }
}

/// Advisory store for enriched movie details
///
/// Lookups that miss (or fail) are simply recomputed, so implementations log
/// their own errors instead of returning them.
#[async_trait::async_trait]
pub trait DetailsCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Option<MovieDetails>;

    async fn put(&self, key: &CacheKey, details: &MovieDetails);

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Bounded in-process cache, used when no Redis URL is configured
#[derive(Clone)]
pub struct MemoryCache {
    inner: MokaCache<String, MovieDetails>,
}

impl MemoryCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: MokaCache::builder().max_capacity(max_capacity).build(),
        }
    }

    pub fn shared(max_capacity: u64) -> Arc<dyn DetailsCache> {
        Arc::new(Self::new(max_capacity))
    }
}

#[async_trait::async_trait]
impl DetailsCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<MovieDetails> {
        self.inner.get(&key.to_string()).await
    }

    async fn put(&self, key: &CacheKey, details: &MovieDetails) {
        self.inner.insert(key.to_string(), details.clone()).await;
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
