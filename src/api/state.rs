use std::sync::Arc;

use crate::config::Config;
use crate::db::{
    create_redis_client, CacheWriterHandle, Catalog, DetailsCache, MemoryCache, RedisCache,
    RecommendationTable,
};
use crate::services::providers::{build_http_client, MetadataProvider, OmdbProvider, TmdbProvider};
use crate::services::{default_chain, Enricher};

/// Shared application state
///
/// Built once at startup and never mutated, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub catalog: Catalog,
    pub recommendations: RecommendationTable,
    pub enricher: Enricher,
    pub max_recommendations: usize,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        recommendations: RecommendationTable,
        enricher: Enricher,
        max_recommendations: usize,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                recommendations,
                enricher,
                max_recommendations,
            }),
        }
    }

    /// Loads the CSV tables and wires providers and cache from configuration
    ///
    /// Returns the Redis writer handle when Redis caching is enabled so the
    /// caller can flush it on shutdown.
    pub fn from_config(config: &Config) -> anyhow::Result<(Self, Option<CacheWriterHandle>)> {
        let catalog = Catalog::from_path(&config.movies_csv)?;
        let recommendations = RecommendationTable::from_path(&config.recommendations_csv)?;

        let http_client = build_http_client(config.request_timeout())?;

        let primary: Arc<dyn MetadataProvider> = Arc::new(TmdbProvider::new(
            http_client.clone(),
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base.clone(),
        ));

        let secondary: Option<Arc<dyn MetadataProvider>> =
            config.omdb_api_key.as_ref().map(|key| {
                Arc::new(OmdbProvider::new(
                    http_client.clone(),
                    key.clone(),
                    config.omdb_api_url.clone(),
                )) as Arc<dyn MetadataProvider>
            });

        if secondary.is_none() {
            tracing::warn!("OMDB_API_KEY not set, secondary metadata provider disabled");
        }

        let (cache, writer): (Arc<dyn DetailsCache>, Option<CacheWriterHandle>) =
            match &config.redis_url {
                Some(url) => {
                    let (cache, writer) = RedisCache::new(create_redis_client(url)?);
                    (Arc::new(cache), Some(writer))
                }
                None => (MemoryCache::shared(config.cache_capacity), None),
            };

        tracing::info!(
            cache = cache.name(),
            concurrency = config.enrichment_concurrency,
            "Details cache ready"
        );

        let enricher = Enricher::new(
            default_chain(primary, secondary, config.search_year_hint),
            cache,
            config.retry_backoff(),
            config.enrichment_concurrency,
        );

        let state = Self::new(
            catalog,
            recommendations,
            enricher,
            config.max_recommendations,
        );

        Ok((state, writer))
    }
}
