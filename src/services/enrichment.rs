//! Movie metadata enrichment
//!
//! Turns a catalog title into display metadata by walking an ordered chain of
//! `(provider, query form)` steps. The first step that finds the movie wins.
//! Nothing here fails: when every step comes up empty the caller gets
//! `MovieDetails::placeholder()`.
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::{
    cached,
    db::{CacheKey, DetailsCache},
    models::{MovieCard, MovieDetails},
    services::{providers::MetadataProvider, title_query::QueryForm},
};

/// One entry of the fallback chain
#[derive(Clone)]
pub struct FallbackStep {
    pub provider: Arc<dyn MetadataProvider>,
    pub query: QueryForm,
}

impl FallbackStep {
    pub fn new(provider: Arc<dyn MetadataProvider>, query: QueryForm) -> Self {
        Self { provider, query }
    }
}

/// Standard chain: three primary-provider query forms, then the secondary provider
pub fn default_chain(
    primary: Arc<dyn MetadataProvider>,
    secondary: Option<Arc<dyn MetadataProvider>>,
    year_hint: u16,
) -> Vec<FallbackStep> {
    let mut chain = vec![
        FallbackStep::new(primary.clone(), QueryForm::Normalized),
        FallbackStep::new(primary.clone(), QueryForm::Raw),
        FallbackStep::new(primary, QueryForm::NormalizedWithYear(year_hint)),
    ];

    if let Some(secondary) = secondary {
        chain.push(FallbackStep::new(secondary, QueryForm::Normalized));
    }

    chain
}

/// Fetches and caches display metadata for recommended titles
pub struct Enricher {
    chain: Vec<FallbackStep>,
    cache: Arc<dyn DetailsCache>,
    backoff: Duration,
    concurrency: usize,
}

impl Enricher {
    pub fn new(
        chain: Vec<FallbackStep>,
        cache: Arc<dyn DetailsCache>,
        backoff: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            chain,
            cache,
            backoff,
            concurrency: concurrency.max(1),
        }
    }

    /// Details for `title`; placeholders when no provider has it
    ///
    /// Placeholder results are not cached, so a provider outage does not stick
    /// for the rest of the session.
    pub async fn fetch_details(&self, title: &str) -> MovieDetails {
        cached!(
            self.cache,
            CacheKey::Details(title.to_string()),
            self.fetch_uncached(title),
            |details: &MovieDetails| !details.is_placeholder()
        )
    }

    /// Enriches `titles` with bounded concurrency, keeping their order
    pub async fn enrich_all(&self, titles: &[String]) -> Vec<MovieCard> {
        stream::iter(titles.iter().cloned())
            .map(|title| async move {
                let details = self.fetch_details(&title).await;
                MovieCard::new(title, details)
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn fetch_uncached(&self, title: &str) -> MovieDetails {
        let mut sent: HashSet<(&'static str, String)> = HashSet::new();
        let last = self.chain.len().saturating_sub(1);

        for (idx, step) in self.chain.iter().enumerate() {
            let provider = step.provider.name();
            let query = step.query.build(title);

            if query.is_empty() || !sent.insert((provider, query.clone())) {
                continue;
            }

            match step.provider.lookup(&query).await {
                Ok(Some(details)) => return details,
                Ok(None) => {
                    tracing::debug!(
                        title = %title,
                        query = %query,
                        provider = provider,
                        "No match from provider"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        title = %title,
                        query = %query,
                        provider = provider,
                        error = %e,
                        "Metadata lookup failed"
                    );
                    if idx < last && !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
            }
        }

        tracing::info!(title = %title, "No provider returned details, using placeholder");
        MovieDetails::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryCache;
    use crate::error::AppError;
    use crate::services::providers::MockMetadataProvider;
    use mockall::predicate::eq;

    const TITLE: &str = "Alien: Covenant (2017)";

    fn mock(name: &'static str) -> MockMetadataProvider {
        let mut provider = MockMetadataProvider::new();
        provider.expect_name().return_const(name);
        provider
    }

    fn found(rating: &str) -> MovieDetails {
        MovieDetails {
            poster_url: "https://img/alien.jpg".to_string(),
            overview: "The crew of a colony ship...".to_string(),
            release_date: "2017-05-09".to_string(),
            rating: rating.to_string(),
            trailer_url: Some("https://www.youtube.com/watch?v=H0VW6sg50Pk".to_string()),
        }
    }

    fn failure() -> AppError {
        AppError::ExternalApi("tmdb API returned status 503: unavailable".to_string())
    }

    fn enricher(chain: Vec<FallbackStep>) -> Enricher {
        Enricher::new(chain, MemoryCache::shared(100), Duration::ZERO, 2)
    }

    #[tokio::test]
    async fn test_first_candidate_hit_stops_chain() {
        let mut primary = mock("tmdb");
        primary
            .expect_lookup()
            .with(eq("Alien Covenant"))
            .times(1)
            .returning(|_| Ok(Some(found("6.4"))));
        let mut secondary = mock("omdb");
        secondary.expect_lookup().never();

        let enricher = enricher(default_chain(
            Arc::new(primary),
            Some(Arc::new(secondary)),
            2023,
        ));

        assert_eq!(enricher.fetch_details(TITLE).await, found("6.4"));
    }

    #[tokio::test]
    async fn test_candidates_tried_in_order() {
        let mut primary = mock("tmdb");
        let mut seq = mockall::Sequence::new();
        primary
            .expect_lookup()
            .with(eq("Alien Covenant"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(failure()));
        primary
            .expect_lookup()
            .with(eq("Alien: Covenant (2017)"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        primary
            .expect_lookup()
            .with(eq("Alien Covenant 2023"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(found("6.4"))));

        let enricher = enricher(default_chain(Arc::new(primary), None, 2023));
        assert_eq!(enricher.fetch_details(TITLE).await, found("6.4"));
    }

    #[tokio::test]
    async fn test_secondary_used_when_primary_fails_everything() {
        let mut primary = mock("tmdb");
        primary.expect_lookup().times(3).returning(|_| Err(failure()));

        let mut secondary = mock("omdb");
        secondary
            .expect_lookup()
            .with(eq("Alien Covenant"))
            .times(1)
            .returning(|_| {
                Ok(Some(MovieDetails::from_parts(
                    Some("https://omdb/alien.jpg".to_string()),
                    Some("Bound for a remote planet...".to_string()),
                    Some("2017".to_string()),
                    Some("6.4".to_string()),
                    None,
                )))
            });

        let enricher = enricher(default_chain(
            Arc::new(primary),
            Some(Arc::new(secondary)),
            2023,
        ));
        let details = enricher.fetch_details(TITLE).await;

        assert_eq!(details.poster_url, "https://omdb/alien.jpg");
        assert_eq!(details.overview, "Bound for a remote planet...");
        assert_eq!(details.release_date, "2017");
        assert_eq!(details.rating, "6.4");
        assert_eq!(details.trailer_url, None);
    }

    #[tokio::test]
    async fn test_all_providers_fail_yields_placeholder() {
        let mut primary = mock("tmdb");
        primary.expect_lookup().times(3).returning(|_| Err(failure()));
        let mut secondary = mock("omdb");
        secondary.expect_lookup().times(1).returning(|_| Ok(None));

        let enricher = enricher(default_chain(
            Arc::new(primary),
            Some(Arc::new(secondary)),
            2023,
        ));

        assert_eq!(
            enricher.fetch_details(TITLE).await,
            MovieDetails::placeholder()
        );
    }

    #[tokio::test]
    async fn test_duplicate_queries_sent_once() {
        // "Inception" normalizes to itself, so the raw candidate is a repeat.
        let mut primary = mock("tmdb");
        primary
            .expect_lookup()
            .with(eq("Inception"))
            .times(1)
            .returning(|_| Ok(None));
        primary
            .expect_lookup()
            .with(eq("Inception 2023"))
            .times(1)
            .returning(|_| Ok(None));

        let enricher = enricher(default_chain(Arc::new(primary), None, 2023));
        assert!(enricher.fetch_details("Inception").await.is_placeholder());
    }

    #[tokio::test]
    async fn test_empty_title_never_queries_primary() {
        let mut primary = mock("tmdb");
        primary.expect_lookup().never();

        let enricher = enricher(default_chain(Arc::new(primary), None, 2023));
        assert_eq!(enricher.fetch_details("").await, MovieDetails::placeholder());
    }

    #[tokio::test]
    async fn test_nonsense_title_is_total() {
        let mut primary = mock("tmdb");
        primary.expect_lookup().returning(|_| Ok(None));

        let enricher = enricher(default_chain(Arc::new(primary), None, 2023));
        let details = enricher.fetch_details("zzqx!!--::").await;

        assert!(!details.poster_url.is_empty());
        assert!(!details.overview.is_empty());
        assert!(!details.release_date.is_empty());
        assert!(!details.rating.is_empty());
    }

    #[tokio::test]
    async fn test_success_is_cached() {
        let mut primary = mock("tmdb");
        primary
            .expect_lookup()
            .times(1)
            .returning(|_| Ok(Some(found("8.8"))));

        let enricher = enricher(default_chain(Arc::new(primary), None, 2023));

        assert_eq!(enricher.fetch_details("Inception").await, found("8.8"));
        assert_eq!(enricher.fetch_details("Inception").await, found("8.8"));
    }

    #[tokio::test]
    async fn test_placeholder_is_not_cached() {
        let mut primary = mock("tmdb");
        let mut seq = mockall::Sequence::new();
        primary
            .expect_lookup()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(failure()));
        primary
            .expect_lookup()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(found("8.8"))));

        let enricher = enricher(default_chain(Arc::new(primary), None, 2023));

        assert!(enricher.fetch_details("Inception").await.is_placeholder());
        assert_eq!(enricher.fetch_details("Inception").await, found("8.8"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_only_after_failures() {
        let mut primary = mock("tmdb");
        let mut seq = mockall::Sequence::new();
        primary
            .expect_lookup()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(failure()));
        primary
            .expect_lookup()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        primary
            .expect_lookup()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(failure()));

        let backoff = Duration::from_millis(300);
        let enricher = Enricher::new(
            default_chain(Arc::new(primary), None, 2023),
            MemoryCache::shared(10),
            backoff,
            1,
        );

        let start = tokio::time::Instant::now();
        enricher.fetch_details(TITLE).await;

        // One pause after the first failure; none after the empty result or the last step.
        let elapsed = start.elapsed();
        assert!(elapsed >= backoff);
        assert!(elapsed < backoff * 2);
    }

    #[tokio::test]
    async fn test_enrich_all_preserves_order() {
        let mut primary = mock("tmdb");
        primary.expect_lookup().returning(|query: &str| {
            Ok(Some(MovieDetails::from_parts(
                None,
                Some(format!("About {}", query)),
                None,
                None,
                None,
            )))
        });

        let enricher = enricher(default_chain(Arc::new(primary), None, 2023));
        let titles = vec![
            "Interstellar".to_string(),
            "Tenet".to_string(),
            "Memento".to_string(),
        ];

        let cards = enricher.enrich_all(&titles).await;
        let names: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(names, vec!["Interstellar", "Tenet", "Memento"]);
        assert_eq!(cards[1].overview, "About Tenet");
    }
}
