//! Movie metadata provider abstraction
//!
//! Each provider wraps one external metadata API (TMDB, OMDb) behind a single
//! lookup-by-query operation. The enrichment chain decides which provider and
//! which query form to try next; providers only report what one request found.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::MovieDetails,
};

pub mod omdb;
pub mod tmdb;

pub use omdb::OmdbProvider;
pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// `Ok(None)` means the provider answered but had no match for `query`.
/// `Err` covers transport failures, non-success statuses and undecodable bodies.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn lookup(&self, query: &str) -> AppResult<Option<MovieDetails>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the HTTP client shared by all providers
///
/// The timeout bounds every request a provider makes.
pub fn build_http_client(timeout: Duration) -> AppResult<HttpClient> {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Turns a non-success response into an `ExternalApi` error
pub(crate) async fn ensure_success(
    provider: &str,
    response: reqwest::Response,
) -> AppResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::ExternalApi(format!(
        "{} API returned status {}: {}",
        provider, status, body
    )))
}
