//! TMDB (The Movie Database) provider
//!
//! Primary metadata source. A lookup is two requests:
//! 1. `/search/movie` → first result supplies poster, overview, date, rating, id
//! 2. `/movie/{id}/videos` → first YouTube trailer, if any
//!
//! A failed trailer request only drops the trailer; the lookup still succeeds.
use crate::{
    error::AppResult,
    models::{MovieDetails, TmdbMovie, TmdbSearchResponse, TmdbVideo, TmdbVideosResponse},
    services::providers::{ensure_success, MetadataProvider},
};
use reqwest::Client as HttpClient;

const TRAILER_SITE: &str = "YouTube";
const TRAILER_TYPE: &str = "Trailer";
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base: String,
}

impl TmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String, image_base: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base: image_base.trim_end_matches('/').to_string(),
        }
    }

    async fn search(&self, query: &str) -> AppResult<Vec<TmdbMovie>> {
        let url = format!("{}/search/movie", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?;

        let response = ensure_success(self.name(), response).await?;
        let search: TmdbSearchResponse = response.json().await?;
        Ok(search.results)
    }

    async fn find_trailer(&self, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}/videos", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let response = ensure_success(self.name(), response).await?;
        let videos: TmdbVideosResponse = response.json().await?;
        Ok(pick_trailer(&videos.results))
    }

    fn poster_url(&self, poster_path: Option<&str>) -> Option<String> {
        poster_path
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}", self.image_base, p.trim_start_matches('/')))
    }

    fn to_details(&self, movie: TmdbMovie, trailer_url: Option<String>) -> MovieDetails {
        MovieDetails::from_parts(
            self.poster_url(movie.poster_path.as_deref()),
            movie.overview,
            movie.release_date,
            movie.vote_average.map(|v| format!("{:.1}", v)),
            trailer_url,
        )
    }
}

/// First YouTube video of type "Trailer", as a watch URL
fn pick_trailer(videos: &[TmdbVideo]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.site == TRAILER_SITE && v.video_type == TRAILER_TYPE)
        .map(|v| format!("{}{}", YOUTUBE_WATCH_URL, v.key))
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn lookup(&self, query: &str) -> AppResult<Option<MovieDetails>> {
        let Some(movie) = self.search(query).await?.into_iter().next() else {
            return Ok(None);
        };

        let trailer_url = match self.find_trailer(movie.id).await {
            Ok(trailer) => trailer,
            Err(e) => {
                tracing::warn!(movie_id = movie.id, error = %e, "Trailer lookup failed");
                None
            }
        };

        tracing::info!(
            query = %query,
            movie_id = movie.id,
            has_trailer = trailer_url.is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(Some(self.to_details(movie, trailer_url)))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
