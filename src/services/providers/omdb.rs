//! OMDb provider
//!
//! Secondary metadata source, queried by exact title (`/?t=`). Responses are a
//! flat object whose `Response` flag says whether anything matched; missing
//! values come back as the literal string "N/A". OMDb has no trailer data.
use crate::{
    error::AppResult,
    models::{MovieDetails, OmdbMovie},
    services::providers::{ensure_success, MetadataProvider},
};
use reqwest::Client as HttpClient;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }
}

fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| v.trim() != NOT_AVAILABLE)
}

fn to_details(movie: OmdbMovie) -> Option<MovieDetails> {
    if !movie.is_found() {
        return None;
    }

    Some(MovieDetails::from_parts(
        available(movie.poster),
        available(movie.plot),
        available(movie.year),
        available(movie.imdb_rating),
        None,
    ))
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn lookup(&self, query: &str) -> AppResult<Option<MovieDetails>> {
        let url = format!("{}/", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("t", query)])
            .send()
            .await?;

        let response = ensure_success(self.name(), response).await?;
        let movie: OmdbMovie = response.json().await?;
        let details = to_details(movie);

        tracing::info!(
            query = %query,
            found = details.is_some(),
            provider = "omdb",
            "Movie details fetched"
        );

        Ok(details)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::{NO_OVERVIEW, PLACEHOLDER_POSTER, UNKNOWN};

    fn parse(json: &str) -> OmdbMovie {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_to_details_found() {
        let movie = parse(
            r#"{
                "Title": "Memento",
                "Year": "2000",
                "Plot": "A man with short-term memory loss...",
                "Poster": "https://m.media-amazon.com/images/M/memento.jpg",
                "imdbRating": "8.4",
                "Response": "True"
            }"#,
        );

        let details = to_details(movie).unwrap();
        assert_eq!(details.poster_url, "https://m.media-amazon.com/images/M/memento.jpg");
        assert_eq!(details.overview, "A man with short-term memory loss...");
        assert_eq!(details.release_date, "2000");
        assert_eq!(details.rating, "8.4");
        assert_eq!(details.trailer_url, None);
    }

    #[test]
    fn test_to_details_not_available_fields() {
        let movie = parse(
            r#"{"Year": "1999", "Plot": "N/A", "Poster": "N/A", "imdbRating": "N/A", "Response": "True"}"#,
        );

        let details = to_details(movie).unwrap();
        assert_eq!(details.poster_url, PLACEHOLDER_POSTER);
        assert_eq!(details.overview, NO_OVERVIEW);
        assert_eq!(details.release_date, "1999");
        assert_eq!(details.rating, UNKNOWN);
    }

    #[test]
    fn test_to_details_negative_response() {
        let movie = parse(r#"{"Response": "False", "Error": "Movie not found!"}"#);
        assert_eq!(to_details(movie), None);
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let provider = OmdbProvider::new(
            reqwest::Client::new(),
            "key".to_string(),
            "https://www.omdbapi.com/".to_string(),
        );
        assert_eq!(provider.api_url, "https://www.omdbapi.com");
        assert_eq!(provider.name(), "omdb");
    }
}
