use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Movie catalog CSV (needs a `title` column)
    #[serde(default = "default_movies_csv")]
    pub movies_csv: String,

    /// Precomputed recommendation table CSV
    #[serde(default = "default_recommendations_csv")]
    pub recommendations_csv: String,

    /// TMDB v3 API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with TMDB poster paths
    #[serde(default = "default_tmdb_image_base")]
    pub tmdb_image_base: String,

    /// OMDb API key. The secondary provider is disabled without it.
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Per-request timeout for metadata providers
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Pause after a failed provider request before the next candidate
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Year appended to the last primary-provider search candidate
    #[serde(default = "default_search_year_hint")]
    pub search_year_hint: u16,

    /// Upper bound for the requested recommendation count
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// How many titles are enriched at once per request
    #[serde(default = "default_enrichment_concurrency")]
    pub enrichment_concurrency: usize,

    /// Entry limit for the in-process details cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    /// Redis connection URL. When set, details are cached in Redis instead of in-process.
    #[serde(default)]
    pub redis_url: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_movies_csv() -> String {
    "data/movies_data.csv".to_string()
}

fn default_recommendations_csv() -> String {
    "data/recommendations.csv".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_request_timeout_ms() -> u64 {
    3000
}

fn default_retry_backoff_ms() -> u64 {
    300
}

fn default_search_year_hint() -> u16 {
    2023
}

fn default_max_recommendations() -> usize {
    5
}

fn default_enrichment_concurrency() -> usize {
    4
}

fn default_cache_capacity() -> u64 {
    1000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
