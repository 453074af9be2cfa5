use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{truncate_overview, MovieCard, MovieDetails};

// ============================================================================
// API Types
// ============================================================================

/// Query parameters for the recommendation endpoints
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    pub title: Option<String>,
    /// Kept as text so an out-of-range or malformed value reaches the clamp
    #[serde(default)]
    pub count: Option<String>,
}

impl RecommendationQuery {
    /// Requested count; `None` when missing or not an integer
    pub fn requested_count(&self) -> Option<i64> {
        self.count.as_deref().and_then(|c| c.trim().parse().ok())
    }
}

/// Recommendations for one source movie, in resolver order
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub source: String,
    pub recommendations: Vec<MovieCard>,
}

/// Titles offered by the movie selector
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub titles: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from TMDB `/search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Response from TMDB `/movie/{id}/videos`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideosResponse {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Flat response from OMDb `/?t=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    pub response: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default, rename = "imdbRating")]
    pub imdb_rating: Option<String>,
}

impl OmdbMovie {
    pub fn is_found(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}
