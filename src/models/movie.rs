use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Poster";
pub const NO_OVERVIEW: &str = "No overview available.";
pub const UNKNOWN: &str = "Unknown";

/// Longest overview shown on a card, in characters
pub const OVERVIEW_MAX_CHARS: usize = 240;

/// Display metadata for a single movie
///
/// Every field except the trailer is always populated; a provider that omits a
/// field gets the same per-field placeholder the total fallback uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub poster_url: String,
    pub overview: String,
    pub release_date: String,
    pub rating: String,
    pub trailer_url: Option<String>,
}

impl MovieDetails {
    /// The value returned when no provider yields data
    pub fn placeholder() -> Self {
        Self {
            poster_url: PLACEHOLDER_POSTER.to_string(),
            overview: NO_OVERVIEW.to_string(),
            release_date: UNKNOWN.to_string(),
            rating: UNKNOWN.to_string(),
            trailer_url: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// Builds details from optional provider fields, filling gaps with placeholders
    pub fn from_parts(
        poster_url: Option<String>,
        overview: Option<String>,
        release_date: Option<String>,
        rating: Option<String>,
        trailer_url: Option<String>,
    ) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            poster_url: present(poster_url).unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
            overview: present(overview).unwrap_or_else(|| NO_OVERVIEW.to_string()),
            release_date: present(release_date).unwrap_or_else(|| UNKNOWN.to_string()),
            rating: present(rating).unwrap_or_else(|| UNKNOWN.to_string()),
            trailer_url: present(trailer_url),
        }
    }
}

/// A recommended movie as rendered by the UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCard {
    pub title: String,
    pub poster_url: String,
    pub release_date: String,
    pub rating: String,
    pub overview: String,
    pub trailer_url: Option<String>,
}

impl MovieCard {
    pub fn new(title: String, details: MovieDetails) -> Self {
        Self {
            title,
            poster_url: details.poster_url,
            release_date: details.release_date,
            rating: details.rating,
            overview: truncate_overview(&details.overview),
            trailer_url: details.trailer_url,
        }
    }
}

/// Cuts an overview to `OVERVIEW_MAX_CHARS` characters, marking the cut with "..."
pub fn truncate_overview(overview: &str) -> String {
    if overview.chars().count() <= OVERVIEW_MAX_CHARS {
        return overview.to_string();
    }

    let keep = OVERVIEW_MAX_CHARS - 3;
    let mut truncated: String = overview.chars().take(keep).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push_str("...");
    truncated
}
