use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{CatalogResponse, RecommendationQuery, RecommendationResponse};
use crate::services::recommendations::{clamp_count, random_title, resolve};

use super::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

// Handlers

/// Single-page UI
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Titles for the movie selector
pub async fn list_movies(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        titles: state.inner.catalog.titles().to_vec(),
    })
}

/// Recommendations for the selected movie
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let requested = params.requested_count();
    let title = params
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Please select a movie first".to_string()))?;

    let count = clamp_count(requested, state.inner.max_recommendations);
    recommend_for(&state, &request_id, title, count).await
}

/// Recommendations for a movie drawn at random from the catalog
pub async fn recommend_random(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = random_title(&state.inner.catalog, &mut rand::thread_rng())
        .map(str::to_string)
        .ok_or_else(|| AppError::NotFound("The movie catalog is empty".to_string()))?;

    let count = clamp_count(params.requested_count(), state.inner.max_recommendations);
    recommend_for(&state, &request_id, title, count).await
}

async fn recommend_for(
    state: &AppState,
    request_id: &RequestId,
    title: String,
    count: usize,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        title = %title,
        count = count,
        "Processing recommendation request"
    );

    let similar = resolve(&state.inner.recommendations, &title, count);
    if similar.is_empty() {
        tracing::info!(request_id = %request_id, title = %title, "No recommendations found");
        return Err(AppError::NotFound(format!(
            "No recommendations found for '{}'",
            title
        )));
    }

    let recommendations = state.inner.enricher.enrich_all(similar).await;

    tracing::info!(
        request_id = %request_id,
        returned = recommendations.len(),
        "Recommendations enriched"
    );

    Ok(Json(RecommendationResponse {
        source: title,
        recommendations,
    }))
}
