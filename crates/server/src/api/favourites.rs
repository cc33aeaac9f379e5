//! Favourites endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use catwalk_core::{FavoriteEntry, FavoriteRecord};

use super::{error_response, ErrorResponse};
use crate::state::AppState;

/// GET /api/v1/favourites
///
/// Favourites recorded upstream for the configured sub id.
pub async fn list_upstream(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FavoriteRecord>>, (StatusCode, Json<ErrorResponse>)> {
    state
        .voting()
        .upstream_favourites()
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/favourites/local
///
/// Favourites recorded in this process since startup.
pub async fn list_local(State(state): State<Arc<AppState>>) -> Json<Vec<FavoriteEntry>> {
    Json(state.favorites().snapshot())
}
