//! Breed search endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Form, Json};
use catwalk_core::{Breed, BreedProfile};
use serde::Deserialize;

use super::{error_response, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BreedForm {
    #[serde(default)]
    pub breed_id: String,
}

/// GET /api/v1/breed-search
///
/// The full upstream breed catalog, used to populate the search box.
pub async fn list_breeds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Breed>>, (StatusCode, Json<ErrorResponse>)> {
    state
        .breeds()
        .list_breeds()
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/v1/breed-search
///
/// Breed details joined with sample images for the selected breed.
pub async fn breed_profile(
    State(state): State<Arc<AppState>>,
    Form(form): Form<BreedForm>,
) -> Result<Json<BreedProfile>, (StatusCode, Json<ErrorResponse>)> {
    state
        .breeds()
        .breed_profile(&form.breed_id)
        .await
        .map(Json)
        .map_err(error_response)
}
