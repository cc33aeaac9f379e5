//! Voting page endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Form, Json};
use catwalk_core::ImagePayload;
use serde::Deserialize;

use super::{error_response, ErrorResponse};
use crate::state::AppState;

/// Form body of a voting action.
///
/// Both fields default to empty so a bare POST is handled by the
/// orchestrator's own validation rather than a deserialization error.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub image_id: String,
}

/// GET /api/v1/voting
///
/// One random image for the voting page.
pub async fn get_image(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ImagePayload>, (StatusCode, Json<ErrorResponse>)> {
    state
        .voting()
        .random_image()
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/v1/voting
///
/// Record the submitted action and return the next image.
pub async fn post_action(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VoteForm>,
) -> Result<Json<ImagePayload>, (StatusCode, Json<ErrorResponse>)> {
    state
        .voting()
        .submit_action(&form.action, &form.image_id)
        .await
        .map(Json)
        .map_err(error_response)
}
