pub mod breeds;
pub mod favourites;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod voting;

pub use routes::create_router;

use axum::{http::StatusCode, Json};
use catwalk_core::ApiError;
use serde::Serialize;
use tracing::{error, warn};

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map an orchestration error to a status code and JSON body.
///
/// Upstream failures surface as 502 so callers can tell a broken
/// upstream apart from a bug in this service.
pub(crate) fn error_response(err: ApiError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::Unreachable(_) | ApiError::Upstream { .. } | ApiError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
        ApiError::TaskAborted => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!(%err, "request failed");
    } else {
        warn!(%err, "request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
