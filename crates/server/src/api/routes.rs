use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::middleware::metrics_middleware;
use super::{breeds, favourites, handlers, voting};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Voting page
        .route("/voting", get(voting::get_image))
        .route("/voting", post(voting::post_action))
        // Breed search
        .route("/breed-search", get(breeds::list_breeds))
        .route("/breed-search", post(breeds::breed_profile))
        // Favourites
        .route("/favourites", get(favourites::list_upstream))
        .route("/favourites/local", get(favourites::list_local))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
