//! API route definitions

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Largest accepted request body (photo uploads)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create the advisor router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Recommendation and chat
        .route("/analyze_and_recommend", post(handlers::analyze_and_recommend))
        .route("/chat", post(handlers::chat))
        // Stored profiles
        .route("/profiles", get(handlers::list_profiles))
        .route("/profiles/:user_id", get(handlers::get_profile))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
