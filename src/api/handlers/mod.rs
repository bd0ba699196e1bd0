/// API request handlers
use std::sync::Arc;

use axum::Json;

use crate::advisor::HairAdvisor;
use crate::api::types::HealthResponse;

pub mod advice;
pub mod chat;
pub mod profile;

pub use advice::*;
pub use chat::*;
pub use profile::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<HairAdvisor>,
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
