/// Follow-up chat handler
use axum::extract::State;
use axum::Form;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::types::ApiError;
use crate::api::types::ChatRequest;
use crate::api::types::ChatResponse;

/// `POST /chat` (form-encoded `user_id`, `message`)
pub async fn chat(
    State(state): State<AppState>,
    Form(req): Form<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!("POST /chat for {}", req.user_id);

    let response = state.advisor.chat(&req.user_id, &req.message).await?;
    Ok(Json(ChatResponse { response }))
}
