/// Profile-related API handlers
use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::types::ApiError;
use crate::api::types::ProfileListResponse;
use crate::models::UserProfile;

/// `GET /profiles/:user_id`
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    info!("GET /profiles/{}", user_id);
    Ok(Json(state.advisor.get_profile(&user_id).await?))
}

/// `GET /profiles`
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<ProfileListResponse>, ApiError> {
    info!("GET /profiles");
    Ok(Json(ProfileListResponse {
        user_ids: state.advisor.list_profiles().await?,
    }))
}
