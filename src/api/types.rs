//! API request and response types

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use tracing::error;

use crate::errors::HairAdvisorError;
use crate::models::QuizProfile;
use crate::models::Recommendation;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `POST /analyze_and_recommend` response
#[derive(Debug, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub user_id: String,
    pub image_analysis: String,
    pub quiz_data: QuizProfile,
    pub recommendation: Recommendation,
}

/// `POST /chat` form body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileListResponse {
    pub user_ids: Vec<String>,
}

/// Error body shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error carrying its HTTP status
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<HairAdvisorError> for ApiError {
    fn from(err: HairAdvisorError) -> Self {
        let status = match &err {
            HairAdvisorError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
            HairAdvisorError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            HairAdvisorError::DescriptionUnavailable(_)
            | HairAdvisorError::GenerationUnavailable(_)
            | HairAdvisorError::EmbeddingError(_)
            | HairAdvisorError::HttpError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &err {
            HairAdvisorError::ProfileNotFound(_) => "User profile not found".to_string(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            error!("Request failed: {}", err);
        }
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
