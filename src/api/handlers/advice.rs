/// Photo + questionnaire recommendation handler
use axum::extract::Multipart;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::types::AdviceResponse;
use crate::api::types::ApiError;
use crate::models::ImageInput;
use crate::models::QuizProfile;

/// Multipart field carrying the optional image
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying the questionnaire answers as JSON
pub const QUIZ_FIELD: &str = "quiz_data_json";

/// `POST /analyze_and_recommend`
pub async fn analyze_and_recommend(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AdviceResponse>, ApiError> {
    let mut image: Option<ImageInput> = None;
    let mut quiz_json: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
                // Browsers send an empty part when no file was picked.
                if !bytes.is_empty() {
                    image = Some(ImageInput::new(bytes.to_vec(), filename));
                }
            }
            Some(QUIZ_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read quiz data: {e}")))?;
                quiz_json = Some(text);
            }
            _ => {}
        }
    }

    let quiz_json = quiz_json
        .ok_or_else(|| ApiError::bad_request(format!("Missing {QUIZ_FIELD} field")))?;
    let quiz: QuizProfile = serde_json::from_str(&quiz_json)
        .map_err(|_| ApiError::bad_request("Invalid JSON for quiz data"))?;

    info!(
        "POST /analyze_and_recommend (image: {})",
        image.as_ref().map_or(0, |i| i.bytes.len())
    );

    let outcome = state.advisor.analyze_and_recommend(quiz, image).await?;
    Ok(Json(AdviceResponse {
        user_id: outcome.user_id,
        image_analysis: outcome.profile.image_analysis,
        quiz_data: outcome.profile.quiz,
        recommendation: outcome.profile.recommendation,
    }))
}
