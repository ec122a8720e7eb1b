use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use super::ApiError;
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct DescriptionRequest {
    #[serde(default)]
    pub transcription: String,
}

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub question: String,
}

#[tracing::instrument(skip_all)]
pub async fn describe_handler(
    State(state): State<AppState>,
    payload: Result<Json<DescriptionRequest>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    tracing::debug!(
        transcription = %sanitize_for_log(&request.transcription),
        "Generating transcript description"
    );

    let description = state
        .transcript_assistant
        .describe(&request.transcription)
        .await?;
    Ok(description)
}

#[tracing::instrument(skip_all)]
pub async fn ask_handler(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    tracing::debug!(
        question = %sanitize_for_log(&request.question),
        "Answering question from transcript"
    );

    let answer = state
        .transcript_assistant
        .ask(&request.transcription, &request.question)
        .await?;
    Ok(answer)
}
