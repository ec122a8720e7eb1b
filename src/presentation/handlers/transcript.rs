use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::domain::Transcript;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub file_path: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptQuery {
    pub audio_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub id: String,
    pub status: Option<String>,
    pub text: Option<String>,
    pub language_code: Option<String>,
    pub error: Option<String>,
}

impl From<Transcript> for TranscriptResponse {
    fn from(transcript: Transcript) -> Self {
        Self {
            id: transcript.id.as_str().to_string(),
            status: transcript.status,
            text: transcript.text,
            language_code: transcript.language_code,
            error: transcript.error,
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn upload_handler(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
) -> Result<String, ApiError> {
    let file_path = query.file_path.unwrap_or_default();
    tracing::debug!(file_path = %file_path, "Upload requested");
    let upload_url = state.transcription_service.upload_file(&file_path).await?;
    Ok(upload_url.into_inner())
}

/// Submits the job and holds the request open until the provider reports a terminal state.
#[tracing::instrument(skip_all)]
pub async fn transcript_handler(
    State(state): State<AppState>,
    Query(query): Query<TranscriptQuery>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let audio_url = query.audio_url.unwrap_or_default();
    tracing::debug!(audio_url = %audio_url, "Transcription requested");
    let cancel = state.shutdown.child_token();

    let transcript = state
        .transcription_service
        .transcribe(&audio_url, &cancel)
        .await?;

    Ok(Json(TranscriptResponse::from(transcript)))
}
