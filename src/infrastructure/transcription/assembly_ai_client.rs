use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Body, Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioStream, ProviderError, TranscriptionProvider};
use crate::domain::{JobId, Transcript, TranscriptRequest, UploadUrl};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// AssemblyAI-style transcription API: `/upload`, `/transcript` and `/transcript/{id}`.
pub struct AssemblyAiClient {
    client: Client,
    endpoint: Option<Endpoint>,
}

struct Endpoint {
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct SubmitTranscriptBody<'a> {
    audio_url: &'a str,
    language_code: &'a str,
}

#[derive(Deserialize)]
struct SubmitTranscriptResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptBody {
    id: String,
    status: Option<String>,
    text: Option<String>,
    language_code: Option<String>,
    error: Option<String>,
}

impl TryFrom<TranscriptBody> for Transcript {
    type Error = ProviderError;

    fn try_from(body: TranscriptBody) -> Result<Self, Self::Error> {
        let id = JobId::parse(body.id)
            .ok_or_else(|| ProviderError::MalformedResponse("transcript id is empty".to_string()))?;
        Ok(Transcript {
            id,
            status: body.status,
            text: body.text,
            language_code: body.language_code,
            error: body.error,
        })
    }
}

impl AssemblyAiClient {
    /// Without both a base URL and an API key every call fails with
    /// [`ProviderError::Unavailable`] and nothing is sent.
    pub fn new(client: Client, base_url: Option<String>, api_key: Option<String>) -> Self {
        let endpoint = match (base_url, api_key) {
            (Some(base_url), Some(api_key))
                if !base_url.trim().is_empty() && !api_key.trim().is_empty() =>
            {
                Some(Endpoint {
                    base_url: base_url.trim_end_matches('/').to_string(),
                    api_key,
                })
            }
            _ => None,
        };
        Self { client, endpoint }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    fn endpoint(&self) -> Result<&Endpoint, ProviderError> {
        self.endpoint.as_ref().ok_or_else(|| {
            ProviderError::Unavailable("transcription provider is not configured".to_string())
        })
    }
}

#[async_trait]
impl TranscriptionProvider for AssemblyAiClient {
    async fn upload(&self, audio: AudioStream) -> Result<UploadUrl, ProviderError> {
        let endpoint = self.endpoint()?;

        let response = self
            .client
            .post(format!("{}/upload", endpoint.base_url))
            .header(AUTHORIZATION, &endpoint.api_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(Body::wrap_stream(audio))
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("upload request: {}", e)))?;

        let body: UploadResponse = decode(ensure_success(response).await?).await?;
        let upload_url = body
            .upload_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("upload response has no upload_url".to_string())
            })?;

        tracing::info!("Audio uploaded to transcription provider");
        Ok(UploadUrl::new(upload_url))
    }

    async fn submit(&self, request: &TranscriptRequest) -> Result<JobId, ProviderError> {
        let endpoint = self.endpoint()?;

        let response = self
            .client
            .post(format!("{}/transcript", endpoint.base_url))
            .header(AUTHORIZATION, &endpoint.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&SubmitTranscriptBody {
                audio_url: &request.audio_url,
                language_code: &request.language_code,
            })
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("submit request: {}", e)))?;

        let body: SubmitTranscriptResponse = decode(ensure_success(response).await?).await?;
        body.id.and_then(JobId::parse).ok_or_else(|| {
            ProviderError::MalformedResponse("submit response has no transcript id".to_string())
        })
    }

    async fn fetch_status(&self, job_id: &JobId) -> Result<Transcript, ProviderError> {
        let endpoint = self.endpoint()?;

        let response = self
            .client
            .get(format!("{}/transcript/{}", endpoint.base_url, job_id))
            .header(AUTHORIZATION, &endpoint.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("status request: {}", e)))?;

        let body: TranscriptBody = decode(ensure_success(response).await?).await?;
        Transcript::try_from(body)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ProviderError::Unavailable(format!(
        "status {}: {}",
        status, body
    )))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ProviderError::Unavailable(format!("body: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}
