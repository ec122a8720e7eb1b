use std::io;
use std::sync::Arc;

use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

use super::{JobPoller, PollError};
use crate::application::ports::{ProviderError, TranscriptionProvider};
use crate::domain::{Transcript, TranscriptRequest, UploadUrl};

/// Upload, submit and wait orchestration for audio transcription.
pub struct TranscriptionService {
    provider: Arc<dyn TranscriptionProvider>,
    poller: JobPoller,
    language_code: String,
}

impl TranscriptionService {
    pub fn new(
        provider: Arc<dyn TranscriptionProvider>,
        poller: JobPoller,
        language_code: String,
    ) -> Self {
        Self {
            provider,
            poller,
            language_code,
        }
    }

    /// Streams a local audio file to the provider. The file is opened before any
    /// request goes out, so an unreadable path never reaches the network.
    pub async fn upload_file(&self, file_path: &str) -> Result<UploadUrl, TranscriptionError> {
        if file_path.trim().is_empty() {
            return Err(TranscriptionError::InvalidInput(
                "filePath is required".to_string(),
            ));
        }

        let not_found = |source: io::Error| TranscriptionError::ResourceNotFound {
            path: file_path.to_string(),
            source,
        };

        let file = tokio::fs::File::open(file_path).await.map_err(not_found)?;
        let metadata = file.metadata().await.map_err(not_found)?;
        if !metadata.is_file() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        tracing::info!(bytes = metadata.len(), "Uploading audio file");

        let url = self.provider.upload(Box::pin(ReaderStream::new(file))).await?;
        Ok(url)
    }

    pub async fn transcribe(
        &self,
        audio_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Transcript, TranscriptionError> {
        if audio_url.trim().is_empty() {
            return Err(TranscriptionError::InvalidInput(
                "audioUrl is required".to_string(),
            ));
        }

        let request = TranscriptRequest {
            audio_url: audio_url.to_string(),
            language_code: self.language_code.clone(),
        };

        let job_id = self.provider.submit(&request).await?;
        tracing::info!(job_id = %job_id, "Transcription job submitted");

        let transcript = self.poller.wait_for(&job_id, cancel).await?;
        Ok(transcript)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("cannot read {path}: {source}")]
    ResourceNotFound {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Poll(#[from] PollError),
}
