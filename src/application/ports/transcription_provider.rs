use std::io;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use super::ProviderError;
use crate::domain::{JobId, Transcript, TranscriptRequest, UploadUrl};

pub type AudioStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send + Sync + 'static>>;

/// Remote asynchronous transcription API.
///
/// Every call maps to exactly one outbound request and keeps no state between calls.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Streams audio to provider storage and returns a URL usable in [`TranscriptRequest`].
    async fn upload(&self, audio: AudioStream) -> Result<UploadUrl, ProviderError>;

    async fn submit(&self, request: &TranscriptRequest) -> Result<JobId, ProviderError>;

    async fn fetch_status(&self, job_id: &JobId) -> Result<Transcript, ProviderError>;
}
