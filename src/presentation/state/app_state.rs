use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::services::{TranscriptAssistant, TranscriptionService};

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub transcript_assistant: Arc<TranscriptAssistant>,
    /// Cancelled on shutdown; each in-flight poll runs under a child token.
    pub shutdown: CancellationToken,
}
