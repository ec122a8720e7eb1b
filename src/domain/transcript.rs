use super::JobId;

/// Snapshot of a remote transcription job as last reported by the provider.
///
/// Optional fields stay `None` when the provider omits them or sends `null`;
/// they are never defaulted to empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub id: JobId,
    pub status: Option<String>,
    pub text: Option<String>,
    pub language_code: Option<String>,
    pub error: Option<String>,
}

/// Input for a new transcription job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRequest {
    pub audio_url: String,
    pub language_code: String,
}
