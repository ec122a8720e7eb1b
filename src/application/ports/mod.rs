mod llm_client;
mod provider_error;
mod transcription_provider;

pub use llm_client::{LlmClient, LlmClientError};
pub use provider_error::ProviderError;
pub use transcription_provider::{AudioStream, TranscriptionProvider};
