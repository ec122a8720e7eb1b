mod job_poller;
mod transcript_assistant;
mod transcription_service;

pub use job_poller::{DEFAULT_POLL_INTERVAL, JobPoller, PollError};
pub use transcript_assistant::{
    AssistantError, TranscriptAssistant, description_messages, question_messages,
};
pub use transcription_service::{TranscriptionError, TranscriptionService};
