mod assistant;
mod error;
mod health;
mod transcript;

pub use assistant::{AskRequest, DescriptionRequest, ask_handler, describe_handler};
pub use error::{ApiError, ErrorResponse};
pub use health::health_handler;
pub use transcript::{TranscriptResponse, transcript_handler, upload_handler};
