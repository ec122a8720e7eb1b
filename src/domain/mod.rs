mod chat_message;
mod job_id;
mod job_status;
mod message_role;
mod transcript;
mod upload_url;

pub use chat_message::ChatMessage;
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use message_role::MessageRole;
pub use transcript::{Transcript, TranscriptRequest};
pub use upload_url::UploadUrl;
