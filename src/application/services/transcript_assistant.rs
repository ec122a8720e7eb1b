use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::ChatMessage;

const DESCRIPTION_PERSONA: &str = "Act as a systems specialist who writes summaries from the \
transcript of a lesson. The summary is educational: it gives context about a lesson that will be \
published on a video platform and explains what the video covers without replaying it step by step.";
const DESCRIPTION_VOICE: &str = "Answer in the first person as if you were the instructor. Keep \
the tone informal. Avoid repeating words; prefer synonyms.";
const DESCRIPTION_FORMAT: &str =
    "Be concise and return at most 80 words of markdown without headings.";

const ANSWER_PERSONA: &str =
    "Act as a systems specialist and answer questions using the transcript.";
const ANSWER_STYLE: &str = "Answer clearly and objectively so the user's problem gets solved.";
const ANSWER_DISCRETION: &str = "Do not mention that this is a video tutorial or that the answers \
come from a transcript. Keep it as natural as possible.";
const ANSWER_ESCALATION: &str =
    "If you are not sure about the answer, say that you will forward the question to a specialist.";

/// Transcript-grounded chat features backed by a single completion call each.
pub struct TranscriptAssistant {
    llm_client: Arc<dyn LlmClient>,
}

impl TranscriptAssistant {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    pub async fn describe(&self, transcription: &str) -> Result<String, AssistantError> {
        require("transcription", transcription)?;
        let messages = description_messages(transcription);
        Ok(self.llm_client.chat(&messages).await?)
    }

    pub async fn ask(&self, transcription: &str, question: &str) -> Result<String, AssistantError> {
        require("transcription", transcription)?;
        require("question", question)?;
        let messages = question_messages(transcription, question);
        Ok(self.llm_client.chat(&messages).await?)
    }
}

pub fn description_messages(transcription: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(DESCRIPTION_PERSONA),
        ChatMessage::system(DESCRIPTION_VOICE),
        ChatMessage::system(DESCRIPTION_FORMAT),
        ChatMessage::user(format!(
            "Summarize the transcript below. Write the summary in the same language as the transcript.\n\n{}",
            transcription
        )),
    ]
}

pub fn question_messages(transcription: &str, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ANSWER_PERSONA),
        ChatMessage::system(ANSWER_STYLE),
        ChatMessage::system(ANSWER_DISCRETION),
        ChatMessage::system(ANSWER_ESCALATION),
        ChatMessage::system(format!(
            "Base your answer carefully on the transcript below.\n\n{}",
            transcription
        )),
        ChatMessage::user(format!(
            "Answer the question below.\n\n{}",
            question
        )),
    ]
}

fn require(field: &str, value: &str) -> Result<(), AssistantError> {
    if value.trim().is_empty() {
        return Err(AssistantError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}
