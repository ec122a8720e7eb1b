mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    LlmSettings, LoggingSettings, PollingSettings, ServerSettings, Settings,
    TranscriptionSettings,
};
