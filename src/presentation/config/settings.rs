use std::time::Duration;

use config::Environment as EnvironmentSource;
use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::DEFAULT_POLL_INTERVAL;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub llm: LlmSettings,
    pub polling: PollingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub language_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    pub interval_ms: u64,
    pub timeout_secs: Option<u64>,
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{env}` (optional) and `APP_*`
    /// variables, e.g. `APP_TRANSCRIPTION__API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("transcription.language_code", "pt")?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.chat_model", "gpt-4-turbo")?
            .set_default("llm.max_tokens", 1024)?
            .set_default("llm.temperature", 0.0)?
            .set_default("polling.interval_ms", DEFAULT_POLL_INTERVAL.as_millis() as u64)?
            .set_default("logging.level", "info,transcript_gateway=debug,tower_http=debug")?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.polling.interval_ms == 0 {
            return Err(ConfigError::Message(
                "polling.interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.polling.timeout_secs == Some(0) {
            return Err(ConfigError::Message(
                "polling.timeout_secs must be greater than zero when set".to_string(),
            ));
        }
        Ok(self)
    }
}
