use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::retrieval::DEFAULT_CONTEXT_LINES;

#[derive(Clone)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub answer_model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("answer_model", &self.answer_model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub textbook_path: PathBuf,
    pub context_lines: usize,
    pub model: ModelConfig,
    pub discord_webhook_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("TEXTBOOK_BIND").unwrap_or_else(|| {
            let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
            format!("0.0.0.0:{port}")
        });

        Self {
            bind_addr,
            textbook_path: lookup("TEXTBOOK_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./dataset.txt")),
            context_lines: lookup("CONTEXT_LINES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CONTEXT_LINES),
            model: ModelConfig {
                base_url: lookup("OPENROUTER_BASE_URL")
                    .unwrap_or_else(|| "https://openrouter.ai/api/v1".to_string()),
                api_key: lookup("OPENROUTER_API_KEY").unwrap_or_default(),
                answer_model: lookup("ANSWER_MODEL")
                    .unwrap_or_else(|| "xiaomi/mimo-v2-flash:free".to_string()),
                temperature: lookup("ANSWER_TEMPERATURE")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0.2),
                timeout_secs: lookup("MODEL_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            },
            discord_webhook_url: lookup("DISCORD_WEBHOOK_URL").filter(|url| !url.trim().is_empty()),
        }
    }
}
