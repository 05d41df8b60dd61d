use std::str::FromStr;
use std::time::Duration;

use crate::coach::GenerationOptions;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProviderKind {
    Ollama,
    ChatGpt,
    Offline,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "chatgpt" | "openai" => Ok(ProviderKind::ChatGpt),
            "offline" => Ok(ProviderKind::Offline),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Unknown provider {0:?}, expected ollama, chatgpt or offline")]
    UnknownProvider(String),
    #[error("Invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub provider: ProviderKind,
    pub ollama_host: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub chatgpt_api_key: Option<String>,
}

const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "deepseek-r1:8b";
const DEFAULT_CHATGPT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_TIMEOUT_SECS: u64 = 45;

impl Config {
    /// Reads the settings from the process environment (and `.env`, once
    /// loaded by the caller):
    ///
    /// * `B1_PROVIDER` - `ollama` (default), `chatgpt` or `offline`
    /// * `OLLAMA_HOST` - defaults to `http://localhost:11434`
    /// * `B1_MODEL` - defaults to `deepseek-r1:8b`, or `gpt-3.5-turbo` for chatgpt
    /// * `B1_TEMPERATURE` - defaults to 0.3
    /// * `B1_TIMEOUT_SECS` - bound on a single provider call, defaults to 45
    /// * `CHATGPT_API_KEY` - required for the chatgpt provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let provider = match lookup("B1_PROVIDER") {
            Some(value) => value.parse()?,
            None => ProviderKind::Ollama,
        };

        let model = lookup("B1_MODEL").unwrap_or_else(|| {
            match provider {
                ProviderKind::ChatGpt => DEFAULT_CHATGPT_MODEL,
                _ => DEFAULT_OLLAMA_MODEL,
            }
            .to_string()
        });

        let temperature = match lookup("B1_TEMPERATURE") {
            Some(value) => value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or(ConfigError::InvalidValue {
                    var: "B1_TEMPERATURE",
                    value,
                })?,
            None => DEFAULT_TEMPERATURE,
        };

        let timeout_secs = match lookup("B1_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "B1_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let chatgpt_api_key = lookup("CHATGPT_API_KEY");
        if provider == ProviderKind::ChatGpt && chatgpt_api_key.is_none() {
            return Err(ConfigError::MissingVar("CHATGPT_API_KEY"));
        }

        Ok(Self {
            provider,
            ollama_host: lookup("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
            model,
            temperature,
            timeout: Duration::from_secs(timeout_secs),
            chatgpt_api_key,
        })
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}
