use std::time::Duration;

use async_trait::async_trait;
use chatgpt::client::ChatGPT;
use chatgpt::config::{ChatGPTEngine, ModelConfiguration};
use chatgpt::err::Error as ChatGptError;
use log::debug;

use super::provider::{GenerationOptions, ProviderFailure, TextGenerator};

/// Hosted alternative to Ollama, for machines without a local model.
pub struct ChatGptGenerator {
    api_key: String,
    timeout: Duration,
}

impl ChatGptGenerator {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self { api_key, timeout }
    }

    /// The client reads its timeout only when it is built, so every setting
    /// goes in up front.
    fn configuration(&self, options: &GenerationOptions) -> ModelConfiguration {
        ModelConfiguration {
            engine: engine_for(&options.model),
            temperature: options.temperature,
            timeout: self.timeout,
            ..Default::default()
        }
    }
}

fn engine_for(model: &str) -> ChatGPTEngine {
    match model {
        "gpt-4" => ChatGPTEngine::Gpt4,
        _ => ChatGPTEngine::Gpt35Turbo,
    }
}

impl From<ChatGptError> for ProviderFailure {
    fn from(err: ChatGptError) -> Self {
        match err {
            ChatGptError::ClientError(err) => err.into(),
            ChatGptError::BackendError { message, error_type } => {
                ProviderFailure::Error(format!("{error_type}: {message}"))
            }
            err @ (ChatGptError::ParsingError(_)
            | ChatGptError::SerdeJsonError(_)
            | ChatGptError::StringError(_)) => ProviderFailure::Error(err.to_string()),
            other => ProviderFailure::Unavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for ChatGptGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderFailure> {
        let gpt = ChatGPT::new_with_config(&self.api_key, self.configuration(options))?;

        debug!("Sending prompt to ChatGPT ({})", options.model);
        let response = gpt.send_message(prompt).await?;

        Ok(response.message().content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::ErrorKind;
    use tokio::net::TcpListener;
    use tokio::time::Instant;

    fn options(model: &str) -> GenerationOptions {
        GenerationOptions {
            model: model.to_string(),
            temperature: 0.3,
        }
    }

    #[test]
    fn unknown_models_fall_back_to_gpt35() {
        assert!(matches!(engine_for("gpt-4"), ChatGPTEngine::Gpt4));
        assert!(matches!(engine_for("deepseek-r1:8b"), ChatGPTEngine::Gpt35Turbo));
    }

    #[test]
    fn configuration_carries_engine_temperature_and_timeout() {
        let generator = ChatGptGenerator::new("sk-test".to_string(), Duration::from_secs(45));
        let config = generator.configuration(&options("gpt-4"));

        assert!(matches!(config.engine, ChatGPTEngine::Gpt4));
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.timeout, Duration::from_secs(45));
    }

    #[test]
    fn backend_errors_are_provider_errors() {
        let failure: ProviderFailure = ChatGptError::BackendError {
            message: "Rate limit reached".to_string(),
            error_type: "requests".to_string(),
        }
        .into();
        assert!(matches!(failure, ProviderFailure::Error(ref m) if m.contains("Rate limit")));
    }

    #[test]
    fn unreadable_replies_are_provider_errors() {
        let json = serde_json::from_str::<serde_json::Value>("{\"choices\":").unwrap_err();
        let utf8 = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();

        let errors = [
            ChatGptError::ParsingError("bad reply".to_string()),
            ChatGptError::SerdeJsonError(json),
            ChatGptError::StringError(utf8),
        ];
        for err in errors {
            let failure = ProviderFailure::from(err);
            assert_eq!(failure.kind(), ErrorKind::ProviderError, "{failure}");
        }
    }

    #[tokio::test]
    async fn refused_connection_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::get(format!("http://{addr}/v1/chat/completions"))
            .await
            .unwrap_err();
        let failure = ProviderFailure::from(ChatGptError::ClientError(err));
        assert_eq!(failure.kind(), ErrorKind::ProviderUnavailable);
    }

    #[tokio::test]
    async fn configured_timeout_bounds_the_client() {
        // Bound but never accepted: the request hangs after connecting.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let generator = ChatGptGenerator::new("sk-test".to_string(), Duration::from_millis(300));
        let mut config = generator.configuration(&options("gpt-3.5-turbo"));
        config.api_url = format!("http://{addr}/v1/chat/completions").parse().unwrap();
        let gpt = ChatGPT::new_with_config("sk-test", config).unwrap();

        let started = Instant::now();
        let err = gpt.send_message("Hallo").await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(ProviderFailure::from(err).kind(), ErrorKind::ProviderUnavailable);
        drop(listener);
    }
}
