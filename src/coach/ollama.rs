use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::{GenerationOptions, ProviderFailure, TextGenerator};

/// Talks to a local Ollama server through `POST /api/generate`.
pub struct OllamaGenerator {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Serialize)]
struct SamplingOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    error: Option<String>,
}

impl OllamaGenerator {
    pub fn new(host: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/generate", host.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderFailure> {
        let body = GenerateRequest {
            model: &options.model,
            prompt,
            stream: false,
            options: SamplingOptions {
                temperature: options.temperature,
            },
        };

        debug!("Sending prompt to {} ({})", self.endpoint, options.model);
        let reply = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = reply.status();
        let bytes = reply.bytes().await?;
        let parsed = serde_json::from_slice::<GenerateResponse>(&bytes);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| status.to_string());
            return Err(ProviderFailure::Error(message));
        }

        let parsed =
            parsed.map_err(|e| ProviderFailure::Error(format!("malformed reply: {e}")))?;
        match (parsed.response, parsed.error) {
            (_, Some(error)) => Err(ProviderFailure::Error(error)),
            (Some(text), None) => Ok(text),
            (None, None) => Err(ProviderFailure::Error(
                "reply carries no `response` field".to_string(),
            )),
        }
    }
}
