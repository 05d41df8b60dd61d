use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Sampling settings sent along with every prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection refused, timed out or otherwise unreachable.
    ProviderUnavailable,
    /// Reachable, but answered with an error or a payload we cannot read.
    ProviderError,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderFailure {
    #[error("text generation provider is unavailable: {0}")]
    Unavailable(String),
    #[error("text generation provider failed: {0}")]
    Error(String),
}

impl ProviderFailure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderFailure::Unavailable(_) => ErrorKind::ProviderUnavailable,
            ProviderFailure::Error(_) => ErrorKind::ProviderError,
        }
    }
}

impl From<reqwest::Error> for ProviderFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_status() {
            ProviderFailure::Error(err.to_string())
        } else {
            ProviderFailure::Unavailable(err.to_string())
        }
    }
}

/// Anything that can turn a prompt into text. Implementations do a single
/// attempt; timeouts and retries are the caller's business.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderFailure>;
}
