use async_trait::async_trait;
use thiserror::Error;

use crate::prompt::Prompt;

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned {code} {status}: {message}")]
    Status {
        code: u16,
        status: String,
        message: String,
    },
    #[error("content blocked: {0}")]
    Blocked(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(e: reqwest::Error) -> Self {
        LLMError::Network(e.to_string())
    }
}

/// A generative model that turns a [`Prompt`] into reply text.
///
/// Implementations carry their persona and credentials from construction;
/// callers only hand over the per-request prompt.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, LLMError>;
}
