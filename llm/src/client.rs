//! HTTP client for the Gemini `generateContent` API.
//!
//! [`GeminiClient`] implements [`ModelGateway`]. It sends one non-streaming
//! request per prompt and returns the first candidate's text untouched.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::GeminiConfig;
use crate::prompt::Prompt;
use crate::traits::{LLMError, ModelGateway};
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Finish reasons meaning the candidate was withheld by content policy.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
];

pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
    persona: String,
}

impl GeminiClient {
    /// Create a client that applies `persona` as the system instruction of
    /// every request.
    pub fn new(config: GeminiConfig, persona: impl Into<String>) -> Result<Self, LLMError> {
        if config.api_key.trim().is_empty() {
            return Err(LLMError::Config("missing Gemini API key".into()));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            config,
            persona: persona.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String, LLMError> {
        let body = GenerateContentRequest::new(&self.persona, prompt);
        let start = Instant::now();
        debug!(model = %self.config.model, modality = prompt.modality(), "sending generateContent");
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let err = match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(env) => LLMError::Status {
                    code: status.as_u16(),
                    status: env.error.status,
                    message: env.error.message,
                },
                Err(_) => LLMError::Status {
                    code: status.as_u16(),
                    status: status.canonical_reason().unwrap_or_default().to_string(),
                    message: text,
                },
            };
            warn!(%err, "generateContent failed");
            return Err(err);
        }

        let reply: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;
        if let Some(reason) = reply
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(LLMError::Blocked(format!("prompt blocked: {reason}")));
        }
        match reply.text() {
            Some(text) => {
                info!(elapsed = ?start.elapsed(), chars = text.len(), "generateContent replied");
                Ok(text)
            }
            None => {
                let reason = reply
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                    .unwrap_or("none");
                if BLOCKING_FINISH_REASONS.contains(&reason) {
                    Err(LLMError::Blocked(format!("candidate blocked: {reason}")))
                } else {
                    Err(LLMError::InvalidResponse(format!(
                        "reply contained no text (finish reason: {reason})"
                    )))
                }
            }
        }
    }
}
