use llm::LLMError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The picture was missing where one is required, or could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),
    /// The historical farm table could not be obtained.
    #[error("historical data unavailable: {0}")]
    DataUnavailable(String),
    #[error("question text is empty")]
    EmptyQuery,
    #[error(transparent)]
    ModelGateway(#[from] LLMError),
}

impl From<vision::VisionError> for AdvisorError {
    fn from(e: vision::VisionError) -> Self {
        AdvisorError::InvalidImage(e.to_string())
    }
}

impl AdvisorError {
    /// Whether the caller sent something unusable, as opposed to an upstream
    /// or data-source failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AdvisorError::InvalidImage(_) | AdvisorError::EmptyQuery)
    }
}
