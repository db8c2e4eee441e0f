//! Routing of normalized requests to the model gateway.

use llm::{ModelGateway, Prompt};
use std::time::Instant;
use tracing::{error, info};

use crate::error::AdvisorError;
use crate::history::HistorySource;
use crate::normalize::{self, Normalized};
use crate::task::{Coordinate, TaskRequest};
use crate::templates;

/// Build the prompt for a normalized request.
///
/// The variant depends only on whether a picture is present.
pub fn route(request: Normalized) -> Prompt {
    let (instruction, image) = match request {
        Normalized::Voice {
            user_text,
            language,
        } => (templates::render_voice(&user_text, &language), None),
        Normalized::Disease { image } => (templates::render_disease(), Some(image)),
        Normalized::Soil { lat, lng, image } => (
            templates::render_soil_match(&lat, &lng, image.is_some()),
            image,
        ),
        Normalized::Schemes { query } => (templates::render_schemes(&query), None),
        Normalized::Yield { table } => (templates::render_yield_prediction(&table), None),
    };
    match image {
        Some(image) => Prompt::TextPlusImage(instruction, image),
        None => Prompt::Text(instruction),
    }
}

/// Farmer-facing assistant: one gateway call per request, reply passed
/// through untouched.
pub struct Advisor {
    gateway: Box<dyn ModelGateway>,
}

impl Advisor {
    /// Take ownership of a configured gateway. The persona is whatever the
    /// gateway was built with.
    pub fn new(gateway: Box<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Normalize, render, route and send `request`.
    pub async fn dispatch(&self, request: TaskRequest) -> Result<String, AdvisorError> {
        let kind = request.kind();
        let prompt = route(normalize::normalize(request)?);
        let start = Instant::now();
        info!(%kind, modality = prompt.modality(), "dispatching");
        match self.gateway.generate(&prompt).await {
            Ok(reply) => {
                info!(%kind, elapsed = ?start.elapsed(), "reply received");
                Ok(reply)
            }
            Err(e) => {
                error!(%kind, error = %e, "model gateway failed");
                Err(e.into())
            }
        }
    }

    pub async fn answer_voice_query(
        &self,
        user_text: &str,
        language: Option<&str>,
    ) -> Result<String, AdvisorError> {
        self.dispatch(TaskRequest::VoiceQuery {
            user_text: user_text.to_string(),
            language: language.map(str::to_string),
        })
        .await
    }

    pub async fn diagnose_disease(&self, image: Option<&str>) -> Result<String, AdvisorError> {
        self.dispatch(TaskRequest::DiseaseDiagnosis {
            image: image.map(str::to_string),
        })
        .await
    }

    pub async fn match_soil_and_crops(
        &self,
        lat: impl Into<Coordinate>,
        lng: impl Into<Coordinate>,
        image: Option<&str>,
    ) -> Result<String, AdvisorError> {
        self.dispatch(TaskRequest::SoilMatch {
            lat: lat.into(),
            lng: lng.into(),
            image: image.map(str::to_string),
        })
        .await
    }

    pub async fn lookup_schemes(&self, query: Option<&str>) -> Result<String, AdvisorError> {
        self.dispatch(TaskRequest::SchemeLookup {
            query: query.map(str::to_string),
        })
        .await
    }

    pub async fn predict_yield(
        &self,
        historical_data: Option<&str>,
    ) -> Result<String, AdvisorError> {
        self.dispatch(TaskRequest::YieldPrediction {
            historical_data: historical_data.map(str::to_string),
        })
        .await
    }

    /// Load the table from `source` and predict from it.
    pub async fn predict_yield_from(
        &self,
        source: &dyn HistorySource,
    ) -> Result<String, AdvisorError> {
        let table = source.load().await?;
        self.predict_yield(Some(&table)).await
    }
}
