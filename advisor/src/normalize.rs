//! Validation and conversion of raw request fields.

use tracing::debug;
use vision::Raster;

use crate::error::AdvisorError;
use crate::task::{Coordinate, TaskKind, TaskRequest};
use crate::templates::{DEFAULT_LANGUAGE, DEFAULT_SCHEME_QUERY};

/// A request whose fields are ready for the templates.
#[derive(Clone, Debug)]
pub enum Normalized {
    Voice {
        user_text: String,
        language: String,
    },
    Disease {
        image: Raster,
    },
    Soil {
        lat: Coordinate,
        lng: Coordinate,
        image: Option<Raster>,
    },
    Schemes {
        query: String,
    },
    Yield {
        table: String,
    },
}

impl Normalized {
    pub fn kind(&self) -> TaskKind {
        match self {
            Normalized::Voice { .. } => TaskKind::VoiceQuery,
            Normalized::Disease { .. } => TaskKind::DiseaseDiagnosis,
            Normalized::Soil { .. } => TaskKind::SoilMatch,
            Normalized::Schemes { .. } => TaskKind::SchemeLookup,
            Normalized::Yield { .. } => TaskKind::YieldPrediction,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Decode an optional base64 picture. `None` and blank payloads mean "no image".
pub fn decode_optional_image(payload: Option<&str>) -> Result<Option<Raster>, AdvisorError> {
    match payload.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => Ok(Some(vision::decode_base64(p)?)),
        None => Ok(None),
    }
}

/// Decode a picture that must be present.
pub fn decode_required_image(payload: Option<&str>) -> Result<Raster, AdvisorError> {
    decode_optional_image(payload)?
        .ok_or_else(|| AdvisorError::InvalidImage("no image provided".into()))
}

/// Pass a serialized history table through, failing when it is missing.
pub fn require_table(table: Option<String>) -> Result<String, AdvisorError> {
    non_blank(table).ok_or_else(|| {
        AdvisorError::DataUnavailable("no historical farm data supplied".into())
    })
}

/// Validate `request` and convert its raw fields.
pub fn normalize(request: TaskRequest) -> Result<Normalized, AdvisorError> {
    let normalized = match request {
        TaskRequest::VoiceQuery {
            user_text,
            language,
        } => {
            if user_text.trim().is_empty() {
                return Err(AdvisorError::EmptyQuery);
            }
            Normalized::Voice {
                user_text,
                language: non_blank(language).unwrap_or_else(|| DEFAULT_LANGUAGE.into()),
            }
        }
        TaskRequest::DiseaseDiagnosis { image } => Normalized::Disease {
            image: decode_required_image(image.as_deref())?,
        },
        TaskRequest::SoilMatch { lat, lng, image } => Normalized::Soil {
            lat,
            lng,
            image: decode_optional_image(image.as_deref())?,
        },
        TaskRequest::SchemeLookup { query } => Normalized::Schemes {
            query: non_blank(query).unwrap_or_else(|| DEFAULT_SCHEME_QUERY.into()),
        },
        TaskRequest::YieldPrediction { historical_data } => Normalized::Yield {
            table: require_table(historical_data)?,
        },
    };
    debug!(kind = %normalized.kind(), "request normalized");
    Ok(normalized)
}
