use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use std::fmt;

/// The five things a farmer can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    VoiceQuery,
    DiseaseDiagnosis,
    SoilMatch,
    SchemeLookup,
    YieldPrediction,
}

impl TaskKind {
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::VoiceQuery => "voice",
            TaskKind::DiseaseDiagnosis => "disease",
            TaskKind::SoilMatch => "soil",
            TaskKind::SchemeLookup => "schemes",
            TaskKind::YieldPrediction => "yield",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A GPS coordinate exactly as the caller supplied it.
///
/// JSON strings are unquoted; any other JSON value keeps its source text,
/// so `12.0` stays `12.0`. No range checks are applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Coordinate {
    Literal(String),
    Text(String),
}

impl Coordinate {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn unknown() -> Self {
        Coordinate::Text(Self::UNKNOWN.into())
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::unknown()
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let token = raw.get().trim();
        if token.starts_with('"') {
            let text: String = serde_json::from_str(token).map_err(serde::de::Error::custom)?;
            Ok(Coordinate::Text(text))
        } else if token == "null" {
            Ok(Coordinate::unknown())
        } else {
            Ok(Coordinate::Literal(token.to_string()))
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Literal(s) | Coordinate::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Coordinate {
    fn from(v: f64) -> Self {
        Coordinate::Literal(format!("{v:?}"))
    }
}

impl From<&str> for Coordinate {
    fn from(s: &str) -> Self {
        Coordinate::Text(s.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(s: String) -> Self {
        Coordinate::Text(s)
    }
}

/// One farmer request with its raw boundary fields.
///
/// Images are base64 text (bare or as a `data:` URL); the historical table
/// is delimited text with a header row.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskRequest {
    VoiceQuery {
        user_text: String,
        language: Option<String>,
    },
    DiseaseDiagnosis {
        image: Option<String>,
    },
    SoilMatch {
        lat: Coordinate,
        lng: Coordinate,
        image: Option<String>,
    },
    SchemeLookup {
        query: Option<String>,
    },
    YieldPrediction {
        historical_data: Option<String>,
    },
}

impl TaskRequest {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskRequest::VoiceQuery { .. } => TaskKind::VoiceQuery,
            TaskRequest::DiseaseDiagnosis { .. } => TaskKind::DiseaseDiagnosis,
            TaskRequest::SoilMatch { .. } => TaskKind::SoilMatch,
            TaskRequest::SchemeLookup { .. } => TaskKind::SchemeLookup,
            TaskRequest::YieldPrediction { .. } => TaskKind::YieldPrediction,
        }
    }
}
