use advisor::{Advisor, AdvisorError, Coordinate, HistorySource};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, FromRequest, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

/// Largest accepted request body; photos arrive base64-encoded.
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<Advisor>,
    pub history: Arc<dyn HistorySource>,
}

impl AppState {
    pub fn new(advisor: Advisor, history: impl HistorySource + 'static) -> Self {
        Self {
            advisor: Arc::new(advisor),
            history: Arc::new(history),
        }
    }
}

#[derive(Deserialize)]
pub struct VoiceRequest {
    #[serde(default)]
    pub text: String,
    pub language: Option<String>,
}

#[derive(Deserialize)]
pub struct DiseaseRequest {
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct SoilRequest {
    pub image: Option<String>,
    pub lat: Option<Coordinate>,
    pub lng: Option<Coordinate>,
}

#[derive(Deserialize)]
pub struct SchemeRequest {
    pub query: Option<String>,
}

/// JSON body extractor whose rejections are reported as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Failure rendered as `{"error": ...}`.
pub enum ApiError {
    Advisor(AdvisorError),
    Body(JsonRejection),
}

impl From<AdvisorError> for ApiError {
    fn from(e: AdvisorError) -> Self {
        ApiError::Advisor(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Body(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Advisor(e) if e.is_client_error() => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Advisor(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Body(e) => (e.status(), e.body_text()),
        };
        warn!(%status, error = %message, "request failed");
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult = Result<Json<serde_json::Value>, ApiError>;

pub async fn voice(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VoiceRequest>,
) -> ApiResult {
    debug!(language = ?req.language, "voice query");
    let reply = state
        .advisor
        .answer_voice_query(&req.text, req.language.as_deref())
        .await?;
    Ok(Json(json!({ "response": reply })))
}

pub async fn disease(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DiseaseRequest>,
) -> ApiResult {
    let message = state.advisor.diagnose_disease(req.image.as_deref()).await?;
    Ok(Json(json!({ "message": message })))
}

pub async fn soil(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SoilRequest>,
) -> ApiResult {
    let analysis = state
        .advisor
        .match_soil_and_crops(
            req.lat.unwrap_or_default(),
            req.lng.unwrap_or_default(),
            req.image.as_deref(),
        )
        .await?;
    Ok(Json(json!({ "analysis": analysis })))
}

pub async fn schemes(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SchemeRequest>,
) -> ApiResult {
    let schemes = state.advisor.lookup_schemes(req.query.as_deref()).await?;
    Ok(Json(json!({ "schemes": schemes })))
}

pub async fn twin(State(state): State<AppState>) -> ApiResult {
    let analysis = state
        .advisor
        .predict_yield_from(state.history.as_ref())
        .await?;
    Ok(Json(json!({ "analysis": analysis })))
}

pub async fn health() -> &'static str {
    "ok"
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/voice", post(voice))
        .route("/api/disease", post(disease))
        .route("/api/soil", post(soil))
        .route("/api/schemes", post(schemes))
        .route("/api/twin", get(twin))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
