//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::analysis::{AnalysisOutcome, CycleResult};
use crate::coord::Coordinates;
use crate::energy::Timeframe;
use crate::error::Error;
use crate::geo::{Geocoder, Place};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Create the API router
///
/// Anything outside `/api` is served from the `static` directory, where a
/// map front end can live.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
        .filter(|path| path.exists())
        .unwrap_or_else(|| "static".into());

    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .route("/api/outcome", get(outcome_handler))
        .route("/api/demand", get(demand_handler))
        .route("/api/resolve", get(resolve_handler))
        .route("/api/status", get(status_handler))
        .fallback_service(ServeDir::new(static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "INVALID_COORDINATES" | "INVALID_TIMEFRAME" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" | "NO_DATASET" => StatusCode::NOT_FOUND,
            "GEOCODING_UNAVAILABLE" | "CLIMATE_UNAVAILABLE" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Transport(_) => "GEOCODING_UNAVAILABLE",
            Error::ClimateUnavailable => "CLIMATE_UNAVAILABLE",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError::new(code, err.to_string())
    }
}

/// Analyze request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Run an analysis cycle for a coordinate
///
/// POST /api/analyze
///
/// Returns this cycle's own outcome. `committed` is false when a newer
/// request superseded it before it finished.
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<CycleResult>, ApiError> {
    let at = Coordinates::new(req.lat, req.lng);
    let result = state.session.analyze(at).await?;
    Ok(Json(result))
}

/// Currently committed outcome
///
/// GET /api/outcome
async fn outcome_handler(State(state): State<Arc<AppState>>) -> Json<AnalysisOutcome> {
    Json(state.session.current().await)
}

/// Demand query parameters
#[derive(Debug, Deserialize)]
pub struct DemandParams {
    pub timeframe: Option<String>,
}

/// Demand projection response
#[derive(Debug, Serialize, Deserialize)]
pub struct DemandResponse {
    pub timeframe: Timeframe,
    pub kwh: f64,
}

/// Project demand from the committed dataset
///
/// GET /api/demand?timeframe=weekly
async fn demand_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DemandParams>,
) -> Result<Json<DemandResponse>, ApiError> {
    let timeframe = match params.timeframe {
        Some(name) => Timeframe::from_str(&name).map_err(|e| ApiError::new("INVALID_TIMEFRAME", e))?,
        None => state.config.timeframe()?,
    };

    let kwh = state
        .session
        .project(timeframe)
        .await
        .ok_or_else(|| ApiError::new("NO_DATASET", "No successful analysis to project from"))?;

    Ok(Json(DemandResponse { timeframe, kwh }))
}

/// Resolve query parameters
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub q: String,
}

/// Resolve a place name to a coordinate
///
/// GET /api/resolve?q=Nairobi
async fn resolve_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<Place>, ApiError> {
    let place = state.geocoder.resolve(&params.q).await?;
    Ok(Json(place))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Cycle that owns the committed outcome
    pub cycle: u64,
    pub providers: ProviderUrls,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderUrls {
    pub climate: String,
    pub structures: String,
    pub nominatim: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let providers = &state.config.providers;
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        cycle: state.session.current_cycle().await,
        providers: ProviderUrls {
            climate: providers.climate_url.clone(),
            structures: providers.structures_url.clone(),
            nominatim: providers.nominatim_url.clone(),
        },
    })
}
