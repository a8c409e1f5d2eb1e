//! REST API handlers for the growth dashboard
//!
//! These handlers use the shared GrowthService.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::service::{DatasetSummary, GrowthDashboard, GrowthService};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize)]
pub struct GrowthQuery {
    pub date: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = Arc<GrowthService>;

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/dataset
pub async fn get_dataset(State(service): State<AppState>) -> Json<DatasetSummary> {
    Json(service.dataset_summary().await)
}

/// GET /api/v1/growth?date=YYYY-MM-DD
pub async fn get_growth(
    State(service): State<AppState>,
    Query(params): Query<GrowthQuery>,
) -> Result<Json<GrowthDashboard>, ApiError> {
    let date = match params.date.as_deref() {
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            error(
                StatusCode::BAD_REQUEST,
                format!("Invalid date '{}'. Expected YYYY-MM-DD.", raw),
            )
        })?),
        None => None,
    };

    match service.dashboard(date).await {
        Some(dashboard) => Ok(Json(dashboard)),
        None => Err(error(StatusCode::NOT_FOUND, "Dataset is empty; no default reference date")),
    }
}

/// GET /api/v1/geography
pub async fn get_geography(State(service): State<AppState>) -> Json<serde_json::Value> {
    Json(service.geography().as_json().clone())
}

/// POST /api/v1/dataset/reload
pub async fn reload_dataset(
    State(service): State<AppState>,
) -> Result<Json<DatasetSummary>, ApiError> {
    match service.reload().await {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            tracing::error!("Dataset reload failed: {:#}", e);
            Err(error(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)))
        }
    }
}
