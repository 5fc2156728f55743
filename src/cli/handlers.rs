// HTTP Handlers Module
// Serves the dashboard page, its JSON data and the card animation stream.

use super::state::AppState;
use crate::{data::DataError, page, CardStream};
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "research-dash"
    }))
}

/// GET / - the full dashboard page
///
/// The page is rendered completely before responding, so a data failure
/// never produces partial output.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let snapshot = state.load_snapshot().map_err(|e| {
        tracing::error!(error = %e, "Dashboard render failed");
        AppError::Data(e)
    })?;

    tracing::info!(
        departments = snapshot.departments.departments.len(),
        cards = snapshot.metrics.len(),
        "Rendering dashboard"
    );

    Ok(Html(page::render_page(&snapshot, state.animation().steps)))
}

/// GET /api/dashboard - computed snapshot as JSON
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let snapshot = state.load_snapshot()?;
    Ok(Json(snapshot).into_response())
}

/// GET /api/charts - Plotly figures keyed by chart id
pub async fn get_charts(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let snapshot = state.load_snapshot()?;
    Ok(Json(snapshot.figures()).into_response())
}

/// GET /api/metrics/stream - card count-up frames as Server-Sent Events
pub async fn metrics_stream(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    // Load first so a data failure is reported before any frame is sent
    let snapshot = state.load_snapshot()?;
    let animation = state.animation();

    tracing::info!(
        cards = snapshot.metrics.len(),
        tick_ms = animation.tick.as_millis() as u64,
        "Streaming card animation"
    );

    let stream = CardStream::new(snapshot.metrics, animation);
    let body = Body::from_stream(stream.into_stream().map(Ok::<_, std::io::Error>));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: &'static str,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_type = match &self {
            AppError::Data(DataError::Io { .. }) => "data_unavailable",
            AppError::Data(DataError::Csv(_)) => "data_malformed",
            AppError::Data(DataError::Empty { .. }) => "data_empty",
            AppError::Data(DataError::Overflow { .. }) => "data_out_of_range",
            AppError::Internal(_) => "internal_error",
        };

        let body = ErrorBody {
            error: ErrorDetail {
                message: self.to_string(),
                error_type,
            },
        };

        let mut response = Json(body).into_response();
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    }
}
