//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tracing::{debug, error, warn};

use crate::cache::RouteError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lines", get(list_lines))
        .route("/route", post(plan_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the network's lines.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let lines = state
        .network()
        .lines()
        .iter()
        .map(|line| LineSummary::from_line(line))
        .collect();

    Json(LinesResponse { lines })
}

/// Plan a trip between two coordinates.
async fn plan_route(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so malformed bodies get a JSON error, not axum's text
    let req: RouteRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "Rejected route request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let depart_at = req.depart_at.unwrap_or_else(|| Local::now().naive_local());

    let outcome = state.router.search(req.start, req.end).await?;

    debug!(
        start = ?req.start,
        end = ?req.end,
        outcome = outcome.termination.as_str(),
        nodes_expanded = outcome.nodes_expanded,
        "Planned route"
    );

    Ok(Json(RouteResponse::from_outcome(&outcome, depart_at)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "Bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
