//! # Dashboard Log Relay
//!
//! Lets the dashboard push its own log lines into the server's tracing
//! output, tagged with the component that raised them.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn, Level};

use crate::io::rest::error::{ApiError, ApiResult};
use crate::AppState;
use shared::LogEntry;

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Create a router for the dashboard log relay
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Re-emit a dashboard log line at its own level.
///
/// Levels are the tracing names, matched case-insensitively.
pub async fn log_message(
    State(_state): State<AppState>,
    Json(entry): Json<LogEntry>,
) -> ApiResult<Json<LogResponse>> {
    let level: Level = entry
        .level
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown log level '{}'", entry.level)))?;
    let component = entry.component.as_deref().unwrap_or("dashboard");

    match level {
        Level::ERROR => error!(target: "dashboard", component, "{}", entry.message),
        Level::WARN => warn!(target: "dashboard", component, "{}", entry.message),
        Level::INFO => info!(target: "dashboard", component, "{}", entry.message),
        Level::DEBUG => debug!(target: "dashboard", component, "{}", entry.message),
        _ => trace!(target: "dashboard", component, "{}", entry.message),
    }

    Ok(Json(LogResponse { success: true }))
}
