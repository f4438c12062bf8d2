//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::SessionError,
    state::{AppState, SessionSnapshot},
};
use super::responses::{
    ApiResponse, BreakSecondsRequest, FocusHoursMinutesRequest, FocusMinutesRequest,
    HealthResponse, StatusResponse,
};

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<ApiResponse>)>;

/// Map a session error onto an HTTP status and an error body
fn reject(action: &str, e: SessionError) -> (StatusCode, Json<ApiResponse>) {
    let status = match e {
        SessionError::InvalidConfiguration(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::AlreadyRunning | SessionError::NoPendingAlert => StatusCode::CONFLICT,
        SessionError::StatePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("{} failed: {}", action, e);
    } else {
        warn!("{} rejected: {}", action, e);
    }
    (status, Json(ApiResponse::error(e.to_string())))
}

fn respond(action: &str, message: &str, result: Result<SessionSnapshot, SessionError>) -> HandlerResult<ApiResponse> {
    match result {
        Ok(snapshot) => {
            info!("{} endpoint called", action);
            Ok(Json(ApiResponse::ok(message.to_string(), snapshot)))
        }
        Err(e) => Err(reject(action, e)),
    }
}

/// Handle POST /start - Begin a focus phase
pub async fn start_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    respond("start", "Focus phase started", state.start())
}

/// Handle POST /stop - Stop the timer and return to idle
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    respond("stop", "Timer stopped", state.stop())
}

/// Handle POST /acknowledge - Dismiss the focus alert and restart the break
pub async fn acknowledge_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    let result = state.acknowledge();
    let message = match result {
        Ok((true, _)) => "Alert acknowledged, break restarted",
        _ => "Alert acknowledged",
    };
    respond("acknowledge", message, result.map(|(_, snapshot)| snapshot))
}

/// Handle POST /config/focus-minutes
pub async fn focus_minutes_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FocusMinutesRequest>,
) -> HandlerResult<ApiResponse> {
    respond(
        "focus-minutes",
        "Focus duration updated",
        state.set_focus_minutes(request.minutes),
    )
}

/// Handle POST /config/focus - Set focus duration from hours and minutes
pub async fn focus_hours_minutes_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FocusHoursMinutesRequest>,
) -> HandlerResult<ApiResponse> {
    respond(
        "focus",
        "Focus duration updated",
        state.set_focus_hours_minutes(request.hours, request.minutes),
    )
}

/// Handle POST /config/break-seconds
pub async fn break_seconds_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BreakSecondsRequest>,
) -> HandlerResult<ApiResponse> {
    respond(
        "break-seconds",
        "Break duration updated",
        state.set_break_seconds(request.seconds),
    )
}

/// Handle GET /status - Return the current session snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> HandlerResult<StatusResponse> {
    let session = state.get_snapshot().map_err(|e| reject("status", e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
