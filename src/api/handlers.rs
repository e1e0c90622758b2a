//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use tracing::{info, warn};

use crate::state::{AppError, AppState};
use super::responses::{ApiResponse, ConfigureRequest, HealthResponse, StatusResponse};

/// Handle POST /timer/configure - Set a new duration
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ConfigureRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let Json(request) = body.map_err(|rejection| {
        warn!("Configure rejected: {}", rejection.body_text());
        AppError::InvalidRequest(rejection.body_text())
    })?;
    let timer = state.configure(request.minutes).inspect_err(|e| {
        warn!("Configure rejected: {}", e);
    })?;

    info!("Configure endpoint called - duration set to {} minutes", timer.minutes);
    Ok(Json(ApiResponse::ok(
        format!("Timer set to {} minutes", timer.minutes),
        timer,
    )))
}

/// Handle POST /timer/start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    let timer = state.start().inspect_err(|e| warn!("Start rejected: {}", e))?;

    info!("Start endpoint called - {} remaining", timer.display);
    Ok(Json(ApiResponse::ok("Timer started".to_string(), timer)))
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    let timer = state.pause().inspect_err(|e| warn!("Pause rejected: {}", e))?;

    info!("Pause endpoint called - {} remaining", timer.display);
    Ok(Json(ApiResponse::ok("Timer paused".to_string(), timer)))
}

/// Handle POST /timer/reset - Return to idle with the full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    let timer = state.reset()?;

    info!("Reset endpoint called");
    Ok(Json(ApiResponse::ok("Timer reset".to_string(), timer)))
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, AppError> {
    let timer = state.get_timer_state()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
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
