//! HTTP endpoint handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use super::responses::{ApiResponse, HealthResponse, StartRequest};
use crate::{
    state::{AppState, WidgetView},
    tasks::WidgetError,
};

/// Handle GET /widget - Return the current widget view
pub async fn widget_handler(State(state): State<AppState>) -> Json<WidgetView> {
    Json(state.widget.view())
}

/// Handle POST /start - Press the start/restart trigger
pub async fn start_handler(
    State(state): State<AppState>,
    request: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, StatusCode> {
    // A bodiless POST presses the trigger on the current input; a body that
    // does not decode is rejected without touching the widget.
    let target = match request {
        Ok(Json(request)) => request.target,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            warn!("Start endpoint called - invalid body: {}", rejection);
            return Ok(Json(ApiResponse::error(
                rejection.body_text(),
                state.widget.view(),
            )));
        }
    };

    match state.widget.start(target).await {
        Ok(widget) => {
            info!("Start endpoint called - countdown running");
            Ok(Json(ApiResponse::active(widget.message.clone(), widget)))
        }
        Err(WidgetError::Rejected(e)) => {
            info!("Start endpoint called - rejected: {}", e);
            Ok(Json(ApiResponse::error(e.to_string(), state.widget.view())))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Press the stop trigger
pub async fn stop_handler(State(state): State<AppState>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.widget.stop().await {
        Ok(widget) => {
            info!("Stop endpoint called - countdown stopped");
            Ok(Json(ApiResponse::inactive(widget.message.clone(), widget)))
        }
        Err(e) => {
            error!("Failed to stop countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(
        state.get_uptime(),
        state.host.clone(),
        state.port,
    ))
}
