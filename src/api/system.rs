use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::types::HealthResponse;
use super::{ApiResponse, AppState};

/// `GET /api/system/health`
///
/// Reports database reachability and the loaded model names. Returns 503
/// when the database cannot be reached.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let database = state.store().ping().await.is_ok();
    let models = state.shared.gateway.model_names().map(str::to_string);

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        models,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    };

    (status, Json(ApiResponse::success(body))).into_response()
}
