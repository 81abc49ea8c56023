//! Aggregate statistics endpoints. Each response is one snapshot.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::domain::DecisionStats;
use crate::domain::stats::{
    ModelComparisonReport, ModelSuccessReport, SummaryReport, TotalsReport,
};

/// `GET /api/stats`
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DecisionStats>>, ApiError> {
    let stats = state.stats_service().snapshot().await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// `GET /api/stats/total`
pub async fn get_totals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<TotalsReport>>, ApiError> {
    let report = state.stats_service().totals().await?;
    Ok(Json(ApiResponse::success(report)))
}

/// `GET /api/stats/model_success`
pub async fn get_model_success(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ModelSuccessReport>>, ApiError> {
    let report = state.stats_service().model_success().await?;
    Ok(Json(ApiResponse::success(report)))
}

/// `GET /api/stats/model_comparison`
pub async fn get_model_comparison(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ModelComparisonReport>>, ApiError> {
    let report = state.stats_service().model_comparison().await?;
    Ok(Json(ApiResponse::success(report)))
}

/// `GET /api/stats/summary`
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SummaryReport>>, ApiError> {
    let report = state.stats_service().summary().await?;
    Ok(Json(ApiResponse::success(report)))
}
