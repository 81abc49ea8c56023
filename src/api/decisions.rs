//! Decision endpoints: submit a feature vector and read recorded decisions.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::types::{DecisionListQuery, parse_json};
use super::validation::validate_user_id;
use super::{ApiError, ApiResponse, AppState};
use crate::domain::DecisionRecord;
use crate::services::PageRequest;

/// `POST /api/decisions`
///
/// Validates, scores with all three classifiers and records the decision.
/// Nothing is written unless all three verdicts were produced.
pub async fn submit_decision(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<DecisionRecord>>), ApiError> {
    let body: serde_json::Value = parse_json(&body)?;
    let decision = state.decision_service().submit(&body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(decision))))
}

/// `GET /api/decisions?user_id&limit&offset`
pub async fn list_decisions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DecisionListQuery>,
) -> Result<Json<ApiResponse<Vec<DecisionRecord>>>, ApiError> {
    let user_id = query.user_id.map(validate_user_id).transpose()?;
    let page = PageRequest {
        limit: query.limit,
        offset: query.offset,
    };

    let records = state.query_service().list(user_id, page).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// `GET /api/users/{user_id}/decisions?limit&offset`
pub async fn list_user_decisions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<Vec<DecisionRecord>>>, ApiError> {
    let user_id = validate_user_id(user_id)?;
    let records = state.query_service().list(Some(user_id), page).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// `GET /api/users/{user_id}/decisions/latest`
pub async fn latest_user_decision(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<DecisionRecord>>, ApiError> {
    let user_id = validate_user_id(user_id)?;
    let record = state.query_service().latest_for_user(user_id).await?;
    Ok(Json(ApiResponse::success(record)))
}
