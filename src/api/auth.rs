use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use std::sync::Arc;

use super::types::{CredentialsRequest, UserIdResponse, parse_json};
use super::validation::require_credentials;
use super::{ApiError, ApiResponse, AppState};

/// `POST /api/auth/register`
///
/// Always creates a new user, even when the name is already taken.
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<UserIdResponse>>), ApiError> {
    let request: CredentialsRequest = parse_json(&body)?;
    let (name, password) = require_credentials(request.name, request.password)?;

    let user_id = state.auth_service().register(&name, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserIdResponse { user_id })),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<UserIdResponse>>, ApiError> {
    let request: CredentialsRequest = parse_json(&body)?;
    let (name, password) = require_credentials(request.name, request.password)?;

    let user_id = state.auth_service().login(&name, &password).await?;

    Ok(Json(ApiResponse::success(UserIdResponse { user_id })))
}
