use axum::body::Bytes;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::ApiError;
use crate::domain::UserId;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Parses a JSON request body, reporting malformed input as a 400 in the
/// standard envelope instead of axum's plain-text rejection.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::validation(format!("Invalid JSON body: {e}")))
}

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct DecisionListQuery {
    pub user_id: Option<i64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub models: [String; 3],
    pub uptime_seconds: u64,
    pub version: &'static str,
}
