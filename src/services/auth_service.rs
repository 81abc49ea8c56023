//! Domain service for user registration and credential checks.
//!
//! Names are not unique. Login resolves a name to the lowest-id user that
//! carries it and checks the password against that user only.

use thiserror::Error;

use crate::domain::UserId;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a user and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for a blank name or empty password.
    async fn register(&self, name: &str, password: &str) -> Result<UserId, AuthError>;

    /// Checks credentials and returns the matching user id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] for an unknown name and
    /// [`AuthError::InvalidCredentials`] for a wrong password.
    async fn login(&self, name: &str, password: &str) -> Result<UserId, AuthError>;
}
