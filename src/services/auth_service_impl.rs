//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::UserId;
use crate::services::auth_service::{AuthError, AuthService};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

fn require(field: &str, value: &str) -> Result<(), AuthError> {
    if value.is_empty() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, name: &str, password: &str) -> Result<UserId, AuthError> {
        let name = name.trim();
        require("name", name)?;
        require("password", password)?;

        let id = self.store.create_user(name, password, &self.security).await?;
        info!(user_id = %id, "User registered");
        Ok(id)
    }

    async fn login(&self, name: &str, password: &str) -> Result<UserId, AuthError> {
        let name = name.trim();
        require("name", name)?;
        require("password", password)?;

        let (user, valid) = self
            .store
            .verify_user_password(name, password)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.id)
    }
}
