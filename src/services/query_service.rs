//! Read access to recorded decisions: latest per user and paginated listings.

use serde::Deserialize;
use thiserror::Error;

use crate::config::PaginationConfig;
use crate::domain::{DecisionRecord, Page, UserId};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("No decisions recorded for user {0}")]
    NotFound(UserId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for QueryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

// The SQLite binder converts u64 bounds to i64.
const MAX_BOUND: u64 = i64::MAX.unsigned_abs();

/// Raw pagination parameters as supplied by a caller.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageRequest {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PageRequest {
    /// Applies defaults, enforces `1..=max_limit` and keeps `offset` within
    /// the signed 64-bit range SQLite binds.
    pub fn resolve(self, config: &PaginationConfig) -> Result<Page, QueryError> {
        let max_limit = config.max_limit.min(MAX_BOUND);
        let limit = self.limit.unwrap_or(config.default_limit);
        if limit == 0 || limit > max_limit {
            return Err(QueryError::Validation(format!(
                "Invalid limit: {limit}. Limit must be between 1 and {max_limit}"
            )));
        }

        let offset = self.offset.unwrap_or(0);
        if offset > MAX_BOUND {
            return Err(QueryError::Validation(format!(
                "Invalid offset: {offset}. Offset must be at most {MAX_BOUND}"
            )));
        }

        Ok(Page::new(limit, offset))
    }
}

#[async_trait::async_trait]
pub trait QueryService: Send + Sync {
    /// Most recent decision for a user (by `created_at`, then id).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] when the user has no decisions.
    async fn latest_for_user(&self, user_id: UserId) -> Result<DecisionRecord, QueryError>;

    /// Newest-first listing, across all users when `user_id` is `None`.
    async fn list(
        &self,
        user_id: Option<UserId>,
        page: PageRequest,
    ) -> Result<Vec<DecisionRecord>, QueryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let page = PageRequest::default()
            .resolve(&PaginationConfig::default())
            .unwrap();
        assert_eq!(page, Page::new(50, 0));
    }

    #[test]
    fn test_limit_bounds() {
        let config = PaginationConfig::default();
        let page = |limit| PageRequest {
            limit: Some(limit),
            offset: Some(10),
        };
        assert_eq!(page(1).resolve(&config).unwrap(), Page::new(1, 10));
        assert_eq!(page(500).resolve(&config).unwrap(), Page::new(500, 10));
        assert!(page(0).resolve(&config).is_err());
        assert!(page(501).resolve(&config).is_err());
    }

    #[test]
    fn test_offset_must_fit_signed_range() {
        let config = PaginationConfig::default();
        let at = |offset| PageRequest {
            limit: None,
            offset: Some(offset),
        };
        assert_eq!(
            at(MAX_BOUND).resolve(&config).unwrap(),
            Page::new(50, MAX_BOUND)
        );
        assert!(matches!(
            at(MAX_BOUND + 1).resolve(&config),
            Err(QueryError::Validation(_))
        ));
        assert!(at(u64::MAX).resolve(&config).is_err());
    }

    #[test]
    fn test_oversized_max_limit_is_capped() {
        let config = PaginationConfig {
            default_limit: 50,
            max_limit: u64::MAX,
        };
        let request = PageRequest {
            limit: Some(u64::MAX),
            offset: None,
        };
        assert!(request.resolve(&config).is_err());
    }
}
