//! `SeaORM` implementation of the `QueryService` trait.

use async_trait::async_trait;

use crate::config::PaginationConfig;
use crate::db::Store;
use crate::domain::{DecisionRecord, UserId};
use crate::services::query_service::{PageRequest, QueryError, QueryService};

pub struct SeaOrmQueryService {
    store: Store,
    pagination: PaginationConfig,
}

impl SeaOrmQueryService {
    #[must_use]
    pub const fn new(store: Store, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }
}

#[async_trait]
impl QueryService for SeaOrmQueryService {
    async fn latest_for_user(&self, user_id: UserId) -> Result<DecisionRecord, QueryError> {
        self.store
            .latest_decision_for_user(user_id)
            .await?
            .ok_or(QueryError::NotFound(user_id))
    }

    async fn list(
        &self,
        user_id: Option<UserId>,
        page: PageRequest,
    ) -> Result<Vec<DecisionRecord>, QueryError> {
        let page = page.resolve(&self.pagination)?;

        let records = match user_id {
            Some(user_id) => self.store.list_decisions_for_user(user_id, page).await?,
            None => self.store.list_decisions(page).await?,
        };
        Ok(records)
    }
}
