//! `SeaORM` implementation of the `StatsService` trait.

use async_trait::async_trait;
use tracing::warn;

use crate::db::Store;
use crate::domain::DecisionStats;
use crate::services::stats_service::{StatsError, StatsService};

pub struct SeaOrmStatsService {
    store: Store,
    model_names: [String; 3],
}

impl SeaOrmStatsService {
    #[must_use]
    pub const fn new(store: Store, model_names: [String; 3]) -> Self {
        Self { store, model_names }
    }
}

#[async_trait]
impl StatsService for SeaOrmStatsService {
    async fn snapshot(&self) -> Result<DecisionStats, StatsError> {
        let stats = self.store.decision_stats().await?;
        if !stats.is_consistent() {
            warn!(?stats, "Decision statistics snapshot is inconsistent");
        }
        Ok(stats)
    }

    fn model_names(&self) -> [&str; 3] {
        [
            self.model_names[0].as_str(),
            self.model_names[1].as_str(),
            self.model_names[2].as_str(),
        ]
    }
}
