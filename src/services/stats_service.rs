//! Domain service for fleet-wide decision statistics.
//!
//! Every report is a projection of one [`DecisionStats`] snapshot.

use thiserror::Error;

use crate::domain::DecisionStats;
use crate::domain::stats::{
    ModelComparisonReport, ModelSuccessReport, SummaryReport, TotalsReport,
};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Storage error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for StatsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait StatsService: Send + Sync {
    /// Reads every aggregate from one consistent point in time.
    async fn snapshot(&self) -> Result<DecisionStats, StatsError>;

    /// Configured model names in slot order.
    fn model_names(&self) -> [&str; 3];

    async fn totals(&self) -> Result<TotalsReport, StatsError> {
        Ok(self.snapshot().await?.totals())
    }

    async fn model_success(&self) -> Result<ModelSuccessReport, StatsError> {
        let stats = self.snapshot().await?;
        Ok(stats.model_success(self.model_names()))
    }

    async fn model_comparison(&self) -> Result<ModelComparisonReport, StatsError> {
        Ok(self.snapshot().await?.model_comparison())
    }

    async fn summary(&self) -> Result<SummaryReport, StatsError> {
        Ok(self.snapshot().await?.summary())
    }
}
