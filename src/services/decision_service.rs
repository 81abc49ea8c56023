//! Domain service for the prediction path: validate, score, record.
//!
//! The order is fixed. Validation failures never reach a classifier, and a
//! classifier failure never reaches the store, so a request either records
//! one complete decision or records nothing.

use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::domain::{DecisionRecord, InvalidInputError};

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error(transparent)]
    Validation(#[from] InvalidInputError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("Storage error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for DecisionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait DecisionService: Send + Sync {
    /// Validates a raw JSON body, scores it and persists the record. Returns
    /// the record as stored, with truncated features and its timestamp.
    ///
    /// # Errors
    ///
    /// [`DecisionError::Validation`] for malformed input (nothing is scored or
    /// written), [`DecisionError::Classifier`] when scoring fails (nothing is
    /// written), [`DecisionError::Database`] when the write fails.
    async fn submit(&self, body: &serde_json::Value) -> Result<DecisionRecord, DecisionError>;
}
