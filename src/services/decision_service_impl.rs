//! `SeaORM` implementation of the `DecisionService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::classifier::ClassifierGateway;
use crate::db::Store;
use crate::domain::{DecisionRecord, SubmissionInput, Verdicts};
use crate::services::decision_service::{DecisionError, DecisionService};

pub struct SeaOrmDecisionService {
    store: Store,
    gateway: Arc<ClassifierGateway>,
}

impl SeaOrmDecisionService {
    #[must_use]
    pub const fn new(store: Store, gateway: Arc<ClassifierGateway>) -> Self {
        Self { store, gateway }
    }

    fn record_metrics(&self, verdicts: Verdicts) {
        metrics::counter!("decisions_recorded_total").increment(1);

        let [a, b, c] = self.gateway.model_names();
        for (model, approved) in [
            (a, verdicts.verdict_a),
            (b, verdicts.verdict_b),
            (c, verdicts.verdict_c),
        ] {
            let verdict = if approved { "approved" } else { "rejected" };
            metrics::counter!(
                "decision_verdicts_total",
                "model" => model.to_string(),
                "verdict" => verdict
            )
            .increment(1);
        }
    }
}

#[async_trait]
impl DecisionService for SeaOrmDecisionService {
    async fn submit(&self, body: &serde_json::Value) -> Result<DecisionRecord, DecisionError> {
        let input = SubmissionInput::from_json(body).inspect_err(|e| {
            debug!(field = %e.field, "Rejected decision input: {e}");
        })?;

        let verdicts = self.gateway.score(&input.features).inspect_err(|e| {
            error!("Classifier failure, nothing recorded: {e}");
        })?;

        let id = self
            .store
            .insert_decision(input.user_id, &input.features, verdicts)
            .await
            .inspect_err(|e| error!("Failed to record decision: {e:#}"))?;

        self.record_metrics(verdicts);
        info!(
            decision_id = %id,
            user_id = ?input.user_id.map(|u| u.value()),
            verdict_a = verdicts.verdict_a,
            verdict_b = verdicts.verdict_b,
            verdict_c = verdicts.verdict_c,
            "Decision recorded"
        );

        self.store
            .get_decision(id)
            .await?
            .ok_or_else(|| DecisionError::Database(format!("Decision {id} missing after insert")))
    }
}
