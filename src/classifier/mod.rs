//! Classifier gateway: one synchronous call, three verdicts.
//!
//! The gateway is built once at startup and shared read-only behind an `Arc`.
//! It never retries, caches or batches; each request is scored on its own.

pub mod model;

pub use model::{LoadedModel, ModelSpec};

use std::sync::Arc;
use thiserror::Error;

use crate::config::ClassifiersConfig;
use crate::domain::{FeatureVector, Verdicts};

#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    #[error("Model '{model}' could not be loaded: {message}")]
    InvalidModel { model: String, message: String },

    #[error("Model '{model}' failed to predict: {message}")]
    Prediction { model: String, message: String },
}

impl ClassifierError {
    pub fn invalid_model(model: &str, message: impl Into<String>) -> Self {
        Self::InvalidModel {
            model: model.to_string(),
            message: message.into(),
        }
    }

    pub fn prediction(model: &str, message: impl Into<String>) -> Self {
        Self::Prediction {
            model: model.to_string(),
            message: message.into(),
        }
    }
}

/// A pre-trained binary classifier over the four-feature vector.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// `true` approves, `false` rejects.
    fn predict(&self, features: &FeatureVector) -> Result<bool, ClassifierError>;
}

/// Fixed set of three classifiers, scored in slot order A, B, C.
#[derive(Clone)]
pub struct ClassifierGateway {
    model_a: Arc<dyn Classifier>,
    model_b: Arc<dyn Classifier>,
    model_c: Arc<dyn Classifier>,
}

impl std::fmt::Debug for ClassifierGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierGateway")
            .field("models", &self.model_names())
            .finish()
    }
}

impl ClassifierGateway {
    #[must_use]
    pub fn new(
        model_a: Arc<dyn Classifier>,
        model_b: Arc<dyn Classifier>,
        model_c: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            model_a,
            model_b,
            model_c,
        }
    }

    /// Loads the three configured model files. Any failure aborts startup.
    pub fn load(config: &ClassifiersConfig) -> Result<Self, ClassifierError> {
        let load = |slot: &crate::config::ModelSlotConfig| -> Result<Arc<dyn Classifier>, ClassifierError> {
            let model = LoadedModel::load(&slot.name, std::path::Path::new(&slot.path))?;
            tracing::info!(model = %slot.name, path = %slot.path, "Classifier loaded");
            Ok(Arc::new(model))
        };

        Ok(Self::new(
            load(&config.model_a)?,
            load(&config.model_b)?,
            load(&config.model_c)?,
        ))
    }

    /// Scores one vector. A failure in any model fails the whole call, so a
    /// partial verdict set is never produced.
    pub fn score(&self, features: &FeatureVector) -> Result<Verdicts, ClassifierError> {
        let verdict_a = self.model_a.predict(features)?;
        let verdict_b = self.model_b.predict(features)?;
        let verdict_c = self.model_c.predict(features)?;
        Ok(Verdicts::new(verdict_a, verdict_b, verdict_c))
    }

    #[must_use]
    pub fn model_names(&self) -> [&str; 3] {
        [self.model_a.name(), self.model_b.name(), self.model_c.name()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, bool);

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn predict(&self, _features: &FeatureVector) -> Result<bool, ClassifierError> {
            Ok(self.1)
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<bool, ClassifierError> {
            Err(ClassifierError::prediction("broken", "boom"))
        }
    }

    fn vector() -> FeatureVector {
        FeatureVector::new([1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn test_score_preserves_slot_order() {
        let gateway = ClassifierGateway::new(
            Arc::new(Fixed("a", true)),
            Arc::new(Fixed("b", false)),
            Arc::new(Fixed("c", true)),
        );
        assert_eq!(gateway.score(&vector()).unwrap(), Verdicts::new(true, false, true));
        assert_eq!(gateway.model_names(), ["a", "b", "c"]);
    }

    #[test]
    fn test_any_failure_fails_the_call() {
        let gateway = ClassifierGateway::new(
            Arc::new(Fixed("a", true)),
            Arc::new(Fixed("b", true)),
            Arc::new(Broken),
        );
        let err = gateway.score(&vector()).unwrap_err();
        assert!(matches!(err, ClassifierError::Prediction { ref model, .. } if model == "broken"));
    }
}
