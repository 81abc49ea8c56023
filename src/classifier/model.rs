//! Serialized model formats understood by the gateway.
//!
//! Model files are JSON documents tagged by `kind`. They are validated once at
//! load so that prediction never indexes out of bounds.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Classifier, ClassifierError};
use crate::domain::FeatureVector;

const FEATURE_COUNT: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    TreeEnsemble(TreeEnsemble),
    Logistic(LogisticModel),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Majority of trees voting approve (leaf value >= 0.5). Ties reject.
    Vote,
    /// Sum of leaf values plus `base_score`; approve when the margin is >= 0.
    Logit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        /// Taken when `x[feature] < threshold`.
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: [f64; FEATURE_COUNT],
    pub bias: f64,
}

impl Tree {
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!("node {index}: feature {feature} out of range"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index}: threshold must be finite"));
                    }
                    // Children strictly after the parent keeps traversal acyclic.
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!("node {index}: invalid child index {child}"));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("node {index}: leaf value must be finite"));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &FeatureVector) -> Option<f64> {
        let mut index = 0;
        loop {
            match self.nodes.get(index)? {
                Node::Leaf { value } => return Some(*value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = features.get(*feature)?;
                    index = if x < *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl TreeEnsemble {
    fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() {
            return Err("base_score must be finite".to_string());
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| format!("tree {index}: {e}"))?;
        }
        Ok(())
    }

    fn decide(&self, features: &FeatureVector) -> Option<bool> {
        match self.aggregation {
            Aggregation::Vote => {
                let mut approvals = 0usize;
                for tree in &self.trees {
                    if tree.evaluate(features)? >= 0.5 {
                        approvals += 1;
                    }
                }
                Some(approvals * 2 > self.trees.len())
            }
            Aggregation::Logit => {
                let mut margin = self.base_score;
                for tree in &self.trees {
                    margin += tree.evaluate(features)?;
                }
                Some(margin >= 0.0)
            }
        }
    }
}

impl LogisticModel {
    fn validate(&self) -> Result<(), String> {
        if self.weights.iter().any(|w| !w.is_finite()) || !self.bias.is_finite() {
            return Err("weights and bias must be finite".to_string());
        }
        Ok(())
    }

    fn decide(&self, features: &FeatureVector) -> bool {
        let margin = self
            .weights
            .iter()
            .zip(features.as_array())
            .fold(self.bias, |acc, (w, x)| w.mul_add(*x, acc));
        margin >= 0.0
    }
}

impl ModelSpec {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::TreeEnsemble(model) => model.validate(),
            Self::Logistic(model) => model.validate(),
        }
    }
}

/// A named, validated model loaded from disk.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    name: String,
    spec: ModelSpec,
}

impl LoadedModel {
    pub fn new(name: impl Into<String>, spec: ModelSpec) -> Result<Self, ClassifierError> {
        let name = name.into();
        spec.validate()
            .map_err(|message| ClassifierError::invalid_model(&name, message))?;
        Ok(Self { name, spec })
    }

    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, ClassifierError> {
        let name = name.into();
        let spec: ModelSpec = serde_json::from_str(json)
            .map_err(|e| ClassifierError::invalid_model(&name, e.to_string()))?;
        Self::new(name, spec)
    }

    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, ClassifierError> {
        let name = name.into();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::invalid_model(&name, format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(name, &content)
    }
}

impl Classifier for LoadedModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> Result<bool, ClassifierError> {
        match &self.spec {
            ModelSpec::TreeEnsemble(model) => model
                .decide(features)
                .ok_or_else(|| ClassifierError::prediction(&self.name, "tree traversal failed")),
            ModelSpec::Logistic(model) => Ok(model.decide(features)),
        }
    }
}
