//! Domain types for decision recording with strong typing.
//!
//! Identifiers are wrapped in newtypes so a user id can never be passed where
//! a decision id is expected.

pub mod features;
pub mod stats;

pub use features::{FeatureVector, InvalidInputError, InvalidInputReason, SubmissionInput};
pub use stats::DecisionStats;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted decision record, assigned by the store.
///
/// # Examples
///
/// ```rust
/// use lendr::domain::DecisionId;
///
/// let id = DecisionId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(i64);

impl DecisionId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DecisionId> for i64 {
    fn from(id: DecisionId) -> Self {
        id.0
    }
}

/// Identifier of a registered user.
///
/// Decision records hold this as a weak reference: nothing checks that the
/// user still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Verdicts of the three classifiers for one feature vector, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdicts {
    pub verdict_a: bool,
    pub verdict_b: bool,
    pub verdict_c: bool,
}

impl Verdicts {
    #[must_use]
    pub const fn new(verdict_a: bool, verdict_b: bool, verdict_c: bool) -> Self {
        Self {
            verdict_a,
            verdict_b,
            verdict_c,
        }
    }

    #[must_use]
    pub const fn all_approved(&self) -> bool {
        self.verdict_a && self.verdict_b && self.verdict_c
    }

    #[must_use]
    pub const fn all_rejected(&self) -> bool {
        !self.verdict_a && !self.verdict_b && !self.verdict_c
    }

    #[must_use]
    pub const fn any_approved(&self) -> bool {
        self.verdict_a || self.verdict_b || self.verdict_c
    }
}

/// A persisted decision: input echo, verdicts, attribution and timestamp.
///
/// Feature values are the integer-truncated values written by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    pub id: DecisionId,
    pub user_id: Option<UserId>,
    pub income: i64,
    pub credit_score: i64,
    pub loan_amount: i64,
    pub years_employed: i64,
    pub verdict_a: bool,
    pub verdict_b: bool,
    pub verdict_c: bool,
    pub created_at: String,
}

impl DecisionRecord {
    #[must_use]
    pub const fn verdicts(&self) -> Verdicts {
        Verdicts::new(self.verdict_a, self.verdict_b, self.verdict_c)
    }
}

/// Validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanimity_helpers() {
        assert!(Verdicts::new(true, true, true).all_approved());
        assert!(Verdicts::new(false, false, false).all_rejected());

        let split = Verdicts::new(true, false, true);
        assert!(!split.all_approved());
        assert!(!split.all_rejected());
        assert!(split.any_approved());
        assert!(!Verdicts::new(false, false, false).any_approved());
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&DecisionId::new(12)).unwrap();
        assert_eq!(json, "12");
        let user: UserId = serde_json::from_str("3").unwrap();
        assert_eq!(user.value(), 3);
    }
}
