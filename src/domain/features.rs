//! Feature extraction and coercion for decision requests.
//!
//! A request body is an arbitrary JSON object. The four features are pulled
//! out by name, coerced to `f64` and placed in the fixed positional order the
//! classifiers were trained on.

use serde_json::{Map, Value};
use thiserror::Error;

use super::UserId;

/// Feature names in classifier input order.
pub const FEATURE_NAMES: [&str; 4] = ["income", "credit_score", "loan_amount", "years_employed"];

/// Exclusive magnitude bound for values that can be stored as `i64` after truncation (2^63).
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputReason {
    Missing,
    NotNumeric(String),
    NotFinite,
    OutOfRange,
    NotAnInteger,
    NotPositive,
    NotAnObject,
}

impl std::fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "field is required"),
            Self::NotNumeric(got) => write!(f, "expected a number, got {got}"),
            Self::NotFinite => write!(f, "value must be finite"),
            Self::OutOfRange => write!(f, "value does not fit a 64-bit integer"),
            Self::NotAnInteger => write!(f, "expected an integer or null"),
            Self::NotPositive => write!(f, "must be a positive integer"),
            Self::NotAnObject => write!(f, "request body must be a JSON object"),
        }
    }
}

/// Raised before any classifier or store call when the request is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input for '{field}': {reason}")]
pub struct InvalidInputError {
    pub field: String,
    pub reason: InvalidInputReason,
}

impl InvalidInputError {
    fn new(field: &str, reason: InvalidInputReason) -> Self {
        Self {
            field: field.to_string(),
            reason,
        }
    }
}

/// Ordered, finite feature vector: income, credit score, loan amount, years employed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; 4]);

impl FeatureVector {
    /// Builds a vector from already-numeric values, applying the same checks as
    /// [`FeatureVector::from_json`].
    pub fn new(values: [f64; 4]) -> Result<Self, InvalidInputError> {
        for (name, value) in FEATURE_NAMES.iter().zip(values) {
            check_representable(name, value)?;
        }
        Ok(Self(values))
    }

    /// Extracts and coerces the four features from a JSON object.
    ///
    /// Numbers are taken as-is and strings are parsed after trimming. No sign
    /// or range policy is applied beyond finiteness and integer storability.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, InvalidInputError> {
        let mut values = [0.0; 4];
        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            let raw = body
                .get(name)
                .ok_or_else(|| InvalidInputError::new(name, InvalidInputReason::Missing))?;
            *slot = coerce_number(name, raw)?;
        }
        Ok(Self(values))
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; 4] {
        &self.0
    }

    #[must_use]
    pub const fn get(&self, index: usize) -> Option<f64> {
        if index < 4 { Some(self.0[index]) } else { None }
    }

    /// Values as persisted: truncated toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn truncated(&self) -> [i64; 4] {
        // Range was checked at construction, so the casts are exact.
        self.0.map(|v| v.trunc() as i64)
    }
}

/// A validated submission: features plus optional user attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionInput {
    pub features: FeatureVector,
    pub user_id: Option<UserId>,
}

impl SubmissionInput {
    pub fn from_json(body: &Value) -> Result<Self, InvalidInputError> {
        let object = body
            .as_object()
            .ok_or_else(|| InvalidInputError::new("body", InvalidInputReason::NotAnObject))?;

        let features = FeatureVector::from_json(object)?;

        // `usuario_id` is accepted for older clients.
        let user_id = match object.get("user_id").or_else(|| object.get("usuario_id")) {
            None | Some(Value::Null) => None,
            Some(value) => {
                let id = value.as_i64().ok_or_else(|| {
                    InvalidInputError::new("user_id", InvalidInputReason::NotAnInteger)
                })?;
                // Read paths reject non-positive ids as well.
                if id <= 0 {
                    return Err(InvalidInputError::new(
                        "user_id",
                        InvalidInputReason::NotPositive,
                    ));
                }
                Some(UserId::new(id))
            }
        };

        Ok(Self { features, user_id })
    }
}

fn coerce_number(field: &str, raw: &Value) -> Result<f64, InvalidInputError> {
    let value = match raw {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            InvalidInputError::new(field, InvalidInputReason::NotNumeric(n.to_string()))
        })?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            InvalidInputError::new(field, InvalidInputReason::NotNumeric(format!("'{s}'")))
        })?,
        other => {
            return Err(InvalidInputError::new(
                field,
                InvalidInputReason::NotNumeric(json_kind(other).to_string()),
            ));
        }
    };

    check_representable(field, value)?;
    Ok(value)
}

fn check_representable(field: &str, value: f64) -> Result<(), InvalidInputError> {
    if !value.is_finite() {
        return Err(InvalidInputError::new(field, InvalidInputReason::NotFinite));
    }
    let truncated = value.trunc();
    if !(-I64_BOUND..I64_BOUND).contains(&truncated) {
        return Err(InvalidInputError::new(field, InvalidInputReason::OutOfRange));
    }
    Ok(())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_in_positional_order() {
        let body = json!({
            "years_employed": 4,
            "loan_amount": 5_000_000,
            "credit_score": 720,
            "income": 3_500_000,
        });
        let input = SubmissionInput::from_json(&body).unwrap();
        assert_eq!(
            input.features.as_array(),
            &[3_500_000.0, 720.0, 5_000_000.0, 4.0]
        );
        assert_eq!(input.user_id, None);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let body = json!({
            "income": " 1200.5 ",
            "credit_score": "650",
            "loan_amount": "1e4",
            "years_employed": 2,
        });
        let input = SubmissionInput::from_json(&body).unwrap();
        assert_eq!(input.features.as_array(), &[1200.5, 650.0, 10_000.0, 2.0]);
    }

    #[test]
    fn test_non_numeric_value_is_rejected_with_field() {
        let body = json!({
            "income": "abc",
            "credit_score": 720,
            "loan_amount": 1,
            "years_employed": 1,
        });
        let err = SubmissionInput::from_json(&body).unwrap_err();
        assert_eq!(err.field, "income");
        assert!(matches!(err.reason, InvalidInputReason::NotNumeric(_)));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let body = json!({ "income": 1, "credit_score": 2, "loan_amount": 3 });
        let err = SubmissionInput::from_json(&body).unwrap_err();
        assert_eq!(err.field, "years_employed");
        assert_eq!(err.reason, InvalidInputReason::Missing);
    }

    #[test]
    fn test_booleans_and_null_are_not_numbers() {
        for bad in [json!(true), json!(null), json!([1]), json!({"v": 1})] {
            let body = json!({
                "income": 1,
                "credit_score": bad,
                "loan_amount": 1,
                "years_employed": 1,
            });
            let err = SubmissionInput::from_json(&body).unwrap_err();
            assert_eq!(err.field, "credit_score");
        }
    }

    #[test]
    fn test_non_finite_and_unstorable_values_are_rejected() {
        let nan = json!({ "income": "NaN", "credit_score": 1, "loan_amount": 1, "years_employed": 1 });
        assert_eq!(
            SubmissionInput::from_json(&nan).unwrap_err().reason,
            InvalidInputReason::NotFinite
        );

        let huge = json!({ "income": 1e300, "credit_score": 1, "loan_amount": 1, "years_employed": 1 });
        assert_eq!(
            SubmissionInput::from_json(&huge).unwrap_err().reason,
            InvalidInputReason::OutOfRange
        );
    }

    #[test]
    fn test_negative_and_zero_values_pass_through() {
        let body = json!({ "income": -10, "credit_score": 0, "loan_amount": -0.5, "years_employed": 0 });
        let input = SubmissionInput::from_json(&body).unwrap();
        assert_eq!(input.features.as_array(), &[-10.0, 0.0, -0.5, 0.0]);
        assert_eq!(input.features.truncated(), [-10, 0, 0, 0]);
    }

    #[test]
    fn test_truncation_is_toward_zero() {
        let v = FeatureVector::new([1999.99, 700.7, -3.9, 4.0]).unwrap();
        assert_eq!(v.truncated(), [1999, 700, -3, 4]);
    }

    #[test]
    fn test_user_id_must_be_integer() {
        let body = json!({
            "user_id": "seven",
            "income": 1, "credit_score": 1, "loan_amount": 1, "years_employed": 1,
        });
        let err = SubmissionInput::from_json(&body).unwrap_err();
        assert_eq!(err.field, "user_id");

        let body = json!({
            "user_id": 7,
            "income": 1, "credit_score": 1, "loan_amount": 1, "years_employed": 1,
        });
        assert_eq!(
            SubmissionInput::from_json(&body).unwrap().user_id,
            Some(UserId::new(7))
        );

        let body = json!({
            "usuario_id": 9,
            "income": 1, "credit_score": 1, "loan_amount": 1, "years_employed": 1,
        });
        assert_eq!(
            SubmissionInput::from_json(&body).unwrap().user_id,
            Some(UserId::new(9))
        );
    }

    #[test]
    fn test_user_id_must_be_positive() {
        for id in [0, -3] {
            let body = json!({
                "user_id": id,
                "income": 1, "credit_score": 1, "loan_amount": 1, "years_employed": 1,
            });
            let err = SubmissionInput::from_json(&body).unwrap_err();
            assert_eq!(err.field, "user_id");
            assert_eq!(err.reason, InvalidInputReason::NotPositive);
        }
    }

    #[test]
    fn test_body_must_be_object() {
        let err = SubmissionInput::from_json(&json!([1, 2, 3, 4])).unwrap_err();
        assert_eq!(err.reason, InvalidInputReason::NotAnObject);
    }
}
