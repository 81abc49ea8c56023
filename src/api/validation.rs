use super::ApiError;
use crate::domain::UserId;

pub fn validate_user_id(id: i64) -> Result<UserId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid user ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(UserId::new(id))
}

/// Extracts `(name, password)` from a credentials body, both required.
pub fn require_credentials(
    name: Option<String>,
    password: Option<String>,
) -> Result<(String, String), ApiError> {
    match (name, password) {
        (Some(name), Some(password)) => Ok((name, password)),
        _ => Err(ApiError::validation("Name and password are required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_id() {
        assert_eq!(validate_user_id(1).unwrap(), UserId::new(1));
        assert!(validate_user_id(0).is_err());
        assert!(validate_user_id(-4).is_err());
    }

    #[test]
    fn test_require_credentials() {
        assert!(require_credentials(Some("bob".into()), Some("pw".into())).is_ok());
        assert!(require_credentials(None, Some("pw".into())).is_err());
        assert!(require_credentials(Some("bob".into()), None).is_err());
    }
}
