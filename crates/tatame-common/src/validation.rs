//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use validator::Validate;

use crate::error::TatameError;

/// Validate a request body, returning a TatameError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), TatameError> {
    body.validate().map_err(|e| TatameError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::member::LoginRequest;

    #[test]
    fn rejects_malformed_email() {
        let body = LoginRequest {
            email: "not-an-email".into(),
            password: "secret123".into(),
        };
        let err = validate_request(&body).unwrap_err();
        assert!(matches!(err, TatameError::Validation { .. }));
    }
}
