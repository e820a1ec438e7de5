//! Centralized error types for Tatame.
//!
//! Uses `thiserror` for ergonomic error definitions and provides HTTP-friendly
//! error variants that can be directly converted to API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::models::member::PaymentStatus;

/// Core application error type used across all Tatame services.
#[derive(Debug, thiserror::Error)]
pub enum TatameError {
    // === Auth errors ===
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No account found for that email")]
    UserNotFound,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Unauthorized")]
    Unauthorized,

    // === Payment ledger errors ===
    #[error("Cannot {action} while payment is '{from}'")]
    InvalidStateTransition {
        action: &'static str,
        from: PaymentStatus,
    },

    #[error("The record changed while this update was in flight. Please retry.")]
    ConcurrentModification,

    // === Resource errors ===
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{resource} already exists")]
    AlreadyExists { resource: String },

    // === Validation errors ===
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // === Infrastructure errors ===
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend provider error: {code}")]
    Provider { code: String },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    error: String,
    message: String,
}

impl TatameError {
    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidEmail | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidStateTransition { .. }
            | Self::ConcurrentModification
            | Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::Network(_) | Self::Provider { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code string for programmatic handling by clients.
    pub fn error_code(&self) -> &str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Network(_) => "NETWORK_FAILURE",
            Self::Provider { .. } => "PROVIDER_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for TatameError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't leak backend details to clients
        let message = match &self {
            TatameError::Network(e) => {
                tracing::error!("Network error: {e}");
                "The backend is not reachable right now".to_string()
            }
            TatameError::Provider { code } => {
                tracing::error!("Unexpected provider error code: {code}");
                "The backend rejected the request".to_string()
            }
            TatameError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            error: self.error_code().to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience type alias for Results using TatameError.
pub type TatameResult<T> = Result<T, TatameError>;
