//! Credential Error Types
//!
//! This module provides credential-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Credential-specific result type alias
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Credential-specific error variants
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Email already registered
    #[error("Email already exists")]
    DuplicateEmail,

    /// Malformed input (bad email, weak password, ...)
    #[error("{0}")]
    Validation(String),

    /// Wrong password or no such account (deliberately indistinct)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password matched but the email is not verified yet
    #[error("Email not verified")]
    NotVerified,

    /// Authenticated account lacks the admin role or admin secret
    #[error("Not an admin account")]
    NotAdmin,

    /// No token candidate on the request
    #[error("No token provided")]
    NoToken,

    /// Token failed validation (signature, expiry, or structure)
    #[error("Invalid token")]
    InvalidToken,

    /// No refresh token cookie on the request
    #[error("No refresh token provided")]
    NoRefreshToken,

    /// Refresh token does not match any stored value
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Email verification token matched no account
    #[error("Invalid token")]
    InvalidVerificationToken,

    /// Too many requests from this client
    #[error("Too many requests, please try again later")]
    RateLimited { retry_after_secs: u64 },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CredentialError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CredentialError::DuplicateEmail | CredentialError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            CredentialError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            CredentialError::NotVerified | CredentialError::NotAdmin => StatusCode::FORBIDDEN,
            CredentialError::NoToken
            | CredentialError::InvalidToken
            | CredentialError::NoRefreshToken
            | CredentialError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            // Verification failure is a user-facing 400, not an auth failure
            CredentialError::InvalidVerificationToken => StatusCode::BAD_REQUEST,
            CredentialError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            CredentialError::Database(_) | CredentialError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CredentialError::DuplicateEmail
            | CredentialError::Validation(_)
            | CredentialError::InvalidVerificationToken => ErrorKind::BadRequest,
            CredentialError::InvalidCredentials
            | CredentialError::NoToken
            | CredentialError::InvalidToken
            | CredentialError::NoRefreshToken
            | CredentialError::InvalidRefreshToken => ErrorKind::Unauthorized,
            CredentialError::NotVerified | CredentialError::NotAdmin => ErrorKind::Forbidden,
            CredentialError::RateLimited { .. } => ErrorKind::TooManyRequests,
            CredentialError::Database(_) | CredentialError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            CredentialError::RateLimited { retry_after_secs } => {
                err.with_retry_after(*retry_after_secs)
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CredentialError::Database(e) => {
                tracing::error!(error = %e, "Credential database error");
            }
            CredentialError::Internal(msg) => {
                tracing::error!(message = %msg, "Credential internal error");
            }
            CredentialError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            CredentialError::RateLimited { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Rate limited request");
            }
            _ => {
                tracing::debug!(error = %self, "Credential error");
            }
        }
    }
}

impl IntoResponse for CredentialError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CredentialError {
    fn from(err: AppError) -> Self {
        CredentialError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CredentialError::DuplicateEmail.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CredentialError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CredentialError::NotVerified.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            CredentialError::NotAdmin.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            CredentialError::InvalidVerificationToken.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CredentialError::RateLimited {
                retry_after_secs: 30
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_token_failures_collapse_to_unauthorized() {
        for err in [
            CredentialError::NoToken,
            CredentialError::InvalidToken,
            CredentialError::NoRefreshToken,
            CredentialError::InvalidRefreshToken,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_rate_limited_carries_retry_after() {
        let err = CredentialError::RateLimited {
            retry_after_secs: 42,
        };
        let app = err.to_app_error();
        assert_eq!(app.retry_after_secs(), Some(42));
    }
}
