//! Credential & Session Lifecycle Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Account signup/login with email + password
//! - Email verification gating login
//! - Two-secret admin login (primary password + admin password)
//! - Signed short-lived access tokens + opaque refresh tokens
//! - Single active refresh token per account (new login invalidates the old)
//! - Fixed-window rate limiting on authentication endpoints
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Unknown email and wrong password are indistinguishable to the caller
//! - Token signature/expiry/structure failures collapse to one 401
//! - Rate limiter fails open on store errors

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CredentialConfig;
pub use error::{CredentialError, CredentialResult};
pub use infra::postgres::{PgAccountRepository, PgRateLimitStore};
pub use presentation::router::credential_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
