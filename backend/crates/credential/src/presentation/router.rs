//! Credential Router

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;

use platform::rate_limit::RateLimitStore;

use crate::application::config::CredentialConfig;
use crate::domain::repository::{AccountRepository, VerificationMailer};
use crate::infra::mailer::LogMailer;
use crate::infra::postgres::{PgAccountRepository, PgRateLimitStore};
use crate::presentation::handlers::{self, CredentialAppState};
use crate::presentation::middleware::{
    RateLimitState, login_policy, rate_limit, signup_policy,
};

/// Create the credential router with PostgreSQL repositories
pub fn credential_router(
    repo: PgAccountRepository,
    store: PgRateLimitStore,
    config: CredentialConfig,
) -> Router {
    credential_router_generic(
        Arc::new(repo),
        Arc::new(LogMailer::new()),
        Arc::new(store),
        Arc::new(config),
    )
}

/// Create a generic credential router for any repository implementation
pub fn credential_router_generic<R, M, S>(
    repo: Arc<R>,
    mailer: Arc<M>,
    store: Arc<S>,
    config: Arc<CredentialConfig>,
) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let state = CredentialAppState {
        repo,
        mailer,
        config,
    };

    let login_limit = RateLimitState::new(store.clone(), login_policy(), "login");
    let admin_login_limit = RateLimitState::new(store.clone(), login_policy(), "admin-login");
    let signup_limit = RateLimitState::new(store, signup_policy(), "signup");

    Router::new()
        .route(
            "/signup",
            post(handlers::sign_up::<R, M>).layer(from_fn(move |req, next| {
                rate_limit(signup_limit.clone(), req, next)
            })),
        )
        .route(
            "/login",
            post(handlers::log_in::<R, M>).layer(from_fn(move |req, next| {
                rate_limit(login_limit.clone(), req, next)
            })),
        )
        .route(
            "/admin-login",
            post(handlers::admin_log_in::<R, M>).layer(from_fn(move |req, next| {
                rate_limit(admin_login_limit.clone(), req, next)
            })),
        )
        .route("/refresh", post(handlers::refresh::<R, M>))
        .route("/logout", post(handlers::log_out::<R, M>))
        .route("/verify/{token}", get(handlers::verify_email::<R, M>))
        .with_state(state)
}
