//! Credential Middleware
//!
//! Request authentication, admin authorization, and rate limiting.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::client::client_key;
use platform::rate_limit::{RateLimitConfig, RateLimitStore};
use platform::token::TokenSigner;

use crate::application::config::CredentialConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::CredentialError;
use crate::presentation::extract::extract_access_token;

/// Request-scoped authentication context
///
/// The account record is attached opportunistically: a lookup failure
/// or a deleted account leaves it `None` without failing the request.
/// Downstream authorization that needs the record handles its absence.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: AccountId,
    pub account: Option<Account>,
}

/// Middleware state
pub struct AuthMiddlewareState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CredentialConfig>,
}

// Manual impl: the fields are Arcs, R itself need not be Clone
impl<R> Clone for AuthMiddlewareState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Middleware requiring a valid access token
///
/// Token failures collapse to one 401: the response never reveals
/// whether the token was absent-of-claims, forged, or expired. Only
/// "no token at all" is reported separately.
pub async fn require_auth<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let token = extract_access_token(req.headers(), &state.config.access_cookie_name)
        .ok_or_else(|| CredentialError::NoToken.into_response())?;

    let signer = TokenSigner::new(state.config.token_secret);
    let claims = signer
        .verify(&token)
        .map_err(|_| CredentialError::InvalidToken.into_response())?;

    let account_id = AccountId::from_uuid(claims.sub);

    // Token validity and record availability are independent axes: the
    // identifier is attached unconditionally, the record best-effort
    let account = match state.repo.find_by_id(&account_id).await {
        Ok(account) => account,
        Err(e) => {
            tracing::warn!(account_id = %account_id, error = %e, "Account lookup failed");
            None
        }
    };

    req.extensions_mut().insert(AuthContext {
        account_id,
        account,
    });

    Ok(next.run(req).await)
}

/// Middleware requiring an admin account
///
/// Expects `require_auth` to have run; resolves the account itself if
/// the context carries only the identifier.
pub async fn require_admin<R>(
    state: AuthMiddlewareState<R>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let context = req
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .ok_or_else(|| CredentialError::NoToken.into_response())?;

    // A store failure here is a server error, not an auth failure
    let account = match context.account {
        Some(account) => account,
        None => state
            .repo
            .find_by_id(&context.account_id)
            .await
            .map_err(|e| e.into_response())?
            .ok_or_else(|| CredentialError::InvalidToken.into_response())?,
    };

    if !account.role.is_admin() {
        return Err(CredentialError::NotAdmin.into_response());
    }

    Ok(next.run(req).await)
}

// ============================================================================
// Rate Limiting
// ============================================================================

/// Per-route rate limit state
pub struct RateLimitState<S>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub policy: RateLimitConfig,
    /// Route scope prefixed onto the client key so routes count
    /// independently
    pub scope: &'static str,
}

impl<S> Clone for RateLimitState<S>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy.clone(),
            scope: self.scope,
        }
    }
}

impl<S> RateLimitState<S>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, policy: RateLimitConfig, scope: &'static str) -> Self {
        Self {
            store,
            policy,
            scope,
        }
    }
}

/// Login policy: 5 requests / 15 minutes
pub fn login_policy() -> RateLimitConfig {
    RateLimitConfig::new(5, 15 * 60)
}

/// Signup policy: 10 requests / 60 minutes
pub fn signup_policy() -> RateLimitConfig {
    RateLimitConfig::new(10, 60 * 60)
}

/// Fixed-window rate limit middleware
///
/// Fails open: a store error is logged and the request proceeds.
pub async fn rate_limit<S>(
    state: RateLimitState<S>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let key = format!("{}:{}", state.scope, client_key(req.headers(), direct_ip));

    match state.store.check_and_increment(&key, &state.policy).await {
        Ok(result) if !result.allowed => {
            let now_ms = chrono::Utc::now().timestamp_millis();
            Err(CredentialError::RateLimited {
                retry_after_secs: result.retry_after_secs(now_ms),
            }
            .into_response())
        }
        Ok(_) => Ok(next.run(req).await),
        Err(e) => {
            tracing::error!(error = %e, scope = state.scope, "Rate limit store failed, allowing request");
            Ok(next.run(req).await)
        }
    }
}
