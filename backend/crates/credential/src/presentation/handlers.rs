//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use std::sync::Arc;

use platform::cookie::{CookieConfig, extract_cookie};

use crate::application::config::CredentialConfig;
use crate::application::{
    AdminLogInInput, AdminLogInUseCase, LogInInput, LogInUseCase, LogOutUseCase, RefreshUseCase,
    SignUpInput, SignUpUseCase, VerifyEmailUseCase,
};
use crate::domain::repository::{AccountRepository, VerificationMailer};
use crate::error::{CredentialError, CredentialResult};
use crate::presentation::dto::{
    AccountDto, AdminLogInRequest, LogInRequest, LogInResponse, MessageResponse, RefreshResponse,
    SignUpRequest, SignUpResponse,
};

/// Shared state for credential handlers
pub struct CredentialAppState<R, M>
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<CredentialConfig>,
}

// Manual impl: the fields are Arcs, R/M themselves need not be Clone
impl<R, M> Clone for CredentialAppState<R, M>
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, M>(
    State(state): State<CredentialAppState<R, M>>,
    Json(req): Json<SignUpRequest>,
) -> CredentialResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state.config, &output.access_token, &output.refresh_token),
        Json(SignUpResponse {
            token: output.token,
            message: "Registered!".to_string(),
        }),
    ))
}

// ============================================================================
// Log In
// ============================================================================

/// POST /api/auth/login
pub async fn log_in<R, M>(
    State(state): State<CredentialAppState<R, M>>,
    Json(req): Json<LogInRequest>,
) -> CredentialResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = LogInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LogInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state.config, &output.access_token, &output.refresh_token),
        Json(LogInResponse {
            token: output.access_token.clone(),
            user: AccountDto::from(&output.account),
        }),
    ))
}

/// POST /api/auth/admin-login
pub async fn admin_log_in<R, M>(
    State(state): State<CredentialAppState<R, M>>,
    Json(req): Json<AdminLogInRequest>,
) -> CredentialResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = AdminLogInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(AdminLogInInput {
            email: req.email,
            password: req.password,
            admin_password: req.admin_password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state.config, &output.access_token, &output.refresh_token),
        Json(LogInResponse {
            token: output.access_token.clone(),
            user: AccountDto::from(&output.account),
        }),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R, M>(
    State(state): State<CredentialAppState<R, M>>,
    headers: HeaderMap,
) -> CredentialResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let refresh_token = extract_cookie(&headers, &state.config.refresh_cookie_name)
        .filter(|t| !t.is_empty())
        .ok_or(CredentialError::NoRefreshToken)?;

    let use_case = RefreshUseCase::new(state.repo.clone(), state.config.clone());
    let access_token = use_case.execute(&refresh_token).await?;

    let cookie = access_cookie(&state.config).build_set_cookie(&access_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(RefreshResponse {
            token: access_token,
        }),
    ))
}

// ============================================================================
// Log Out
// ============================================================================

/// POST /api/auth/logout
pub async fn log_out<R, M>(
    State(state): State<CredentialAppState<R, M>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.refresh_cookie_name) {
        let use_case = LogOutUseCase::new(state.repo.clone());
        // Idempotent: errors must not surface, the cookies get cleared
        // either way
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Logout cleanup failed");
        }
    }

    (
        StatusCode::OK,
        clear_session_cookies(&state.config),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

// ============================================================================
// Verify Email
// ============================================================================

/// GET /api/auth/verify/{token}
pub async fn verify_email<R, M>(
    State(state): State<CredentialAppState<R, M>>,
    Path(token): Path<String>,
) -> CredentialResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone());
    use_case.execute(&token).await?;

    Ok(Json(MessageResponse {
        message: "Email verified".to_string(),
    }))
}

// ============================================================================
// Cookie Helpers
// ============================================================================

fn access_cookie(config: &CredentialConfig) -> CookieConfig {
    CookieConfig {
        name: config.access_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.access_token_ttl.as_secs() as i64),
    }
}

fn refresh_cookie(config: &CredentialConfig) -> CookieConfig {
    CookieConfig {
        name: config.refresh_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.refresh_cookie_ttl.as_secs() as i64),
    }
}

fn session_cookies(
    config: &CredentialConfig,
    access_token: &str,
    refresh_token: &str,
) -> AppendHeaders<[(axum::http::HeaderName, String); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            access_cookie(config).build_set_cookie(access_token),
        ),
        (
            header::SET_COOKIE,
            refresh_cookie(config).build_set_cookie(refresh_token),
        ),
    ])
}

fn clear_session_cookies(
    config: &CredentialConfig,
) -> AppendHeaders<[(axum::http::HeaderName, String); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            access_cookie(config).build_delete_cookie(),
        ),
        (
            header::SET_COOKIE,
            refresh_cookie(config).build_delete_cookie(),
        ),
    ])
}
