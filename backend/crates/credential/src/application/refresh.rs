//! Refresh Use Case
//!
//! Exchanges a stored refresh token for a new access token.
//! The refresh token itself is not rotated.

use std::sync::Arc;

use platform::token::TokenSigner;

use crate::application::config::CredentialConfig;
use crate::domain::repository::AccountRepository;
use crate::error::{CredentialError, CredentialResult};

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<CredentialConfig>,
}

impl<R> RefreshUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CredentialConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, refresh_token: &str) -> CredentialResult<String> {
        let account = self
            .repo
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or(CredentialError::InvalidRefreshToken)?;

        let signer = TokenSigner::new(self.config.token_secret);
        let access_token = signer.issue(
            *account.account_id.as_uuid(),
            Some(account.role.code().to_string()),
            self.config.access_token_ttl,
        );

        tracing::debug!(account_id = %account.account_id, "Access token refreshed");

        Ok(access_token)
    }
}
