//! Verify Email Use Case
//!
//! Exact-match, single-use token verification. Replay is naturally
//! rejected because verification clears the stored token.

use std::sync::Arc;

use crate::domain::repository::AccountRepository;
use crate::error::{CredentialError, CredentialResult};

/// Verify email use case
pub struct VerifyEmailUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, token: &str) -> CredentialResult<()> {
        let mut account = self
            .repo
            .find_by_verification_token(token)
            .await?
            .ok_or(CredentialError::InvalidVerificationToken)?;

        account.mark_verified();
        self.repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Email verified");

        Ok(())
    }
}
