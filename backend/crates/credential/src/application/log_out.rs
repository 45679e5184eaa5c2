//! Log Out Use Case
//!
//! Clears the stored refresh token. Always succeeds from the caller's
//! perspective: an unknown token means there is nothing to clear.

use std::sync::Arc;

use crate::domain::repository::AccountRepository;
use crate::error::CredentialResult;

/// Log out use case
pub struct LogOutUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> LogOutUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, refresh_token: &str) -> CredentialResult<()> {
        if let Some(mut account) = self.repo.find_by_refresh_token(refresh_token).await? {
            account.end_session();
            self.repo.update(&account).await?;

            tracing::info!(account_id = %account.account_id, "Account logged out");
        }

        Ok(())
    }
}
