//! Admin Log In Use Case
//!
//! As login, with a second independent secret check.

use std::sync::Arc;

use crate::application::config::CredentialConfig;
use crate::application::log_in::{LogInOutput, LogInUseCase};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_password::RawPassword;
use crate::error::{CredentialError, CredentialResult};

/// Admin log in input
pub struct AdminLogInInput {
    pub email: String,
    pub password: String,
    pub admin_password: String,
}

/// Admin log in use case
pub struct AdminLogInUseCase<R>
where
    R: AccountRepository,
{
    log_in: LogInUseCase<R>,
    config: Arc<CredentialConfig>,
}

impl<R> AdminLogInUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CredentialConfig>) -> Self {
        Self {
            log_in: LogInUseCase::new(repo, config.clone()),
            config,
        }
    }

    /// Role mismatch is reported distinctly (the client needs to tell
    /// "not an admin" from "wrong password"), but a wrong admin secret
    /// stays indistinguishable from a wrong primary password.
    pub async fn execute(&self, input: AdminLogInInput) -> CredentialResult<LogInOutput> {
        let account = self
            .log_in
            .authenticate(&input.email, &input.password)
            .await?;

        if !account.is_verified {
            return Err(CredentialError::NotVerified);
        }

        let admin_hash = match (account.role.is_admin(), &account.admin_password_hash) {
            (true, Some(hash)) => hash,
            _ => return Err(CredentialError::NotAdmin),
        };

        let raw_admin = RawPassword::new(input.admin_password)
            .map_err(|_| CredentialError::InvalidCredentials)?;
        if !admin_hash.verify(&raw_admin, self.config.pepper()) {
            return Err(CredentialError::InvalidCredentials);
        }

        self.log_in.open_session(account).await
    }
}
