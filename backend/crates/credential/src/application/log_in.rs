//! Log In Use Case
//!
//! Authenticates an account and replaces its active session.

use std::sync::Arc;

use platform::crypto::random_hex;
use platform::token::TokenSigner;

use crate::application::config::CredentialConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_password::RawPassword, email::Email};
use crate::error::{CredentialError, CredentialResult};

/// Log in input
pub struct LogInInput {
    pub email: String,
    pub password: String,
}

/// Log in output
#[derive(Debug)]
pub struct LogInOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub account: Account,
}

/// Log in use case
pub struct LogInUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<CredentialConfig>,
}

impl<R> LogInUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CredentialConfig>) -> Self {
        Self { repo, config }
    }

    /// Ordering is load-bearing: fetch -> verify password -> check
    /// verified flag -> issue tokens. Unknown email and wrong password
    /// must produce the same error, and the verified check happens only
    /// after the password matched.
    pub async fn execute(&self, input: LogInInput) -> CredentialResult<LogInOutput> {
        let account = self.authenticate(&input.email, &input.password).await?;

        if !account.is_verified {
            return Err(CredentialError::NotVerified);
        }

        self.open_session(account).await
    }

    /// Shared primary-credential check (also used by admin login)
    pub(crate) async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> CredentialResult<Account> {
        let email = Email::new(email).map_err(|_| CredentialError::InvalidCredentials)?;

        let account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        let raw_password = RawPassword::new(password.to_string())
            .map_err(|_| CredentialError::InvalidCredentials)?;

        if !account
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(CredentialError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Issue a fresh token pair and overwrite the stored refresh token
    pub(crate) async fn open_session(&self, mut account: Account) -> CredentialResult<LogInOutput> {
        let refresh_token = random_hex(32);
        account.begin_session(refresh_token.clone());
        account.record_login();
        self.repo.update(&account).await?;

        let signer = TokenSigner::new(self.config.token_secret);
        let access_token = signer.issue(
            *account.account_id.as_uuid(),
            Some(account.role.code().to_string()),
            self.config.access_token_ttl,
        );

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            "Account logged in"
        );

        Ok(LogInOutput {
            access_token,
            refresh_token,
            account,
        })
    }
}
