//! Sign Up Use Case
//!
//! Creates a new unverified account and opens an initial session.

use std::sync::Arc;

use platform::crypto::random_hex;
use platform::token::TokenSigner;

use crate::application::config::CredentialConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, VerificationMailer};
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
};
use crate::error::{CredentialError, CredentialResult};

/// Byte length of opaque refresh/verification tokens (64 hex chars)
const OPAQUE_TOKEN_BYTES: usize = 32;

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    /// Long-lived access token for the JSON body (legacy flow)
    pub token: String,
    /// Short-lived access token for the cookie
    pub access_token: String,
    /// Opaque refresh token for the cookie
    pub refresh_token: String,
    pub account: Account,
}

/// Sign up use case
pub struct SignUpUseCase<R, M>
where
    R: AccountRepository,
    M: VerificationMailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<CredentialConfig>,
}

impl<R, M> SignUpUseCase<R, M>
where
    R: AccountRepository,
    M: VerificationMailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<CredentialConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> CredentialResult<SignUpOutput> {
        let email =
            Email::new(input.email).map_err(|e| CredentialError::Validation(e.to_string()))?;

        if self.repo.exists_by_email(&email).await? {
            return Err(CredentialError::DuplicateEmail);
        }

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| CredentialError::Validation(e.to_string()))?;
        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())?;

        let verification_token = random_hex(OPAQUE_TOKEN_BYTES);
        let account = Account::new(email, password_hash, verification_token.clone());

        self.repo.create(&account).await?;

        // Delivery is best-effort; the account already exists and the
        // verification endpoint matches against the stored token
        if let Err(e) = self
            .mailer
            .send_verification(&account.email, &verification_token)
            .await
        {
            tracing::warn!(
                account_id = %account.account_id,
                error = %e,
                "Verification delivery failed"
            );
        }

        let signer = TokenSigner::new(self.config.token_secret);
        let token = signer.issue(
            *account.account_id.as_uuid(),
            None,
            self.config.signup_token_ttl,
        );
        let access_token = signer.issue(
            *account.account_id.as_uuid(),
            Some(account.role.code().to_string()),
            self.config.access_token_ttl,
        );

        // Best-effort refresh token persistence: a failure here must not
        // fail the signup, the account stays valid and can log in again
        let refresh_token = random_hex(OPAQUE_TOKEN_BYTES);
        let mut account = account;
        account.begin_session(refresh_token.clone());
        if let Err(e) = self.repo.update(&account).await {
            tracing::warn!(
                account_id = %account.account_id,
                error = %e,
                "Refresh token persistence failed during signup"
            );
            account.end_session();
        }

        tracing::info!(
            account_id = %account.account_id,
            "Account signed up"
        );

        Ok(SignUpOutput {
            token,
            access_token,
            refresh_token,
            account,
        })
    }
}
