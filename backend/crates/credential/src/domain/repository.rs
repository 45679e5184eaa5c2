//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::CredentialResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account
    async fn create(&self, account: &Account) -> CredentialResult<()>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> CredentialResult<Option<Account>>;

    /// Find account by email (exact match)
    async fn find_by_email(&self, email: &Email) -> CredentialResult<Option<Account>>;

    /// Find account by its stored verification token
    async fn find_by_verification_token(&self, token: &str) -> CredentialResult<Option<Account>>;

    /// Find account by its stored refresh token
    async fn find_by_refresh_token(&self, token: &str) -> CredentialResult<Option<Account>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> CredentialResult<bool>;

    /// Update account
    async fn update(&self, account: &Account) -> CredentialResult<()>;
}

/// Outbound verification delivery trait
///
/// The actual transport (SMTP, queue, ...) is out of scope; the signup
/// use case only needs somewhere to hand the plaintext token.
#[trait_variant::make(VerificationMailer: Send)]
pub trait LocalVerificationMailer {
    /// Deliver a verification token to the account's email address
    async fn send_verification(&self, email: &Email, token: &str) -> CredentialResult<()>;
}
