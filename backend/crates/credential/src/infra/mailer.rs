//! Verification Delivery Implementations

use crate::domain::repository::VerificationMailer;
use crate::domain::value_object::email::Email;
use crate::error::CredentialResult;

/// Tracing-based mailer
///
/// Stands in for real outbound delivery; logs the recipient without
/// the token value.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

impl VerificationMailer for LogMailer {
    async fn send_verification(&self, email: &Email, _token: &str) -> CredentialResult<()> {
        tracing::info!(email = %email, "Verification token issued");
        Ok(())
    }
}
