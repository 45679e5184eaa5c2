//! Account Entity
//!
//! Single aggregate holding login credentials and session state.
//! The refresh token lives directly on the account: at most one active
//! value exists per account, and issuing a new one overwrites the old.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, account_role::AccountRole,
    email::Email,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Login key (unique, original case preserved)
    pub email: Email,
    /// Primary password hash
    pub password_hash: AccountPassword,
    /// Secondary admin password hash (admin accounts only)
    pub admin_password_hash: Option<AccountPassword>,
    /// Role (Customer, Admin)
    pub role: AccountRole,
    /// Whether the email has been verified
    pub is_verified: bool,
    /// Single-use opaque verification token; None once verified
    pub verification_token: Option<String>,
    /// Single active opaque refresh token; None when no session
    pub refresh_token: Option<String>,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new unverified account
    pub fn new(email: Email, password_hash: AccountPassword, verification_token: String) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            password_hash,
            admin_password_hash: None,
            role: AccountRole::default(),
            is_verified: false,
            verification_token: Some(verification_token),
            refresh_token: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Store a new refresh token, invalidating any previous session
    pub fn begin_session(&mut self, refresh_token: String) {
        self.refresh_token = Some(refresh_token);
        self.updated_at = Utc::now();
    }

    /// Clear the stored refresh token
    pub fn end_session(&mut self) {
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }

    /// Mark the email as verified and consume the verification token
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification_token = None;
        self.updated_at = Utc::now();
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Check admin eligibility (role + admin secret present)
    pub fn is_admin(&self) -> bool {
        self.role.is_admin() && self.admin_password_hash.is_some()
    }
}
