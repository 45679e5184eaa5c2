//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::account::Account;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    /// Long-lived access token (legacy body transport)
    pub token: String,
    pub message: String,
}

// ============================================================================
// Log In
// ============================================================================

/// Log in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInRequest {
    pub email: String,
    pub password: String,
}

/// Admin log in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLogInRequest {
    pub email: String,
    pub password: String,
    pub admin_password: String,
}

/// Log in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInResponse {
    pub token: String,
    pub user: AccountDto,
}

// ============================================================================
// Refresh / Logout / Verify
// ============================================================================

/// Refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
}

/// Generic message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Account
// ============================================================================

/// Public account representation (no secrets, no tokens)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: String,
    pub email: String,
    pub role: String,
    pub is_verified: bool,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id.to_string(),
            email: account.email.as_str().to_string(),
            role: account.role.code().to_string(),
            is_verified: account.is_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        account_password::{AccountPassword, RawPassword},
        email::Email,
    };

    #[test]
    fn test_account_dto_shape() {
        let raw = RawPassword::new("correct horse battery".to_string()).unwrap();
        let account = Account::new(
            Email::new("user@example.com").unwrap(),
            AccountPassword::from_raw(&raw, None).unwrap(),
            "vtoken".to_string(),
        );

        let dto = AccountDto::from(&account);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["role"], "customer");
        assert_eq!(json["isVerified"], false);
        // No secret material leaks through the DTO
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("refreshToken").is_none());
    }
}
