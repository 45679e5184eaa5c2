//! Application Configuration
//!
//! Configuration for the credential application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Credential application configuration
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    /// Access token signing secret (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token TTL (15 minutes)
    pub access_token_ttl: Duration,
    /// TTL of the long-lived token returned in the signup body (7 days)
    pub signup_token_ttl: Duration,
    /// Refresh cookie lifetime (7 days)
    pub refresh_cookie_ttl: Duration,
    /// Access token cookie name
    pub access_cookie_name: String,
    /// Refresh token cookie name
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl CredentialConfig {
    /// Create a config with the given signing secret and default policy
    ///
    /// There is deliberately no `Default`: every construction path must
    /// supply key material explicitly.
    pub fn new(token_secret: [u8; 32]) -> Self {
        Self {
            token_secret,
            access_token_ttl: Duration::from_secs(15 * 60),
            signup_token_ttl: Duration::from_secs(7 * 24 * 3600),
            refresh_cookie_ttl: Duration::from_secs(7 * 24 * 3600),
            access_cookie_name: "accessToken".to_string(),
            refresh_cookie_name: "refreshToken".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }

    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret)
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
