//! Signed Access Tokens
//!
//! Short-lived access tokens signed with a process-wide HMAC-SHA256 key:
//! `base64url(claims-json) . base64url(signature)`.
//!
//! Validity is purely cryptographic + time-based; nothing is persisted.
//! The key is injected at construction (never a module-level global) so
//! tests can use a deterministic key.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Token validation errors
///
/// The distinction between variants is for internal logging only; the HTTP
/// boundary must collapse all of them into a single invalid-token response
/// so an attacker cannot tell which check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Structurally invalid (wrong part count, bad encoding, bad JSON)
    #[error("Malformed token")]
    Malformed,

    /// Signature did not verify
    #[error("Invalid token signature")]
    BadSignature,

    /// Signature valid but `exp` is in the past
    #[error("Token expired")]
    Expired,
}

/// Claims carried by a signed access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account identifier the token was issued for
    pub sub: Uuid,
    /// Role code at issuance time, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds, exclusive)
    pub exp: i64,
}

/// Signs and verifies access tokens with a 32-byte HMAC key
#[derive(Clone)]
pub struct TokenSigner {
    secret: [u8; 32],
}

impl TokenSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Issue a token for an account, filling `iat`/`exp` from the clock
    pub fn issue(&self, sub: Uuid, role: Option<String>, ttl: Duration) -> String {
        let now = unix_now_secs();
        self.sign(&AccessClaims {
            sub,
            role,
            iat: now,
            exp: now + ttl.as_secs() as i64,
        })
    }

    /// Sign a claim set into its wire format
    pub fn sign(&self, claims: &AccessClaims) -> String {
        // AccessClaims serialization cannot fail: plain fields, no maps
        let payload = serde_json::to_vec(claims).unwrap_or_default();
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!("{}.{}", payload_b64, URL_SAFE_NO_PAD.encode(signature))
    }

    /// Verify a token: structure, signature, then expiry
    ///
    /// The signature is checked before the payload is parsed, so claims
    /// from a forged token are never even deserialized.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(TokenError::Malformed)?;
        if signature_b64.contains('.') {
            return Err(TokenError::Malformed);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;

        // Structural check: `sub` must be present and well-formed
        let claims: AccessClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if claims.exp <= unix_now_secs() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

fn unix_now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
