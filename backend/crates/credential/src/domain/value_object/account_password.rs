//! Account Password Value Objects
//!
//! Domain-facing wrappers over the platform password primitives.

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};

use crate::error::{CredentialError, CredentialResult};

/// Validated cleartext password (zeroized on drop)
pub type RawPassword = ClearTextPassword;

/// Stored Argon2id password hash (PHC string)
#[derive(Debug, Clone)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    /// Hash a validated raw password
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> CredentialResult<Self> {
        let hashed = raw
            .hash(pepper)
            .map_err(|e| CredentialError::Internal(e.to_string()))?;
        Ok(Self(hashed))
    }

    /// Create from database value
    pub fn from_db(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(phc)?))
    }

    /// Get the PHC string for database storage
    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// Returns false on mismatch or malformed hash, never errors.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw, pepper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("correct horse battery".to_string()).unwrap();
        let hash = AccountPassword::from_raw(&raw, None).unwrap();

        assert!(hash.verify(&raw, None));

        let wrong = RawPassword::new("incorrect horse".to_string()).unwrap();
        assert!(!hash.verify(&wrong, None));
    }

    #[test]
    fn test_from_db_rejects_garbage() {
        assert!(AccountPassword::from_db("not-a-phc-string").is_err());
    }

    #[test]
    fn test_pepper_changes_verification() {
        let raw = RawPassword::new("correct horse battery".to_string()).unwrap();
        let hash = AccountPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        assert!(hash.verify(&raw, Some(b"pepper")));
        assert!(!hash.verify(&raw, None));
    }
}
