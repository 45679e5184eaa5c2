//! Account ID Value Object
//!
//! Type-safe wrapper around the kernel ID type.

/// Stable unique account identifier (UUID v4)
pub use kernel::id::AccountId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_uniqueness() {
        assert_ne!(AccountId::new(), AccountId::new());
    }
}
