//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure randomness, constant-time comparison)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Signed access tokens (HMAC-SHA256) and opaque token generation
//! - Cookie management
//! - Rate limiting infrastructure
//! - Client identification helpers

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
pub mod token;
