//! Infrastructure Layer
//!
//! Repository and collaborator implementations.

pub mod mailer;
pub mod memory;
pub mod postgres;
