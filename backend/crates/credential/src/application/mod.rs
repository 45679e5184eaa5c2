//! Application Layer
//!
//! Use cases and application services.

pub mod admin_log_in;
pub mod config;
pub mod log_in;
pub mod log_out;
pub mod refresh;
pub mod sign_up;
pub mod verify_email;

// Re-exports
pub use admin_log_in::{AdminLogInInput, AdminLogInUseCase};
pub use config::CredentialConfig;
pub use log_in::{LogInInput, LogInOutput, LogInUseCase};
pub use log_out::LogOutUseCase;
pub use refresh::RefreshUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_email::VerifyEmailUseCase;
