pub mod account_id;
pub mod account_password;
pub mod account_role;
pub mod email;

pub use account_id::AccountId;
pub use account_password::{AccountPassword, RawPassword};
pub use account_role::AccountRole;
pub use email::Email;
