//! Local wallet accounts

mod store;
mod types;

pub use store::AccountStore;
pub use types::{validate_account_name, Account, PrivateKey, DEFAULT_ACCOUNT_NAME};
