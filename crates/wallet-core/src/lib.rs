//! # wallet-core
//!
//! Local credential and configuration management for Shelby onboarding:
//! - Account records and the active-account pointer, written owner-only
//! - Rendering of the Shelby CLI `config.yaml`
//! - The create / show / faucet / upload / export workflow
//! - Narrow interfaces to the key generator and the `shelby` CLI

pub mod account;
pub mod checksum;
pub mod config;
pub mod error;
pub mod external;
pub mod home;
pub mod settings;
pub mod storage;
pub mod terminal;
mod workflow;

#[cfg(any(test, feature = "test_utils"))]
pub mod testing;

pub use account::{Account, AccountStore, PrivateKey, DEFAULT_ACCOUNT_NAME};
pub use config::{ApiKeys, ConfigDocument, ConfigRenderer};
pub use error::{Result, WalletError};
pub use external::{KeyGenerator, NodeKeyGenerator, ShelbyCli, UploadService};
pub use home::ShelbyHome;
pub use settings::{Settings, SettingsManager};
pub use terminal::Terminal;
pub use workflow::{FaucetOutcome, UploadOutcome, WalletWorkflow, EXPORT_TOKEN};
