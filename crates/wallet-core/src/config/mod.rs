//! Shelby CLI configuration document

mod api_keys;
mod document;
pub mod network;
mod renderer;

pub use api_keys::{ApiKeys, APTOS_API_KEY_VAR, APTOS_INDEXER_API_KEY_VAR, SHELBY_RPC_API_KEY_VAR};
pub use document::{
    AccountEntry, AptosNetworkConfig, ConfigDocument, ContextConfig, ShelbyNetworkConfig,
};
pub use renderer::ConfigRenderer;
