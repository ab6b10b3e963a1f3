//! Shape of the Shelby CLI configuration document

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-level `config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub contexts: IndexMap<String, ContextConfig>,
    pub accounts: IndexMap<String, AccountEntry>,
    pub default_context: String,
    pub default_account: String,
}

/// One named network context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    pub aptos_network: AptosNetworkConfig,
    pub shelby_network: ShelbyNetworkConfig,
}

/// Blockchain endpoints of a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AptosNetworkConfig {
    pub name: String,
    pub fullnode: String,
    pub faucet: String,
    pub indexer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer_api_key: Option<String>,
}

/// Shelby storage service endpoints of a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelbyNetworkConfig {
    pub rpc_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_api_key: Option<String>,
}

/// Account entry under `accounts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub private_key: String,
    pub address: String,
}
