//! Optional API keys supplied through the environment

/// Environment variable for the Aptos fullnode API key
pub const APTOS_API_KEY_VAR: &str = "APTOS_API_KEY";
/// Environment variable for the Aptos indexer API key
pub const APTOS_INDEXER_API_KEY_VAR: &str = "APTOS_INDEXER_API_KEY";
/// Environment variable for the Shelby RPC API key
pub const SHELBY_RPC_API_KEY_VAR: &str = "SHELBY_RPC_API_KEY";

/// API keys attached to the remote context. Blank values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    aptos: Option<String>,
    aptos_indexer: Option<String>,
    shelby_rpc: Option<String>,
}

impl ApiKeys {
    pub fn new(
        aptos: Option<String>,
        aptos_indexer: Option<String>,
        shelby_rpc: Option<String>,
    ) -> Self {
        Self {
            aptos: non_empty(aptos),
            aptos_indexer: non_empty(aptos_indexer),
            shelby_rpc: non_empty(shelby_rpc),
        }
    }

    /// Read keys from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read keys through an arbitrary lookup (environment-like source)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(
            lookup(APTOS_API_KEY_VAR),
            lookup(APTOS_INDEXER_API_KEY_VAR),
            lookup(SHELBY_RPC_API_KEY_VAR),
        )
    }

    pub fn aptos(&self) -> Option<&str> {
        self.aptos.as_deref()
    }

    pub fn aptos_indexer(&self) -> Option<&str> {
        self.aptos_indexer.as_deref()
    }

    pub fn shelby_rpc(&self) -> Option<&str> {
        self.shelby_rpc.as_deref()
    }

    /// Names of the keys that are set, for display
    pub fn configured(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.aptos.is_some() {
            names.push(APTOS_API_KEY_VAR);
        }
        if self.aptos_indexer.is_some() {
            names.push(APTOS_INDEXER_API_KEY_VAR);
        }
        if self.shelby_rpc.is_some() {
            names.push(SHELBY_RPC_API_KEY_VAR);
        }
        names
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
