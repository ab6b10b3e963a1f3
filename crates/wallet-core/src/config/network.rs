//! Compiled-in network endpoints

/// Context selected by default in the rendered config
pub const DEFAULT_CONTEXT: &str = SHELBYNET.name;

/// Static endpoints for one network context
#[derive(Debug, Clone, Copy)]
pub struct NetworkEndpoints {
    pub name: &'static str,
    pub fullnode: &'static str,
    pub faucet: &'static str,
    pub indexer: &'static str,
    pub rpc_endpoint: &'static str,
    /// Whether optional API keys are attached to this context
    pub accepts_api_keys: bool,
}

/// Local development network
pub const LOCAL: NetworkEndpoints = NetworkEndpoints {
    name: "local",
    fullnode: "http://127.0.0.1:8080/v1",
    faucet: "http://127.0.0.1:8081",
    indexer: "http://127.0.0.1:8090/v1/graphql",
    rpc_endpoint: "http://localhost:9090/",
    accepts_api_keys: false,
};

/// Shared Shelby devnet
pub const SHELBYNET: NetworkEndpoints = NetworkEndpoints {
    name: "shelbynet",
    fullnode: "https://api.shelbynet.shelby.xyz/v1",
    faucet: "https://faucet.shelbynet.shelby.xyz",
    indexer: "https://api.shelbynet.shelby.xyz/v1/graphql",
    rpc_endpoint: "https://api.shelbynet.shelby.xyz/shelby",
    accepts_api_keys: true,
};

/// Every context written to the config, in output order
pub const NETWORKS: [NetworkEndpoints; 2] = [LOCAL, SHELBYNET];
