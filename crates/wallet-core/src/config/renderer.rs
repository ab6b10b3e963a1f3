//! Renders `config.yaml` from the active account
//!
//! The document is always regenerated in full. Manual edits to the file are
//! discarded on the next write.

use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::info;

use super::api_keys::ApiKeys;
use super::document::{
    AccountEntry, AptosNetworkConfig, ConfigDocument, ContextConfig, ShelbyNetworkConfig,
};
use super::network::{NetworkEndpoints, DEFAULT_CONTEXT, NETWORKS};
use crate::account::Account;
use crate::error::Result;
use crate::home::ShelbyHome;
use crate::storage::write_private;

const HEADER: &str = "# Generated by shelby-onboard. Changes are overwritten on the next update.\n";

/// Produces and writes the Shelby CLI configuration document
pub struct ConfigRenderer {
    home: ShelbyHome,
    api_keys: ApiKeys,
}

impl ConfigRenderer {
    pub fn new(home: ShelbyHome, api_keys: ApiKeys) -> Self {
        Self { home, api_keys }
    }

    /// Build the document for `account`
    pub fn document(&self, account: &Account) -> ConfigDocument {
        let contexts = NETWORKS
            .iter()
            .map(|network| (network.name.to_string(), self.context(network)))
            .collect::<IndexMap<_, _>>();

        let mut accounts = IndexMap::new();
        accounts.insert(
            account.name.clone(),
            AccountEntry {
                private_key: account.private_key.expose().to_string(),
                address: account.address.clone(),
            },
        );

        ConfigDocument {
            contexts,
            accounts,
            default_context: DEFAULT_CONTEXT.to_string(),
            default_account: account.name.clone(),
        }
    }

    /// Render the full YAML text for `account`
    pub fn render(&self, account: &Account) -> Result<String> {
        let body = serde_yaml::to_string(&self.document(account))?;
        Ok(format!("{}{}", HEADER, body))
    }

    /// Render and replace the config file, returning its path
    pub async fn write(&self, account: &Account) -> Result<PathBuf> {
        let path = self.home.config_path();
        let rendered = self.render(account)?;

        write_private(&path, rendered.as_bytes()).await?;

        info!("Wrote config for account '{}' to {:?}", account.name, path);
        Ok(path)
    }

    fn context(&self, network: &NetworkEndpoints) -> ContextConfig {
        let keys = if network.accepts_api_keys {
            self.api_keys.clone()
        } else {
            ApiKeys::default()
        };

        ContextConfig {
            aptos_network: AptosNetworkConfig {
                name: network.name.to_string(),
                fullnode: network.fullnode.to_string(),
                faucet: network.faucet.to_string(),
                indexer: network.indexer.to_string(),
                api_key: keys.aptos().map(str::to_string),
                indexer_api_key: keys.aptos_indexer().map(str::to_string),
            },
            shelby_network: ShelbyNetworkConfig {
                rpc_endpoint: network.rpc_endpoint.to_string(),
                rpc_api_key: keys.shelby_rpc().map(str::to_string),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::PrivateKey;
    use tempfile::TempDir;

    fn bob() -> Account {
        Account::new(
            "bob",
            "0xAB12",
            PrivateKey::new("ed25519-priv-0xdead".to_string()),
        )
        .unwrap()
    }

    fn renderer(keys: ApiKeys) -> (ConfigRenderer, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let home = ShelbyHome::with_root(temp_dir.path().join(".shelby"));
        (ConfigRenderer::new(home, keys), temp_dir)
    }

    fn parse(rendered: &str) -> ConfigDocument {
        serde_yaml::from_str(rendered).unwrap()
    }

    #[test]
    fn test_render_account() {
        let (renderer, _temp) = renderer(ApiKeys::default());
        let doc = parse(&renderer.render(&bob()).unwrap());

        assert_eq!(doc.default_account, "bob");
        assert_eq!(doc.default_context, "shelbynet");
        assert_eq!(doc.accounts.len(), 1);
        assert_eq!(doc.accounts["bob"].address, "0xAB12");
        assert_eq!(doc.accounts["bob"].private_key, "ed25519-priv-0xdead");
    }

    #[test]
    fn test_exactly_two_contexts_in_order() {
        let (renderer, _temp) = renderer(ApiKeys::default());
        let doc = parse(&renderer.render(&bob()).unwrap());

        let names: Vec<&str> = doc.contexts.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["local", "shelbynet"]);
        assert_eq!(
            doc.contexts["shelbynet"].shelby_network.rpc_endpoint,
            "https://api.shelbynet.shelby.xyz/shelby"
        );
        assert_eq!(doc.contexts["local"].aptos_network.name, "local");
    }

    #[test]
    fn test_render_is_deterministic() {
        let keys = ApiKeys::new(Some("aptos".into()), None, Some("rpc".into()));
        let (renderer, _temp) = renderer(keys);

        let first = renderer.render(&bob()).unwrap();
        assert_eq!(first, renderer.render(&bob()).unwrap());
    }

    #[test]
    fn test_empty_api_keys_are_omitted() {
        let keys = ApiKeys::new(Some(String::new()), Some("   ".into()), None);
        let (renderer, _temp) = renderer(keys);
        let rendered = renderer.render(&bob()).unwrap();

        assert!(!rendered.contains("api_key"));
    }

    #[test]
    fn test_api_keys_only_on_remote_context() {
        let keys = ApiKeys::new(
            Some("aptos-key".into()),
            Some("indexer-key".into()),
            Some("rpc-key".into()),
        );
        let (renderer, _temp) = renderer(keys);
        let doc = parse(&renderer.render(&bob()).unwrap());

        let remote = &doc.contexts["shelbynet"];
        assert_eq!(remote.aptos_network.api_key.as_deref(), Some("aptos-key"));
        assert_eq!(
            remote.aptos_network.indexer_api_key.as_deref(),
            Some("indexer-key")
        );
        assert_eq!(
            remote.shelby_network.rpc_api_key.as_deref(),
            Some("rpc-key")
        );

        let local = &doc.contexts["local"];
        assert!(local.aptos_network.api_key.is_none());
        assert!(local.shelby_network.rpc_api_key.is_none());
    }

    #[test]
    fn test_single_key_only_emits_that_line() {
        let keys = ApiKeys::new(None, None, Some("rpc-key".into()));
        let (renderer, _temp) = renderer(keys);
        let rendered = renderer.render(&bob()).unwrap();

        assert_eq!(rendered.matches("api_key").count(), 1);
        assert!(rendered.contains("rpc_api_key: rpc-key"));
    }

    #[tokio::test]
    async fn test_write_overwrites_manual_edits() {
        let (renderer, _temp) = renderer(ApiKeys::default());
        let path = renderer.write(&bob()).await.unwrap();

        std::fs::write(&path, "hand edited: true\n").unwrap();
        renderer.write(&bob()).await.unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, renderer.render(&bob()).unwrap());
        assert!(!on_disk.contains("hand edited"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_config_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (renderer, _temp) = renderer(ApiKeys::default());
        let path = renderer.write(&bob()).await.unwrap();

        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
