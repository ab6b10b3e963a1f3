//! Keypair generation through the Aptos TypeScript SDK

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};
use zeroize::Zeroize;

use super::command::{describe, run_captured, spawn_error, CommandStatus};
use crate::account::PrivateKey;
use crate::error::{Result, WalletError};

/// Prints `{"address": ..., "private_key": ...}` for a fresh ed25519 account
const GENERATE_SCRIPT: &str = r#"
const { Account } = require("@aptos-labs/ts-sdk");
const account = Account.generate();
process.stdout.write(JSON.stringify({
  address: account.accountAddress.toString(),
  private_key: account.privateKey.toAIP80String(),
}) + "\n");
"#;

/// Freshly generated address/private key pair
#[derive(Debug)]
pub struct GeneratedKey {
    pub address: String,
    pub private_key: PrivateKey,
}

/// Source of new keypairs
#[async_trait]
pub trait KeyGenerator: Send + Sync {
    async fn generate(&self) -> Result<GeneratedKey>;
}

#[derive(Deserialize)]
struct KeyOutput {
    address: String,
    private_key: String,
}

/// Parse the collaborator's stdout; the JSON object is on the last non-empty line
pub fn parse_generated_key(stdout: &str) -> Result<GeneratedKey> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| WalletError::KeyGeneration("no output from key generator".to_string()))?;

    let output: KeyOutput = serde_json::from_str(line)
        .map_err(|e| WalletError::KeyGeneration(format!("unexpected output: {}", e)))?;

    if !output.address.starts_with("0x") || output.address.len() <= 2 {
        return Err(WalletError::KeyGeneration(format!(
            "address '{}' is not hex-prefixed",
            output.address
        )));
    }
    if output.private_key.trim().is_empty() {
        return Err(WalletError::KeyGeneration("empty private key".to_string()));
    }

    Ok(GeneratedKey {
        address: output.address,
        private_key: PrivateKey::new(output.private_key),
    })
}

/// Runs a Node one-liner against the globally installed SDK
pub struct NodeKeyGenerator {
    node_bin: String,
    npm_bin: String,
}

impl NodeKeyGenerator {
    pub fn new(node_bin: impl Into<String>, npm_bin: impl Into<String>) -> Self {
        Self {
            node_bin: node_bin.into(),
            npm_bin: npm_bin.into(),
        }
    }
}

/// Global `node_modules`, so `require` resolves globally installed packages
async fn global_modules_dir(npm_bin: &str) -> Option<String> {
    match run_captured(npm_bin, ["root", "-g"]).await {
        Ok(dir) if !dir.is_empty() => Some(dir),
        Ok(_) => None,
        Err(e) => {
            debug!("Could not resolve global node_modules: {}", e);
            None
        }
    }
}

/// `node -e <script>` with `NODE_PATH` pointing at npm's global root
pub(crate) async fn node_script(node_bin: &str, npm_bin: &str, script: &str) -> Command {
    let mut command = Command::new(node_bin);
    command.arg("-e").arg(script);
    if let Some(dir) = global_modules_dir(npm_bin).await {
        command.env("NODE_PATH", dir);
    }
    command
}

#[async_trait]
impl KeyGenerator for NodeKeyGenerator {
    async fn generate(&self) -> Result<GeneratedKey> {
        let output = node_script(&self.node_bin, &self.npm_bin, GENERATE_SCRIPT)
            .await
            .output()
            .await
            .map_err(|e| spawn_error(&self.node_bin, e))?;

        let status = CommandStatus::from(output.status);
        if !status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WalletError::KeyGeneration(format!(
                "`{}` failed with {}: {}",
                describe(&self.node_bin, ["-e", "<script>"]),
                status,
                stderr.trim()
            )));
        }

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let generated = parse_generated_key(&stdout);
        stdout.zeroize();

        let generated = generated?;
        info!("Generated new keypair for {}", generated.address);
        Ok(generated)
    }
}
