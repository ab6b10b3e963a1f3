//! Account type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, WalletError};

/// Account created on first run and offered as the default name
pub const DEFAULT_ACCOUNT_NAME: &str = "alice";

const MAX_ACCOUNT_NAME_LEN: usize = 64;

/// Private key material - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    value: String,
}

impl PrivateKey {
    /// Wrap a private key string (e.g. `ed25519-priv-0x...`)
    pub fn new(value: String) -> Self {
        Self { value }
    }

    /// Get the secret value (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PrivateKey {}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// One wallet: a named address/private key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// User-chosen identifier, also the record's file stem
    pub name: String,
    /// Hex-prefixed account address
    pub address: String,
    /// Signing key
    pub private_key: PrivateKey,
}

impl Account {
    /// Create an account, rejecting names that cannot be used as file names
    pub fn new(name: &str, address: &str, private_key: PrivateKey) -> Result<Self> {
        validate_account_name(name)?;

        if address.trim().is_empty() || private_key.expose().trim().is_empty() {
            return Err(WalletError::InvalidInput(format!(
                "account '{}' needs both an address and a private key",
                name
            )));
        }

        Ok(Self {
            name: name.to_string(),
            address: address.to_string(),
            private_key,
        })
    }
}

/// Check that an account name is usable as a file stem
pub fn validate_account_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(WalletError::InvalidInput("account name cannot be empty".to_string()));
    }

    if name.len() > MAX_ACCOUNT_NAME_LEN {
        return Err(WalletError::InvalidInput(format!(
            "account name is longer than {} characters",
            MAX_ACCOUNT_NAME_LEN
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(WalletError::InvalidInput(format!(
            "account name '{}' may only contain letters, digits, '-' and '_'",
            name
        )));
    }

    Ok(())
}

/// On-disk account record, as written
#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct AccountRecordRef<'a> {
    pub address: &'a str,
    pub private_key: &'a str,
    pub created_at: DateTime<Utc>,
}

/// On-disk account record, as read back; `CREATED_AT` is informational only
#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct AccountRecord {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub private_key: String,
}
