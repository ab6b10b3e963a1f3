//! Layout of the Shelby home directory (`~/.shelby`)

use directories::BaseDirs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WalletError};

/// Directory name under the user's home
const HOME_DIR_NAME: &str = ".shelby";

/// Root of all persisted onboarding state
#[derive(Debug, Clone)]
pub struct ShelbyHome {
    root: PathBuf,
}

impl ShelbyHome {
    /// Use `~/.shelby`, where the Shelby CLI looks for its configuration
    pub fn new() -> Result<Self> {
        BaseDirs::new()
            .map(|dirs| Self::with_root(dirs.home_dir().join(HOME_DIR_NAME)))
            .ok_or_else(|| {
                WalletError::StorageError("Could not determine home directory".to_string())
            })
    }

    /// Use a custom root (for testing or `--home`)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one record per account
    pub fn accounts_dir(&self) -> PathBuf {
        self.root.join("accounts")
    }

    pub fn account_path(&self, name: &str) -> PathBuf {
        self.accounts_dir().join(format!("{}.json", name))
    }

    /// Single-line file naming the active account
    pub fn active_account_path(&self) -> PathBuf {
        self.root.join("active_account")
    }

    /// The YAML document read by the Shelby CLI
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    /// Onboarding tool settings
    pub fn settings_path(&self) -> PathBuf {
        self.root.join("onboard.json")
    }
}
