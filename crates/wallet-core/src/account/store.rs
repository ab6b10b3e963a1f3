//! Account persistence and the active-account pointer

use chrono::Utc;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use super::types::{
    validate_account_name, Account, AccountRecord, AccountRecordRef, PrivateKey,
    DEFAULT_ACCOUNT_NAME,
};
use crate::error::Result;
use crate::home::ShelbyHome;
use crate::storage::{read_optional, write_private};

/// Reads and writes per-account records under `<home>/accounts`
pub struct AccountStore {
    home: ShelbyHome,
}

impl AccountStore {
    pub fn new(home: ShelbyHome) -> Self {
        Self { home }
    }

    pub fn home(&self) -> &ShelbyHome {
        &self.home
    }

    /// Create or overwrite an account record
    pub async fn write_account(
        &self,
        name: &str,
        address: &str,
        private_key: PrivateKey,
    ) -> Result<Account> {
        let account = Account::new(name, address, private_key)?;

        let record = AccountRecordRef {
            address: &account.address,
            private_key: account.private_key.expose(),
            created_at: Utc::now(),
        };
        let mut contents = serde_json::to_string_pretty(&record)?;
        contents.push('\n');

        let result = write_private(&self.home.account_path(name), contents.as_bytes()).await;
        contents.zeroize();
        result?;

        info!("Saved account '{}' ({})", account.name, account.address);
        Ok(account)
    }

    /// Load an account, or `None` if it is missing or incomplete
    pub async fn read_account(&self, name: &str) -> Result<Option<Account>> {
        if validate_account_name(name).is_err() {
            debug!("Not a valid account name: {:?}", name);
            return Ok(None);
        }

        let path = self.home.account_path(name);
        let Some(mut contents) = read_optional(&path).await? else {
            debug!("No account record at {:?}", path);
            return Ok(None);
        };

        let parsed = serde_json::from_str::<AccountRecord>(&contents);
        contents.zeroize();

        let record = match parsed {
            Ok(record) => record,
            Err(e) => {
                warn!("Ignoring unreadable account record {:?}: {}", path, e);
                return Ok(None);
            }
        };

        match Account::new(name, &record.address, PrivateKey::new(record.private_key)) {
            Ok(account) => Ok(Some(account)),
            Err(_) => {
                warn!("Account record {:?} is missing its address or key", path);
                Ok(None)
            }
        }
    }

    /// Whether a record file exists for `name`, complete or not
    pub async fn account_exists(&self, name: &str) -> Result<bool> {
        if validate_account_name(name).is_err() {
            return Ok(false);
        }
        Ok(tokio::fs::try_exists(self.home.account_path(name)).await?)
    }

    /// Names of all stored accounts, sorted
    pub async fn list_accounts(&self) -> Result<Vec<String>> {
        let dir = self.home.accounts_dir();
        if !tokio::fs::try_exists(&dir).await? {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_account_name(stem).is_ok() {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Persist the active-account pointer
    pub async fn set_active_account(&self, name: &str) -> Result<()> {
        validate_account_name(name)?;
        let pointer = format!("{}\n", name);
        write_private(&self.home.active_account_path(), pointer.as_bytes()).await?;
        info!("Active account set to '{}'", name);
        Ok(())
    }

    /// Name of the active account, falling back to the default
    pub async fn active_account_name(&self) -> String {
        let path = self.home.active_account_path();

        match read_optional(&path).await {
            Ok(Some(contents)) => {
                let name = contents.lines().next().unwrap_or("").trim();
                if name.is_empty() {
                    DEFAULT_ACCOUNT_NAME.to_string()
                } else {
                    name.to_string()
                }
            }
            Ok(None) => DEFAULT_ACCOUNT_NAME.to_string(),
            Err(e) => {
                warn!("Could not read {:?}, using default account: {}", path, e);
                DEFAULT_ACCOUNT_NAME.to_string()
            }
        }
    }

    /// Load whichever account the pointer names
    pub async fn read_active_account(&self) -> Result<Option<Account>> {
        let name = self.active_account_name().await;
        self.read_account(&name).await
    }
}
