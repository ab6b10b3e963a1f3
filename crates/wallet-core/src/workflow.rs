//! Wallet actions: create, show, faucet, upload, export
//!
//! Each action is a short sequential transaction. It reads the active-account
//! pointer fresh, asks for whatever confirmation it needs, and only then
//! touches disk or the external CLI. Errors surface to the caller, which
//! decides whether the session continues.
//!
//! Confirmation defaults differ on purpose: overwriting an account defaults
//! to no, the faucet and post-upload verification default to yes, and
//! export has no default at all.

use directories::BaseDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::account::{validate_account_name, Account, AccountStore, DEFAULT_ACCOUNT_NAME};
use crate::checksum::{compare_files, ChecksumComparison};
use crate::config::network::SHELBYNET;
use crate::config::ConfigRenderer;
use crate::error::{Result, WalletError};
use crate::external::{CommandStatus, KeyGenerator, UploadService};
use crate::terminal::{confirm, prompt_default, Terminal};

/// First confirmation token required before a private key is shown
pub const EXPORT_TOKEN: &str = "EXPORT";

/// What happened when the faucet action ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaucetOutcome {
    Funded,
    Skipped,
    /// The CLI failed; the session carries on
    Failed(CommandStatus),
}

/// Result of a completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub source: PathBuf,
    pub destination: String,
    pub verification: Option<ChecksumComparison>,
}

/// Orchestrates account and config changes around the external collaborators
pub struct WalletWorkflow {
    store: AccountStore,
    renderer: ConfigRenderer,
    keygen: Arc<dyn KeyGenerator>,
    uploader: Arc<dyn UploadService>,
    default_expiration: String,
}

impl WalletWorkflow {
    pub fn new(
        store: AccountStore,
        renderer: ConfigRenderer,
        keygen: Arc<dyn KeyGenerator>,
        uploader: Arc<dyn UploadService>,
        default_expiration: impl Into<String>,
    ) -> Self {
        Self {
            store,
            renderer,
            keygen,
            uploader,
            default_expiration: default_expiration.into(),
        }
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Version reported by the Shelby CLI
    pub async fn cli_version(&self) -> Result<String> {
        self.uploader.version().await
    }

    /// Make sure a usable active account exists, creating `alice` if needed
    pub async fn bootstrap(&self) -> Result<Account> {
        if let Some(account) = self.store.read_active_account().await? {
            return Ok(account);
        }

        if let Some(account) = self.store.read_account(DEFAULT_ACCOUNT_NAME).await? {
            info!(
                "Active account missing, falling back to '{}'",
                DEFAULT_ACCOUNT_NAME
            );
            self.activate(&account).await?;
            return Ok(account);
        }

        if self.store.account_exists(DEFAULT_ACCOUNT_NAME).await? {
            return Err(WalletError::StorageError(format!(
                "account record {:?} is unreadable; fix or remove it, then create a wallet",
                self.store.home().account_path(DEFAULT_ACCOUNT_NAME)
            )));
        }

        info!("No wallet found, creating '{}'", DEFAULT_ACCOUNT_NAME);
        self.create_quiet(DEFAULT_ACCOUNT_NAME).await
    }

    /// Interactive create: ask for a name, confirm overwrites, print a banner
    pub async fn create(&self, term: &mut dyn Terminal) -> Result<Account> {
        let name = prompt_default(term, "Account name", DEFAULT_ACCOUNT_NAME)?;
        validate_account_name(&name)?;

        if self.store.account_exists(&name).await? {
            let question = format!("Overwrite account '{}'? Its key is lost.", name);
            let overwrite = confirm(term, &question, false)?;
            if !overwrite {
                return Err(WalletError::UserCancelled(format!("kept account '{}'", name)));
            }
        }

        let account = self.create_account(&name).await?;

        term.success(&format!("Created account '{}'", account.name));
        term.info(&format!("Address: {}", account.address));
        term.info(&format!("Config:  {}", self.store.home().config_path().display()));
        Ok(account)
    }

    /// Create without prompts or banner; overwrites an existing record
    pub async fn create_quiet(&self, name: &str) -> Result<Account> {
        validate_account_name(name)?;
        self.create_account(name).await
    }

    /// Print the active account's address
    pub async fn show(&self, term: &mut dyn Terminal) -> Result<Account> {
        let account = self.require_active().await?;

        term.info(&format!("Account: {}", account.name));
        term.info(&format!("Address: {}", account.address));
        Ok(account)
    }

    /// Point the active account at an existing record and re-render the config
    pub async fn switch_account(&self, name: &str) -> Result<Account> {
        let account = self
            .store
            .read_account(name)
            .await?
            .ok_or_else(|| WalletError::AccountNotFound(name.to_string()))?;

        self.activate(&account).await?;
        Ok(account)
    }

    /// Print stored account names, marking the active one
    pub async fn list_accounts(&self, term: &mut dyn Terminal) -> Result<Vec<String>> {
        let names = self.store.list_accounts().await?;
        let active = self.store.active_account_name().await;

        if names.is_empty() {
            term.info("No accounts yet.");
        }
        for name in &names {
            let marker = if *name == active { "*" } else { " " };
            term.info(&format!("{} {}", marker, name));
        }
        Ok(names)
    }

    /// Explain funding and optionally run `shelby faucet`
    pub async fn faucet(&self, term: &mut dyn Terminal) -> Result<FaucetOutcome> {
        let account = self.require_active().await?;

        term.info(&format!("Fund account '{}' on {}:", account.name, SHELBYNET.name));
        term.info(&format!("  Address: {}", account.address));
        term.info(&format!("  Faucet:  {}", SHELBYNET.faucet));
        term.info("Both APT (for gas) and ShelbyUSD (for storage) are needed to upload.");

        if !confirm(term, "Request funds with `shelby faucet` now?", true)? {
            return Ok(FaucetOutcome::Skipped);
        }

        let status = self.uploader.faucet().await?;
        if status.success() {
            term.success("Faucet request sent");
            Ok(FaucetOutcome::Funded)
        } else {
            warn!("shelby faucet failed with {}", status);
            term.warn(&format!(
                "Faucet failed with {}. Use the faucet URL above instead.",
                status
            ));
            Ok(FaucetOutcome::Failed(status))
        }
    }

    /// Upload a local file, then optionally download it again and compare checksums
    pub async fn upload(&self, term: &mut dyn Terminal) -> Result<UploadOutcome> {
        self.require_active().await?;

        let entered = term.prompt("Path of the file to upload: ")?;
        let source = expand_home(entered.trim());
        if source.as_os_str().is_empty() {
            return Err(WalletError::InvalidInput("no file given".to_string()));
        }

        match tokio::fs::metadata(&source).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(WalletError::InvalidInput(format!(
                    "{} is not a regular file",
                    source.display()
                )))
            }
            Err(_) => {
                return Err(WalletError::InvalidInput(format!(
                    "{} does not exist",
                    source.display()
                )))
            }
        }

        let default_destination = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                WalletError::InvalidInput(format!("{} has no file name", source.display()))
            })?;
        let destination = prompt_default(term, "Destination name", &default_destination)?;
        let expiration = prompt_default(term, "Expiration", &self.default_expiration)?;

        self.uploader
            .upload(&source, &destination, &expiration)
            .await?
            .check("shelby upload")?;
        term.success(&format!("Uploaded {} as {}", source.display(), destination));

        let mut outcome = UploadOutcome {
            source,
            destination,
            verification: None,
        };

        if !confirm(term, "Download it again and verify the checksum?", true)? {
            return Ok(outcome);
        }

        let comparison = self
            .verify_round_trip(&outcome.source, &outcome.destination)
            .await?;
        if comparison.matches() {
            term.success(&format!("Checksums match (sha256 {})", comparison.original));
        } else {
            term.error(&format!(
                "Checksum mismatch: local {} vs downloaded {}",
                comparison.original, comparison.downloaded
            ));
        }

        outcome.verification = Some(comparison);
        Ok(outcome)
    }

    /// Reveal the private key after two exact-match confirmations
    pub async fn export(&self, term: &mut dyn Terminal) -> Result<()> {
        let account = self.require_active().await?;

        term.warn("Anyone with the private key controls this account and its funds.");

        let token = term.prompt(&format!("Type {} to continue: ", EXPORT_TOKEN))?;
        if token != EXPORT_TOKEN {
            return Err(WalletError::UserCancelled("export not confirmed".to_string()));
        }

        let question = format!("Type the account name ({}) to confirm: ", account.name);
        let name = term.prompt(&question)?;
        if name != account.name {
            return Err(WalletError::UserCancelled("account name did not match".to_string()));
        }

        info!("Exporting private key of '{}'", account.name);
        term.info(&format!("Private key: {}", account.private_key.expose()));
        Ok(())
    }

    async fn create_account(&self, name: &str) -> Result<Account> {
        let generated = self.keygen.generate().await?;
        let account = self
            .store
            .write_account(name, &generated.address, generated.private_key)
            .await?;

        self.activate(&account).await?;
        Ok(account)
    }

    async fn activate(&self, account: &Account) -> Result<()> {
        self.store.set_active_account(&account.name).await?;
        self.renderer.write(account).await?;
        Ok(())
    }

    async fn require_active(&self) -> Result<Account> {
        let name = self.store.active_account_name().await;
        match self.store.read_account(&name).await? {
            Some(account) => Ok(account),
            None => Err(WalletError::AccountNotFound(name)),
        }
    }

    async fn verify_round_trip(
        &self,
        source: &Path,
        destination: &str,
    ) -> Result<ChecksumComparison> {
        // Removed on drop, whether or not the download succeeds
        let scratch = tempfile::Builder::new()
            .prefix("shelby-verify-")
            .tempdir()?;

        let file_name = Path::new(destination)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "download".into());
        let local_copy = scratch.path().join(file_name);

        self.uploader
            .download(destination, &local_copy)
            .await?
            .check("shelby download")?;

        compare_files(source, &local_copy).await
    }
}

/// Expand a leading `~/` the way a shell would
fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(input)
}
