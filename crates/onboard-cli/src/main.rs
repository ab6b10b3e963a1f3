//! Shelby onboarding CLI
//!
//! Without a subcommand this checks the external tools, makes sure a wallet
//! exists and opens the interactive menu. Subcommands run a single action.

mod menu;
mod terminal;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wallet_core::external::deps;
use wallet_core::{
    AccountStore, ApiKeys, ConfigRenderer, NodeKeyGenerator, Settings, SettingsManager,
    ShelbyCli, ShelbyHome, Terminal, WalletWorkflow,
};

use crate::terminal::StdTerminal;

/// Shelby onboarding - wallet setup, funding, uploads and key export for the Shelby CLI
#[derive(Parser, Debug)]
#[command(name = "shelby-onboard")]
#[command(version)]
#[command(about = "Set up a Shelby wallet and configuration, then upload files")]
struct Args {
    /// Shelby home directory (default: ~/.shelby)
    #[arg(long, env = "SHELBY_HOME")]
    home: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Do not install the Shelby CLI or the key generator's SDK through npm
    #[arg(long)]
    no_install: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a wallet (prompts for a name unless --name is given)
    Create {
        #[arg(long)]
        name: Option<String>,
        /// Overwrite an existing account with --name without asking
        #[arg(long, requires = "name")]
        force: bool,
    },
    /// Show the active account's address
    Show,
    /// Print funding instructions and optionally run the faucet
    Faucet,
    /// Upload a file, optionally verifying it by downloading it again
    Upload,
    /// Reveal the active account's private key
    Export,
    /// Make an existing account the active one
    Use { name: String },
    /// List stored accounts
    List,
    /// Regenerate config.yaml from the active account and current API keys
    Render,
    /// Report which external tools are available
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let home = match args.home.clone() {
        Some(root) => ShelbyHome::with_root(root),
        None => ShelbyHome::new().context("Failed to locate the Shelby home directory")?,
    };
    let settings = SettingsManager::new(&home).into_settings();
    let mut term = StdTerminal::new(std::io::stdout().is_terminal());

    match args.command {
        None => interactive(&home, &settings, &mut term, !args.no_install).await,
        Some(command) => run_command(&home, &settings, command, &mut term).await,
    }
}

/// `RUST_LOG` when set and valid, otherwise WARN (DEBUG with `--verbose`)
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose { "debug" } else { "warn" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

fn build_workflow(home: &ShelbyHome, settings: &Settings) -> WalletWorkflow {
    WalletWorkflow::new(
        AccountStore::new(home.clone()),
        ConfigRenderer::new(home.clone(), ApiKeys::from_env()),
        Arc::new(NodeKeyGenerator::new(&settings.node_bin, &settings.npm_bin)),
        Arc::new(ShelbyCli::new(&settings.shelby_bin)),
        &settings.default_expiration,
    )
}

async fn interactive(
    home: &ShelbyHome,
    settings: &Settings,
    term: &mut StdTerminal,
    install: bool,
) -> anyhow::Result<()> {
    let report = match deps::ensure(settings, install).await {
        Ok(report) => report,
        Err(e) => {
            term.error(&e.to_string());
            return Err(e).context("Required tools are missing");
        }
    };
    info!(
        "Using node {}, npm {}, SDK {}",
        report.node, report.npm, report.sdk
    );

    let workflow = build_workflow(home, settings);
    match workflow.cli_version().await {
        Ok(version) => term.info(&format!("Shelby CLI {}", version)),
        Err(e) => menu::report(term, &e),
    }

    match workflow.bootstrap().await {
        Ok(account) => term.info(&format!(
            "Active account: {} ({})",
            account.name, account.address
        )),
        Err(e) if e.is_fatal() => {
            term.error(&e.to_string());
            return Err(e).context("Could not create the initial wallet");
        }
        Err(e) => menu::report(term, &e),
    }

    menu::run(&workflow, term).await?;
    Ok(())
}

async fn run_command(
    home: &ShelbyHome,
    settings: &Settings,
    command: Command,
    term: &mut dyn Terminal,
) -> anyhow::Result<()> {
    let workflow = build_workflow(home, settings);

    match command {
        Command::Create {
            name: Some(name),
            force,
        } => {
            if !force && workflow.store().account_exists(&name).await? {
                bail!("account '{}' exists; pass --force to overwrite it", name);
            }
            let account = workflow.create_quiet(&name).await?;
            term.success(&format!("Created account '{}'", account.name));
            term.info(&format!("Address: {}", account.address));
        }
        Command::Create { name: None, .. } => {
            workflow.create(term).await?;
        }
        Command::Show => {
            workflow.show(term).await?;
        }
        Command::Faucet => {
            workflow.faucet(term).await?;
        }
        Command::Upload => {
            workflow.upload(term).await?;
        }
        Command::Export => {
            workflow.export(term).await?;
        }
        Command::Use { name } => {
            let account = workflow.switch_account(&name).await?;
            term.success(&format!("Active account is now '{}'", account.name));
        }
        Command::List => {
            workflow.list_accounts(term).await?;
        }
        Command::Render => {
            let active = workflow.store().active_account_name().await;
            let account = workflow.switch_account(&active).await?;
            term.success(&format!(
                "Rewrote {} for account '{}'",
                workflow.store().home().config_path().display(),
                account.name
            ));
        }
        Command::Doctor => doctor(settings, term).await?,
    }
    Ok(())
}

async fn doctor(settings: &Settings, term: &mut dyn Terminal) -> anyhow::Result<()> {
    let report = deps::check(settings).await?;

    term.info(&format!("node   ({}): {}", settings.node_bin, report.node));
    term.info(&format!("npm    ({}): {}", settings.npm_bin, report.npm));
    term.info(&format!("shelby ({}): {}", settings.shelby_bin, report.shelby));
    term.info(&format!("sdk    ({}): {}", settings.sdk_package, report.sdk));

    let keys = ApiKeys::from_env().configured();
    if keys.is_empty() {
        term.info("API keys: none set");
    } else {
        term.info(&format!("API keys: {}", keys.join(", ")));
    }

    if !report.shelby.is_found() {
        term.warn(&format!(
            "Install the Shelby CLI with `{} install -g {}`",
            settings.npm_bin, settings.cli_package
        ));
    }
    if !report.sdk.is_found() {
        term.warn(&format!(
            "Key generation needs `{} install -g {}`",
            settings.npm_bin, settings.sdk_package
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_core::testing::ScriptedTerminal;

    #[test]
    fn test_rust_log_overrides_default_level() {
        let filter = log_filter(true, Some("wallet_core=trace")).to_string();
        assert!(filter.contains("wallet_core=trace"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn test_default_levels() {
        assert_eq!(log_filter(false, None).to_string(), "warn");
        assert_eq!(log_filter(true, None).to_string(), "debug");
        assert_eq!(log_filter(false, Some("  ")).to_string(), "warn");
        let invalid = log_filter(false, Some("wallet_core=loud"));
        assert_eq!(invalid.to_string(), "warn");
    }

    #[tokio::test]
    async fn test_doctor_reports_missing_sdk() {
        let settings = Settings {
            node_bin: "no-such-node-5b2c".to_string(),
            npm_bin: "no-such-npm-5b2c".to_string(),
            shelby_bin: "no-such-shelby-5b2c".to_string(),
            ..Settings::default()
        };
        let mut term = ScriptedTerminal::new(Vec::<String>::new());

        doctor(&settings, &mut term).await.unwrap();

        let transcript = term.transcript();
        assert!(transcript.contains("sdk    (@aptos-labs/ts-sdk): not found"));
        assert!(transcript.contains("warning: Key generation needs `no-such-npm-5b2c install -g"));
    }
}
