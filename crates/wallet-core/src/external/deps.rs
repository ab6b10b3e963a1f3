//! Detection of the external tools the onboarding flow drives

use tracing::{info, warn};

use super::command::{run_captured, run_interactive, spawn_error, CommandStatus};
use super::keygen::node_script;
use crate::error::{Result, WalletError};
use crate::settings::Settings;

const NODE_GUIDANCE: &str = "install Node.js from https://nodejs.org and re-run";
const NPM_GUIDANCE: &str = "npm ships with Node.js; reinstall Node.js from https://nodejs.org";

/// Prints the installed version of the package named by the first argument
const RESOLVE_SCRIPT: &str = r#"
const name = process.argv[1];
require.resolve(name);
let version = "installed";
try { version = require(name + "/package.json").version; } catch (_) {}
process.stdout.write(version + "\n");
"#;

/// Result of probing one tool with `--version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    Found(String),
    Missing,
}

impl DependencyStatus {
    pub fn is_found(&self) -> bool {
        matches!(self, DependencyStatus::Found(_))
    }
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyStatus::Found(version) => write!(f, "{}", version),
            DependencyStatus::Missing => write!(f, "not found"),
        }
    }
}

/// Versions of every external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyReport {
    pub node: DependencyStatus,
    pub npm: DependencyStatus,
    pub shelby: DependencyStatus,
    /// SDK package the key generator `require`s
    pub sdk: DependencyStatus,
}

/// Probe `program --version`. A missing or broken binary reports `Missing`.
pub async fn probe(program: &str) -> Result<DependencyStatus> {
    match run_captured(program, ["--version"]).await {
        Ok(version) => {
            let version = version.lines().next().unwrap_or("").trim().to_string();
            Ok(DependencyStatus::Found(version))
        }
        Err(WalletError::MissingDependency(_)) => Ok(DependencyStatus::Missing),
        Err(WalletError::ExternalCommand { command, status }) => {
            warn!("`{}` exited with {}", command, status);
            Ok(DependencyStatus::Missing)
        }
        Err(e) => Err(e),
    }
}

/// Check that node can `require` a package, resolving against npm's global root
/// the same way the key generator does
pub async fn probe_package(
    node_bin: &str,
    npm_bin: &str,
    package: &str,
) -> Result<DependencyStatus> {
    let mut command = node_script(node_bin, npm_bin, RESOLVE_SCRIPT).await;
    command.arg(package);

    let output = match command.output().await {
        Ok(output) => output,
        Err(e) => match spawn_error(node_bin, e) {
            WalletError::MissingDependency(_) => return Ok(DependencyStatus::Missing),
            other => return Err(other),
        },
    };

    if !CommandStatus::from(output.status).success() {
        info!("{} cannot be resolved by {}", package, node_bin);
        return Ok(DependencyStatus::Missing);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.lines().map(str::trim).find(|l| !l.is_empty()) {
        Some(version) => Ok(DependencyStatus::Found(version.to_string())),
        None => Ok(DependencyStatus::Missing),
    }
}

/// Probe all tools without changing anything
pub async fn check(settings: &Settings) -> Result<DependencyReport> {
    let node = probe(&settings.node_bin).await?;
    let npm = probe(&settings.npm_bin).await?;
    let shelby = probe(&settings.shelby_bin).await?;
    let sdk = if node.is_found() {
        probe_package(&settings.node_bin, &settings.npm_bin, &settings.sdk_package).await?
    } else {
        DependencyStatus::Missing
    };

    Ok(DependencyReport {
        node,
        npm,
        shelby,
        sdk,
    })
}

async fn npm_install_global(settings: &Settings, package: &str) -> Result<()> {
    info!("Installing {} with {}", package, settings.npm_bin);
    run_interactive(&settings.npm_bin, ["install", "-g", package])
        .await?
        .check(&format!("{} install -g {}", settings.npm_bin, package))
}

fn install_hint(settings: &Settings, program: &str, package: &str) -> WalletError {
    WalletError::MissingDependency(format!(
        "`{}`: run `{} install -g {}`",
        program, settings.npm_bin, package
    ))
}

/// Require Node and npm, installing the Shelby CLI and the key generator's SDK
/// through npm when `install` is set and they are missing
pub async fn ensure(settings: &Settings, install: bool) -> Result<DependencyReport> {
    let mut report = check(settings).await?;

    if !report.node.is_found() {
        return Err(WalletError::MissingDependency(format!(
            "`{}`: {}",
            settings.node_bin, NODE_GUIDANCE
        )));
    }
    if !report.npm.is_found() {
        return Err(WalletError::MissingDependency(format!(
            "`{}`: {}",
            settings.npm_bin, NPM_GUIDANCE
        )));
    }

    if !report.shelby.is_found() && install {
        npm_install_global(settings, &settings.cli_package).await?;
        report.shelby = probe(&settings.shelby_bin).await?;
    }
    if !report.shelby.is_found() {
        return Err(install_hint(settings, &settings.shelby_bin, &settings.cli_package));
    }

    if !report.sdk.is_found() && install {
        npm_install_global(settings, &settings.sdk_package).await?;
        report.sdk =
            probe_package(&settings.node_bin, &settings.npm_bin, &settings.sdk_package).await?;
    }
    if !report.sdk.is_found() {
        return Err(install_hint(settings, &settings.sdk_package, &settings.sdk_package));
    }

    Ok(report)
}
