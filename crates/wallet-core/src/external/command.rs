//! Helpers for running external programs

use std::ffi::OsStr;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, WalletError};

/// Exit status of an external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero status into [`WalletError::ExternalCommand`]
    pub fn check(self, command: &str) -> Result<()> {
        if self.success() {
            Ok(())
        } else {
            Err(WalletError::ExternalCommand {
                command: command.to_string(),
                status: self.to_string(),
            })
        }
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Human-readable command line for messages
pub fn describe<I, S>(program: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

/// Map a spawn failure; a program that cannot be found is a missing dependency
pub fn spawn_error(program: &str, e: std::io::Error) -> WalletError {
    if e.kind() == ErrorKind::NotFound {
        WalletError::MissingDependency(format!("`{}` was not found on PATH", program))
    } else {
        WalletError::IoError(e)
    }
}

/// Run a command with inherited stdio and wait for it
pub async fn run_interactive<I, S>(program: &str, args: I) -> Result<CommandStatus>
where
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<OsStr>,
{
    debug!("Running {}", describe(program, args.clone()));

    let status = Command::new(program)
        .args(args)
        .status()
        .await
        .map_err(|e| spawn_error(program, e))?;

    Ok(status.into())
}

/// Run a command and capture its stdout, failing on non-zero exit
pub async fn run_captured<I, S>(program: &str, args: I) -> Result<String>
where
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<OsStr>,
{
    let line = describe(program, args.clone());
    debug!("Running {}", line);

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| spawn_error(program, e))?;

    CommandStatus::from(output.status).check(&line)?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
