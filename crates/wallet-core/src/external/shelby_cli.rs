//! The `shelby` CLI: uploads, downloads, faucet

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;

use super::command::{run_captured, run_interactive, CommandStatus};
use crate::error::Result;

/// Blob transfer and funding operations provided by the Shelby CLI.
///
/// Implementations report the exit status; callers decide whether a failure
/// is tolerated (faucet) or aborts the action (upload, download).
#[async_trait]
pub trait UploadService: Send + Sync {
    /// `upload <src> <dst> --expiration <when> --assume-yes`
    async fn upload(&self, src: &Path, dst: &str, expiration: &str) -> Result<CommandStatus>;

    /// `download <src> <dst> --force`
    async fn download(&self, src: &str, dst: &Path) -> Result<CommandStatus>;

    /// `faucet --no-open`
    async fn faucet(&self) -> Result<CommandStatus>;

    /// `--version`
    async fn version(&self) -> Result<String>;
}

/// Argument vectors, kept separate from process spawning
pub fn upload_args(src: &Path, dst: &str, expiration: &str) -> Vec<OsString> {
    vec![
        "upload".into(),
        src.as_os_str().to_owned(),
        dst.into(),
        "--expiration".into(),
        expiration.into(),
        "--assume-yes".into(),
    ]
}

pub fn download_args(src: &str, dst: &Path) -> Vec<OsString> {
    vec![
        "download".into(),
        src.into(),
        dst.as_os_str().to_owned(),
        "--force".into(),
    ]
}

pub fn faucet_args() -> Vec<OsString> {
    vec!["faucet".into(), "--no-open".into()]
}

/// Process-backed [`UploadService`]
pub struct ShelbyCli {
    program: String,
}

impl ShelbyCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl UploadService for ShelbyCli {
    async fn upload(&self, src: &Path, dst: &str, expiration: &str) -> Result<CommandStatus> {
        run_interactive(&self.program, upload_args(src, dst, expiration)).await
    }

    async fn download(&self, src: &str, dst: &Path) -> Result<CommandStatus> {
        run_interactive(&self.program, download_args(src, dst)).await
    }

    async fn faucet(&self) -> Result<CommandStatus> {
        run_interactive(&self.program, faucet_args()).await
    }

    async fn version(&self) -> Result<String> {
        run_captured(&self.program, ["--version"]).await
    }
}
