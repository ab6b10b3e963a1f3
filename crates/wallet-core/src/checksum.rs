//! SHA-256 checksums for upload round-trip verification

use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

use crate::error::Result;

const READ_BUF_SIZE: usize = 64 * 1024;

/// Hex-encoded SHA-256 of a file's contents
pub async fn sha256_file(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Checksums of an original file and its downloaded copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumComparison {
    pub original: String,
    pub downloaded: String,
}

impl ChecksumComparison {
    pub fn matches(&self) -> bool {
        self.original == self.downloaded
    }
}

pub async fn compare_files(original: &Path, downloaded: &Path) -> Result<ChecksumComparison> {
    Ok(ChecksumComparison {
        original: sha256_file(original).await?,
        downloaded: sha256_file(downloaded).await?,
    })
}
