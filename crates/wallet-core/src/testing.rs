//! Fakes for the terminal and the external collaborators, used by tests here
//! and by dependent crates through the `test_utils` feature

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use crate::account::PrivateKey;
use crate::error::{Result, WalletError};
use crate::external::{CommandStatus, GeneratedKey, KeyGenerator, UploadService};
use crate::terminal::Terminal;

/// Terminal that answers prompts from a script and records all output
pub struct ScriptedTerminal {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Everything shown to the user, prompts included
    pub fn transcript(&self) -> String {
        let mut all = self.prompts.clone();
        all.extend(self.output.iter().cloned());
        all.join("\n")
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn prompt(&mut self, message: &str) -> Result<String> {
        self.prompts.push(message.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| WalletError::UserCancelled("end of input".to_string()))
    }

    fn info(&mut self, message: &str) {
        self.output.push(message.to_string());
    }

    fn success(&mut self, message: &str) {
        self.output.push(format!("ok: {}", message));
    }

    fn warn(&mut self, message: &str) {
        self.output.push(format!("warning: {}", message));
    }

    fn error(&mut self, message: &str) {
        self.output.push(format!("error: {}", message));
    }
}

/// Hands out a fixed sequence of keypairs
pub struct FakeKeyGenerator {
    keys: Mutex<VecDeque<(String, String)>>,
    calls: Mutex<usize>,
}

impl FakeKeyGenerator {
    pub fn new(keys: &[(&str, &str)]) -> Self {
        Self {
            keys: Mutex::new(
                keys.iter()
                    .map(|(a, k)| (a.to_string(), k.to_string()))
                    .collect(),
            ),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl KeyGenerator for FakeKeyGenerator {
    async fn generate(&self) -> Result<GeneratedKey> {
        *self.calls.lock().unwrap() += 1;
        let (address, private_key) = self
            .keys
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| WalletError::KeyGeneration("no more fake keys".to_string()))?;

        Ok(GeneratedKey {
            address,
            private_key: PrivateKey::new(private_key),
        })
    }
}

/// Records Shelby CLI calls; downloads write `download_contents`
pub struct FakeUploader {
    pub upload_code: i32,
    pub download_code: i32,
    pub faucet_code: i32,
    pub download_contents: Vec<u8>,
    calls: Mutex<Vec<String>>,
}

impl FakeUploader {
    pub fn new() -> Self {
        Self {
            upload_code: 0,
            download_code: 0,
            faucet_code: 0,
            download_contents: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for FakeUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadService for FakeUploader {
    async fn upload(&self, src: &Path, dst: &str, expiration: &str) -> Result<CommandStatus> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("upload {} {} {}", src.display(), dst, expiration));
        Ok(CommandStatus::from_code(self.upload_code))
    }

    async fn download(&self, src: &str, dst: &Path) -> Result<CommandStatus> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("download {} {}", src, dst.display()));
        if self.download_code == 0 {
            std::fs::write(dst, &self.download_contents)?;
        }
        Ok(CommandStatus::from_code(self.download_code))
    }

    async fn faucet(&self) -> Result<CommandStatus> {
        self.calls.lock().unwrap().push("faucet".to_string());
        Ok(CommandStatus::from_code(self.faucet_code))
    }

    async fn version(&self) -> Result<String> {
        Ok("shelby 0.0.0-fake".to_string())
    }
}
