//! Onboarding tool settings
//!
//! Stores non-secret preferences (external tool names, upload defaults) in a
//! plain JSON file next to the Shelby config. A missing or unreadable file
//! means defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::home::ShelbyHome;

/// Npm package providing the `shelby` binary
pub const DEFAULT_CLI_PACKAGE: &str = "@shelby-protocol/cli";

/// Npm package the key generator loads
pub const DEFAULT_SDK_PACKAGE: &str = "@aptos-labs/ts-sdk";

/// Upload expiration passed to `shelby upload` when the user keeps the default
pub const DEFAULT_EXPIRATION: &str = "in 2 days";

/// External tool locations and defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Settings file version
    pub version: u32,
    /// Node runtime used for key generation
    pub node_bin: String,
    /// Package manager used to install the Shelby CLI
    pub npm_bin: String,
    /// Shelby CLI binary
    pub shelby_bin: String,
    /// Package installed when the Shelby CLI is missing
    pub cli_package: String,
    /// Package required by the key generator script
    pub sdk_package: String,
    /// Default `--expiration` for uploads
    pub default_expiration: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            node_bin: "node".to_string(),
            npm_bin: "npm".to_string(),
            shelby_bin: "shelby".to_string(),
            cli_package: DEFAULT_CLI_PACKAGE.to_string(),
            sdk_package: DEFAULT_SDK_PACKAGE.to_string(),
            default_expiration: DEFAULT_EXPIRATION.to_string(),
        }
    }
}

/// Settings manager
pub struct SettingsManager {
    settings: Settings,
}

impl SettingsManager {
    /// Load settings from `<home>/onboard.json`, or defaults
    pub fn new(home: &ShelbyHome) -> Self {
        let settings_file = home.settings_path();
        let settings = match Self::load_from_file(&settings_file) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring unreadable settings {:?}: {}", settings_file, e);
                Settings::default()
            }
        };

        Self { settings }
    }

    fn load_from_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Get current settings
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Consume the manager, keeping the loaded settings
    pub fn into_settings(self) -> Settings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::new(&ShelbyHome::with_root(temp_dir.path()));

        let settings = manager.get();
        assert_eq!(settings.shelby_bin, "shelby");
        assert_eq!(settings.default_expiration, "in 2 days");
    }

    #[test]
    fn test_settings_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let home = ShelbyHome::with_root(temp_dir.path());

        let custom = Settings {
            shelby_bin: "/opt/shelby/bin/shelby".to_string(),
            default_expiration: "in 7 days".to_string(),
            ..Settings::default()
        };
        let json = serde_json::to_string_pretty(&custom).unwrap();
        std::fs::write(home.settings_path(), json).unwrap();

        let manager = SettingsManager::new(&home);
        assert_eq!(manager.get().shelby_bin, "/opt/shelby/bin/shelby");
        assert_eq!(manager.get().default_expiration, "in 7 days");
        assert_eq!(manager.get().node_bin, "node");
        assert_eq!(manager.get().sdk_package, "@aptos-labs/ts-sdk");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let home = ShelbyHome::with_root(temp_dir.path());
        let json = r#"{"nodeBin": "/usr/local/bin/node"}"#;
        std::fs::write(home.settings_path(), json).unwrap();

        let settings = SettingsManager::new(&home).into_settings();
        assert_eq!(settings.node_bin, "/usr/local/bin/node");
        assert_eq!(settings.npm_bin, "npm");
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let home = ShelbyHome::with_root(temp_dir.path());
        std::fs::write(home.settings_path(), "not json").unwrap();

        let settings = SettingsManager::new(&home).into_settings();
        assert_eq!(settings, Settings::default());
    }
}
