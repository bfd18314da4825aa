//! Configuration loading and management

mod settings;

pub use settings::Settings;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Get the global config directory path (~/.tokenverse/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tokenverse")
    }

    /// Get the global config file path (~/.tokenverse/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Where the active session token lives (~/.tokenverse/session)
    pub fn session_path() -> PathBuf {
        Self::global_config_dir().join("session")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the global configuration, creating a default file on first use.
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();

        if !global_path.exists() {
            let config = Config::default();
            config.save_to_file(&global_path)?;
            return Ok(config);
        }

        Self::from_file(&global_path)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// An exclusive lock prevents concurrent writers, and the temp-file
    /// rename keeps a crash from leaving a half-written config behind.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        let lock_path = path.with_extension("toml.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .with_context(|| "Failed to acquire config lock")?;

        let temp_path = path.with_extension("toml.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .with_context(|| "Failed to write config content")?;
        temp_file
            .sync_all()
            .with_context(|| "Failed to sync config file")?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

        Ok(())
    }

    /// The resolved store path (settings override or the default location)
    pub fn store_path(&self) -> PathBuf {
        self.settings
            .store_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("store.db"))
    }

    /// The resolved attachment directory
    pub fn attachment_dir(&self) -> PathBuf {
        self.settings
            .attachment_dir
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("attachments"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.settings.chain_id = 31337;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.settings.chain_id, 31337);
        assert_eq!(loaded.settings.rpc_url, Settings::default().rpc_url);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\nchain_id = 5\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.settings.chain_id, 5);
        assert!(!config.settings.treasury_address.is_empty());
    }
}
