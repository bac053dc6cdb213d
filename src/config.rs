//! Runtime configuration for the relay.
//!
//! The configuration is built once at start-up and handed to the store
//! adapter, so tests can point independent registries at separate
//! directories.

use crate::endpoint::adapters::STORE_FILE_NAME;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "VAULT_RELAY_CONFIG_DIR";

/// Directory name created under the platform configuration directory.
pub const APP_DIR_NAME: &str = "obsidian-mcp";

/// Location of the persisted endpoint store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl RelayConfig {
    /// Resolves the configuration from the process environment.
    ///
    /// Uses [`CONFIG_DIR_ENV`] when it is set and non-empty, otherwise
    /// `<platform config dir>/obsidian-mcp`.
    #[must_use]
    pub fn from_environment() -> Self {
        Self::resolve(std::env::var_os(CONFIG_DIR_ENV))
    }

    /// Uses `dir` as the configuration directory.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        let config_dir = dir.into();
        let config_file = config_dir.join(STORE_FILE_NAME);
        Self {
            config_dir,
            config_file,
        }
    }

    /// Returns the directory holding the store file.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the full path of the store file.
    #[must_use]
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    fn resolve(override_dir: Option<OsString>) -> Self {
        match override_dir.filter(|value| !value.is_empty()) {
            Some(dir) => Self::with_dir(dir),
            None => Self::with_dir(platform_config_base().join(APP_DIR_NAME)),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::from_environment()
    }
}

/// Returns the per-user configuration base directory.
///
/// Falls back to `~/.config`, then `./.config`, when the platform lookup
/// yields nothing.
fn platform_config_base() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    })
}
