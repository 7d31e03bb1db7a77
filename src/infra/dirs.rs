//! Platform-specific directory management
//!
//! Provides the platform-specific config directory.
//! Follows XDG Base Directory Specification on Linux and standard locations on macOS.
//!
//! `SDKBUILD_CONFIG_DIR` overrides the default location.

use std::env;
use std::path::PathBuf;

/// Environment variable name for the config directory override
pub const ENV_CONFIG_DIR: &str = "SDKBUILD_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "sdkbuild";

/// Config file name inside the config directory
const CONFIG_FILE: &str = "config.toml";

/// Platform-specific directory provider for sdkbuild
#[derive(Debug, Clone)]
pub struct SdkBuildDirs {
    config_dir: PathBuf,
}

impl SdkBuildDirs {
    /// Create a new `SdkBuildDirs` instance
    ///
    /// Checks the environment first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/sdkbuild` or `~/.config/sdkbuild`
    /// - macOS: `~/Library/Application Support/sdkbuild`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the user config file path
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for SdkBuildDirs {
    fn default() -> Self {
        Self::new()
    }
}
