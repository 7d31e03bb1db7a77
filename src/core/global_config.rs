//! Global configuration management
//!
//! Reads user defaults from `config.toml` in the config directory.
//! Command-line flags always take precedence over these values.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::infra::dirs::SdkBuildDirs;
use crate::infra::toolchain::CMakeToolchain;

/// Global configuration for sdkbuild
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default build options
    #[serde(default)]
    pub build: BuildDefaults,

    /// Toolchain overrides
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

/// Default build options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDefaults {
    /// Default number of parallel jobs
    pub jobs: Option<NonZeroUsize>,
}

/// Toolchain overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Path or name of the cmake binary
    pub cmake: Option<String>,

    /// CMake generator
    pub generator: Option<String>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// A missing file yields the default configuration.
    pub fn load(dirs: &SdkBuildDirs) -> Result<Self, ConfigError> {
        Self::load_from_path(&dirs.config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Build the toolchain, preferring explicit overrides over config values
    pub fn toolchain(&self, cmake: Option<String>, generator: Option<String>) -> CMakeToolchain {
        let defaults = CMakeToolchain::default();
        let cmake = cmake
            .or_else(|| self.toolchain.cmake.clone())
            .unwrap_or_else(|| defaults.cmake_path().display().to_string());
        let generator = generator
            .or_else(|| self.toolchain.generator.clone())
            .unwrap_or_else(|| defaults.generator().to_string());
        CMakeToolchain::new(cmake, generator)
    }
}
