//! Error types for sdkbuild
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Errors raised while invoking the external toolchain
#[derive(Error, Debug)]
pub enum BuildError {
    /// External tool exited with a non-zero status
    #[error("{step} failed: '{command}' exited with code {exit_code}")]
    StepFailed {
        step: String,
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    /// External tool could not be started at all
    #[error("Failed to run '{program}': {error}")]
    SpawnFailed { program: String, error: String },

    /// Attempted to run an empty command line
    #[error("Cannot run an empty command")]
    EmptyCommand,
}

impl BuildError {
    /// Exit code of the failed tool, if the failure came from one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::StepFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },

    /// Project root does not exist
    #[error("Project root not found: {path}")]
    ProjectRootNotFound { path: PathBuf },
}

/// Top-level sdkbuild error type
#[derive(Error, Debug)]
pub enum SdkBuildError {
    /// Build error
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}
