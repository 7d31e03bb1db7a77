//! Clean logic
//!
//! Removes the build directory before a clean build.

use std::path::Path;

use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Result of a clean operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    /// The build directory existed and was removed
    Removed,
    /// There was no build directory to remove
    NothingToClean,
}

/// Remove `build_dir` recursively if it exists
pub fn clean_build_dir(build_dir: &Path) -> Result<CleanOutcome, FilesystemError> {
    if !build_dir.exists() {
        return Ok(CleanOutcome::NothingToClean);
    }

    tracing::info!("Removing {}", build_dir.display());
    filesystem::remove_dir_all(build_dir)?;
    Ok(CleanOutcome::Removed)
}
