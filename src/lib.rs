//! sdkbuild - Build orchestrator for the AI SDK C++
//!
//! This library drives a CMake/Ninja build: it cleans and prepares the build
//! directory, runs the configure and compile steps, exports
//! `compile_commands.json` and reports the produced artifacts.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Build configuration and orchestration
//! - [`infra`] - Infrastructure layer (filesystem, processes, toolchain)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;

/// Version string with the git revision it was built from, when known
pub fn build_info() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !sha.is_empty() && sha != "VERGEN_IDEMPOTENT_OUTPUT" => {
            format!("{version} ({sha})")
        }
        _ => version.to_string(),
    }
}
