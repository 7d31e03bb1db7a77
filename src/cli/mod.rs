//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use crate::core::build_config::{find_project_root, BuildMode};
use commands::Commands;
use output::OutputConfig;

/// sdkbuild - Build the AI SDK C++ with CMake and Ninja
///
/// Configures and compiles the project in `<project>/build`.
#[derive(Parser, Debug)]
#[command(name = "sdkbuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub toolchain: ToolchainArgs,

    #[command(flatten)]
    pub build: BuildArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the project is and which tools to use
#[derive(Args, Debug, Clone, Default)]
pub struct ToolchainArgs {
    /// Project root (defaults to the nearest directory with a CMakeLists.txt)
    #[arg(long, global = true, value_name = "PATH")]
    pub project_root: Option<PathBuf>,

    /// CMake binary to use
    #[arg(long, global = true, env = "SDKBUILD_CMAKE", value_name = "PATH")]
    pub cmake: Option<String>,

    /// CMake generator to use
    #[arg(long, global = true, env = "SDKBUILD_GENERATOR", value_name = "NAME")]
    pub generator: Option<String>,
}

impl ToolchainArgs {
    /// Resolve the project root from the flag or the current directory
    pub fn resolve_project_root(&self) -> Result<PathBuf> {
        match &self.project_root {
            Some(root) => {
                if !root.is_dir() {
                    return Err(crate::error::ConfigError::ProjectRootNotFound {
                        path: root.clone(),
                    }
                    .into());
                }
                Ok(root.clone())
            }
            None => {
                let cwd = std::env::current_dir()
                    .context("Failed to determine current directory")?;
                Ok(find_project_root(&cwd))
            }
        }
    }
}

/// Build options
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Build configuration
    #[arg(long, value_enum, ignore_case = true, default_value_t = BuildMode::Debug)]
    pub mode: BuildMode,

    /// Build tests
    #[arg(long)]
    pub tests: bool,

    /// Clean build directory
    #[arg(long)]
    pub clean: bool,

    /// Verbose build
    #[arg(long)]
    pub verbose: bool,

    /// Export compile_commands.json to the project root
    #[arg(long)]
    pub export_compile_commands: bool,

    /// Parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,
}

impl Cli {
    /// Output settings selected on the command line
    pub fn output(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.json)
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = self.output();
        match self.command {
            Some(cmd) => cmd.run(&self.toolchain, output),
            None => commands::build::execute(&self.toolchain, &self.build, output),
        }
    }
}
