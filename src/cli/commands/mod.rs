//! CLI command implementations
//!
//! Building is the default action; other commands are subcommands.

pub mod build;
pub mod doctor;

use anyhow::Result;
use clap::Subcommand;

use super::output::OutputConfig;
use super::ToolchainArgs;

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the CMake toolchain is installed and usable
    Doctor,
}

impl Commands {
    /// Execute the command
    pub fn run(self, toolchain: &ToolchainArgs, output: OutputConfig) -> Result<()> {
        match self {
            Self::Doctor => doctor::execute(toolchain, output),
        }
    }
}
