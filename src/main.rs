//! sdkbuild CLI - Build orchestrator for the AI SDK C++
//!
//! Entry point for the sdkbuild command-line application.

use anyhow::Result;
use clap::Parser;

use sdkbuild::cli::output::display_error;
use sdkbuild::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose also raises our own log level
    let level = if cli.build.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("sdkbuild {}", sdkbuild::build_info());

    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
