//! Build command implementation
//!
//! Runs when `sdkbuild` is invoked without a subcommand: resolves the
//! configuration, prints it, runs the orchestrator and shows the summary.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::cli::output::{print_configuration, print_json, print_summary, ConsoleReporter, OutputConfig};
use crate::cli::{BuildArgs, ToolchainArgs};
use crate::core::build_config::BuildConfig;
use crate::core::builder::BuildOrchestrator;
use crate::core::global_config::GlobalConfig;
use crate::infra::dirs::SdkBuildDirs;
use crate::infra::process::ProcessRunner;

/// Turn parsed arguments into a build request
///
/// `--jobs` wins over the user config's `[build] jobs`.
pub fn build_config(project_root: &Path, args: &BuildArgs, global: &GlobalConfig) -> BuildConfig {
    BuildConfig::new(project_root)
        .with_mode(args.mode)
        .with_tests(args.tests)
        .with_clean(args.clean)
        .with_verbose(args.verbose)
        .with_export_compile_commands(args.export_compile_commands)
        .with_jobs(args.jobs.or(global.build.jobs))
}

/// Execute the build
pub fn execute(toolchain_args: &ToolchainArgs, args: &BuildArgs, output: OutputConfig) -> Result<()> {
    let project_root = toolchain_args.resolve_project_root()?;

    let dirs = SdkBuildDirs::new();
    let global = GlobalConfig::load(&dirs).context("Failed to load user configuration")?;
    let toolchain = global.toolchain(
        toolchain_args.cmake.clone(),
        toolchain_args.generator.clone(),
    );

    let config = build_config(&project_root, args, &global);

    if output.is_human() {
        print_configuration(&config, config.resolved_jobs());
    }

    let started = Instant::now();
    let mut orchestrator = BuildOrchestrator::new(
        toolchain,
        ProcessRunner::new(),
        ConsoleReporter::new(output),
    );
    let report = orchestrator
        .execute(&config)
        .with_context(|| format!("Build of {} failed", project_root.display()))?;

    tracing::info!("Build finished in {:?}", started.elapsed());

    if output.json {
        print_json(&report)?;
    } else if !output.quiet {
        println!();
        print_summary(&report, Some(started.elapsed()));
    }

    Ok(())
}
