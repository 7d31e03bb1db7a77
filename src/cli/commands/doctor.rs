//! CLI command for `sdkbuild doctor`
//!
//! Checks toolchain dependencies and reports issues with suggestions.

use anyhow::{Context, Result};

use crate::cli::output::{print_detail, print_info, print_success, print_warning, status, OutputConfig};
use crate::cli::ToolchainArgs;
use crate::core::doctor::run_doctor;
use crate::core::global_config::GlobalConfig;
use crate::infra::dirs::SdkBuildDirs;

/// Execute the doctor command
pub fn execute(toolchain_args: &ToolchainArgs, output: OutputConfig) -> Result<()> {
    let project_dir = toolchain_args.resolve_project_root()?;
    let dirs = SdkBuildDirs::new();
    // A broken config file is reported as an issue below, not fatal here
    let global = GlobalConfig::load(&dirs).unwrap_or_default();
    let toolchain = global.toolchain(
        toolchain_args.cmake.clone(),
        toolchain_args.generator.clone(),
    );

    let report = run_doctor(&toolchain, &project_dir, &dirs);

    if output.json {
        let json_result = serde_json::json!({
            "status": if report.all_passed() { "success" } else if report.all_required_passed() { "warning" } else { "error" },
            "build_info": crate::build_info(),
            "checks": report.checks,
            "config_issues": report.config_issues,
            "passed_count": report.passed_count(),
            "total_count": report.checks.len()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json_result).context("Failed to serialize report")?
        );

        if !report.all_required_passed() {
            anyhow::bail!("Missing required dependencies");
        }
        return Ok(());
    }

    if output.quiet {
        let failed_required = report.failed_required();
        if !failed_required.is_empty() {
            for check in failed_required {
                eprintln!("{} Missing required: {}", status::ERROR, check.name);
            }
            anyhow::bail!("Missing required dependencies");
        }
        return Ok(());
    }

    print_info("Checking build toolchain...");
    println!();

    for check in &report.checks {
        let version_str = check
            .version
            .as_ref()
            .map(|v| format!(" (v{v})"))
            .unwrap_or_default();

        let required_str = if check.required { "" } else { " [optional]" };

        if check.passed {
            println!("  {} {}{version_str}{required_str}", status::SUCCESS, check.name);
            if let Some(path) = &check.path {
                print_detail(&path.display().to_string());
            }
        } else {
            println!("  {} {}{required_str}", status::ERROR, check.name);
            if let Some(error) = &check.error {
                print_detail(&format!("Error: {error}"));
            }
            if let Some(suggestion) = &check.suggestion {
                print_detail(&format!("Suggestion: {suggestion}"));
            }
        }
    }

    if !report.config_issues.is_empty() {
        println!();
        print_warning("Configuration issues:");
        for issue in &report.config_issues {
            print_detail(&format!("• {issue}"));
        }
    }

    println!();
    let passed = report.passed_count();
    let total = report.checks.len();

    if report.all_passed() {
        print_success(&format!("All checks passed ({passed}/{total})"));
    } else if report.all_required_passed() {
        print_warning(&format!("{passed}/{total} checks passed"));
        print_detail("The toolchain is usable.");
    } else {
        println!("{} {passed}/{total} checks passed", status::ERROR);
        anyhow::bail!("Missing required dependencies. Run 'sdkbuild doctor' for details.");
    }

    Ok(())
}
