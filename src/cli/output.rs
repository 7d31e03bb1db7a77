//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying spinners, colored status
//! messages, the configuration table and the final build summary.

use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use tabled::builder::Builder;
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

use crate::config::defaults::EXAMPLE_PROGRAM;
use crate::core::build_config::BuildConfig;
use crate::core::builder::{BuildReport, BuildReporter, BuildStep};
use crate::error::{BuildError, SdkBuildError};

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// How much the CLI prints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything but errors
    pub quiet: bool,
    /// Print machine-readable JSON instead of text
    pub json: bool,
}

impl OutputConfig {
    /// Create an output configuration
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Whether human-readable text should be printed
    pub fn is_human(self) -> bool {
        !self.quiet && !self.json
    }
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print a success line
pub fn print_success(message: &str) {
    println!(
        "{} {}",
        status::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
        message.if_supports_color(Stream::Stdout, |s| s.green())
    );
}

/// Print an error line
pub fn print_error(message: &str) {
    eprintln!(
        "{} {}",
        status::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
        message.if_supports_color(Stream::Stderr, |s| s.red())
    );
}

/// Print a warning line
pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        status::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
        message.if_supports_color(Stream::Stderr, |s| s.yellow())
    );
}

/// Print an info line
pub fn print_info(message: &str) {
    println!(
        "{} {}",
        status::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
        message
    );
}

/// Print an indented detail line
pub fn print_detail(message: &str) {
    println!("    {}", message.if_supports_color(Stream::Stdout, |s| s.dimmed()));
}

/// Print an indented detail line on stderr
pub fn print_error_detail(message: &str) {
    eprintln!("    {}", message.if_supports_color(Stream::Stderr, |s| s.dimmed()));
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{json}");
    Ok(())
}

/// Human-readable duration
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{secs}.{:02}s", millis / 10)
    } else {
        format!("{millis}ms")
    }
}

fn mark(flag: bool) -> &'static str {
    if flag {
        status::SUCCESS
    } else {
        status::ERROR
    }
}

/// One row of the configuration table
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct ConfigurationRow {
    #[tabled(rename = "Setting")]
    pub setting: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl ConfigurationRow {
    fn new(setting: &'static str, value: impl Into<String>) -> Self {
        Self {
            setting,
            value: value.into(),
        }
    }
}

/// Rows of the configuration table
pub fn configuration_rows(config: &BuildConfig, jobs: NonZeroUsize) -> Vec<ConfigurationRow> {
    vec![
        ConfigurationRow::new("Project root", config.project_root().display().to_string()),
        ConfigurationRow::new("Build directory", config.build_dir().display().to_string()),
        ConfigurationRow::new("Build mode", config.mode.to_string()),
        ConfigurationRow::new("With tests", mark(config.build_tests)),
        ConfigurationRow::new("Clean build", mark(config.clean)),
        ConfigurationRow::new(
            "Export compile commands",
            mark(config.export_compile_commands),
        ),
        ConfigurationRow::new("Parallel jobs", jobs.to_string()),
    ]
}

/// Render the configuration rows as a rounded table titled `title`
pub fn render_table(title: &str, rows: &[ConfigurationRow]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Panel::header(title))
        .to_string()
}

/// Print the configuration table
pub fn print_configuration(config: &BuildConfig, jobs: NonZeroUsize) {
    let table = render_table("Build Configuration", &configuration_rows(config, jobs));
    println!("{}", table.if_supports_color(Stream::Stdout, |s| s.cyan()));
}

/// Lines of the final summary panel
pub fn summary_lines(report: &BuildReport, elapsed: Option<Duration>) -> Vec<String> {
    let mut lines = vec!["Build Completed".to_string(), String::new()];

    lines.push("Library output:".to_string());
    lines.push(format!("  {}", report.library.display()));
    lines.push(String::new());
    lines.push("Examples:".to_string());
    lines.push(format!("  {}", report.examples_dir.display()));
    lines.push(String::new());

    if let Some(tests_dir) = &report.tests_dir {
        lines.push("Tests:".to_string());
        lines.push(format!("  {}", tests_dir.display()));
        lines.push("  Run: cd build && ctest".to_string());
        lines.push(String::new());
    }

    if let Some(compile_commands) = &report.compile_commands {
        lines.push("Compile commands:".to_string());
        lines.push(format!("  {}", compile_commands.display()));
        lines.push(String::new());
    }

    lines.push("Run example:".to_string());
    lines.push("  export OPENAI_API_KEY=your_key".to_string());
    lines.push(format!(
        "  {}",
        report.examples_dir.join(EXAMPLE_PROGRAM).display()
    ));

    if let Some(elapsed) = elapsed {
        lines.push(String::new());
        lines.push(format!("Finished in {}", format_duration(elapsed)));
    }

    lines
}

/// Draw `lines` inside a single-column box titled `title`
pub fn render_panel(title: &str, lines: &[String]) -> String {
    let mut builder = Builder::default();
    for line in lines {
        builder.push_record([line.as_str()]);
    }
    builder
        .build()
        .with(Style::rounded())
        .with(Panel::header(title))
        .to_string()
}

/// Print the success panel
pub fn print_summary(report: &BuildReport, elapsed: Option<Duration>) {
    let panel = render_panel("Success", &summary_lines(report, elapsed));
    println!("{}", panel.if_supports_color(Stream::Stdout, |s| s.green()));
}

/// Console implementation of [`BuildReporter`]
///
/// Shows a spinner per step and a checkmark line when it completes.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    output: OutputConfig,
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    /// Create a reporter honoring the output configuration
    pub fn new(output: OutputConfig) -> Self {
        Self {
            output,
            spinner: None,
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl BuildReporter for ConsoleReporter {
    fn report_step(&mut self, step: BuildStep) {
        tracing::info!("{}", step.description());
        self.clear_spinner();
        if self.output.is_human() {
            self.spinner = Some(create_spinner(step.description()));
        }
    }

    fn report_success(&mut self, _step: BuildStep, message: &str) {
        self.clear_spinner();
        if self.output.is_human() {
            print_success(message);
        }
    }

    fn report_failure(&mut self, step: BuildStep, error: &SdkBuildError) {
        self.clear_spinner();
        tracing::debug!("{step} failed: {error}");
    }
}

impl Drop for ConsoleReporter {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}

/// Display an error with its cause chain, captured tool output and a hint
pub fn display_error(error: &anyhow::Error) {
    print_error(&format!("Error: {error}"));
    for cause in error.chain().skip(1) {
        print_error_detail(&format!("Caused by: {cause}"));
    }

    let build_error = error
        .chain()
        .find_map(|cause| match cause.downcast_ref::<SdkBuildError>() {
            Some(SdkBuildError::Build(e)) => Some(e),
            _ => cause.downcast_ref::<BuildError>(),
        });

    match build_error {
        Some(BuildError::StepFailed {
            command,
            stdout,
            stderr,
            ..
        }) => {
            eprintln!();
            print_error(&format!("Command failed: {command}"));
            if !stdout.trim().is_empty() {
                eprintln!(
                    "{}\n{}",
                    "STDOUT:".if_supports_color(Stream::Stderr, |s| s.yellow()),
                    stdout.trim_end()
                );
            }
            if !stderr.trim().is_empty() {
                eprintln!(
                    "{}\n{}",
                    "STDERR:".if_supports_color(Stream::Stderr, |s| s.red()),
                    stderr.trim_end()
                );
            }
        }
        Some(BuildError::SpawnFailed { program, .. }) => {
            eprintln!();
            print_warning(&format!(
                "Is '{program}' installed? Run 'sdkbuild doctor' to check your toolchain."
            ));
        }
        _ => {}
    }
}
