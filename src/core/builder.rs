//! Build orchestration logic
//!
//! Sequences clean → configure → compile → export for one [`BuildConfig`].
//! Every step is fail-fast: the first error aborts the run and nothing
//! downstream executes. Progress goes to an injected [`BuildReporter`].

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::{COMPILE_COMMANDS_FILE, EXAMPLES_DIR, LIBRARY_FILE, TESTS_DIR};
use crate::core::build_config::{BuildConfig, BuildMode};
use crate::core::clean::clean_build_dir;
use crate::error::SdkBuildError;
use crate::infra::filesystem;
use crate::infra::process::CommandRunner;
use crate::infra::toolchain::CMakeToolchain;

/// A reportable build step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// Remove the build directory
    Clean,
    /// Run the CMake configure step
    Configure,
    /// Run the compile step
    Compile,
    /// Copy compile_commands.json to the project root
    Export,
}

impl BuildStep {
    /// Progress message shown while the step runs
    pub fn description(self) -> &'static str {
        match self {
            Self::Clean => "Cleaning build directory...",
            Self::Configure => "Configuring with CMake...",
            Self::Compile => "Building...",
            Self::Export => "Exporting compile commands...",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Clean => "Clean",
            Self::Configure => "Configure",
            Self::Compile => "Compile",
            Self::Export => "Export",
        };
        f.write_str(name)
    }
}

/// Receives progress from the orchestrator
pub trait BuildReporter {
    /// A step is starting
    fn report_step(&mut self, step: BuildStep);

    /// A step finished successfully
    fn report_success(&mut self, step: BuildStep, message: &str);

    /// A step failed; the error is returned to the caller afterwards
    fn report_failure(&mut self, step: BuildStep, error: &SdkBuildError);
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl BuildReporter for SilentReporter {
    fn report_step(&mut self, _step: BuildStep) {}

    fn report_success(&mut self, _step: BuildStep, _message: &str) {}

    fn report_failure(&mut self, _step: BuildStep, _error: &SdkBuildError) {}
}

/// Summary of a successful build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Build type that was produced
    pub mode: BuildMode,
    /// Parallel jobs passed to the build tool
    pub jobs: NonZeroUsize,
    /// Build directory
    pub build_dir: PathBuf,
    /// Static library archive
    pub library: PathBuf,
    /// Examples output directory
    pub examples_dir: PathBuf,
    /// Tests output directory, when tests were built
    pub tests_dir: Option<PathBuf>,
    /// Where compile_commands.json was copied, if it was
    pub compile_commands: Option<PathBuf>,
}

impl BuildReport {
    /// Whether compile_commands.json was exported to the project root
    pub fn exported_compile_commands(&self) -> bool {
        self.compile_commands.is_some()
    }

    /// All artifact paths, library first
    pub fn artifacts(&self) -> Vec<&Path> {
        let mut artifacts = vec![self.library.as_path(), self.examples_dir.as_path()];
        if let Some(tests_dir) = &self.tests_dir {
            artifacts.push(tests_dir);
        }
        artifacts
    }
}

/// Build orchestrator
#[derive(Debug)]
pub struct BuildOrchestrator<R, P> {
    toolchain: CMakeToolchain,
    runner: R,
    reporter: P,
}

impl<R: CommandRunner, P: BuildReporter> BuildOrchestrator<R, P> {
    /// Create a new build orchestrator
    pub fn new(toolchain: CMakeToolchain, runner: R, reporter: P) -> Self {
        Self {
            toolchain,
            runner,
            reporter,
        }
    }

    /// Get the command runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Get the reporter
    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    /// Run the whole build
    pub fn execute(&mut self, config: &BuildConfig) -> Result<BuildReport, SdkBuildError> {
        let jobs = config.resolved_jobs();
        let build_dir = config.build_dir();
        let project_root = config.project_root();

        tracing::info!(
            "Building {} ({}) with {} jobs",
            project_root.display(),
            config.mode.cmake_build_type(),
            jobs
        );

        if config.clean && build_dir.exists() {
            self.step(BuildStep::Clean, |_| {
                clean_build_dir(&build_dir)?;
                Ok("Cleaned build directory".to_string())
            })?;
        }

        filesystem::create_dir_all(&build_dir)?;

        let configure = self.toolchain.configure_args(
            project_root,
            config.mode,
            config.build_tests,
            config.export_compile_commands,
        );
        self.step(BuildStep::Configure, |runner| {
            runner.run("Configure", &configure, &build_dir, true)?;
            Ok("CMake configured".to_string())
        })?;

        let compile = self.toolchain.build_args(config.verbose, jobs);
        self.step(BuildStep::Compile, |runner| {
            runner.run("Compile", &compile, &build_dir, true)?;
            Ok("Build successful!".to_string())
        })?;

        let compile_commands = if config.export_compile_commands {
            self.export_compile_commands(&build_dir, project_root)?
        } else {
            None
        };

        Ok(BuildReport {
            mode: config.mode,
            jobs,
            library: build_dir.join(LIBRARY_FILE),
            examples_dir: build_dir.join(EXAMPLES_DIR),
            tests_dir: config.build_tests.then(|| build_dir.join(TESTS_DIR)),
            compile_commands,
            build_dir,
        })
    }

    fn export_compile_commands(
        &mut self,
        build_dir: &Path,
        project_root: &Path,
    ) -> Result<Option<PathBuf>, SdkBuildError> {
        let source = build_dir.join(COMPILE_COMMANDS_FILE);
        if !source.is_file() {
            tracing::debug!("{} not generated, skipping export", source.display());
            return Ok(None);
        }

        let destination = project_root.join(COMPILE_COMMANDS_FILE);
        self.step(BuildStep::Export, |_| {
            filesystem::copy_file(&source, &destination)?;
            Ok(format!(
                "Exported {COMPILE_COMMANDS_FILE} to {}",
                destination.display()
            ))
        })?;
        Ok(Some(destination))
    }

    fn step<F>(&mut self, step: BuildStep, f: F) -> Result<(), SdkBuildError>
    where
        F: FnOnce(&R) -> Result<String, SdkBuildError>,
    {
        self.reporter.report_step(step);
        match f(&self.runner) {
            Ok(message) => {
                self.reporter.report_success(step, &message);
                Ok(())
            }
            Err(e) => {
                self.reporter.report_failure(step, &e);
                Err(e)
            }
        }
    }
}
