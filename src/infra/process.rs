//! External process execution
//!
//! Runs toolchain commands synchronously and captures their output.
//! The orchestrator talks to processes only through [`CommandRunner`],
//! which lets tests substitute a recording fake.

use std::path::Path;
use std::process::Command;

use crate::error::BuildError;

/// Exit code reported when a process was terminated without one (e.g. by a signal)
pub const NO_EXIT_CODE: i32 = -1;

/// Outcome of a single process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Process exit code
    pub exit_code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Whether the caller should treat this invocation as successful
    pub succeeded: bool,
}

impl CommandResult {
    /// Build a result, deriving `succeeded` from the exit code and the
    /// must-succeed flag
    pub fn new(exit_code: i32, stdout: String, stderr: String, must_succeed: bool) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            succeeded: exit_code == 0 || !must_succeed,
        }
    }
}

/// Executes external commands
pub trait CommandRunner {
    /// Run `argv` in `working_dir`, blocking until it exits.
    ///
    /// With `must_succeed`, a non-zero exit becomes [`BuildError::StepFailed`]
    /// tagged with `step`. Otherwise the result is returned as-is.
    fn run(
        &self,
        step: &str,
        argv: &[String],
        working_dir: &Path,
        must_succeed: bool,
    ) -> Result<CommandResult, BuildError>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a new process runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        step: &str,
        argv: &[String],
        working_dir: &Path,
        must_succeed: bool,
    ) -> Result<CommandResult, BuildError> {
        let (program, args) = argv.split_first().ok_or(BuildError::EmptyCommand)?;

        tracing::debug!(
            "Running: {} (in {})",
            argv.join(" "),
            working_dir.display()
        );

        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .output()
            .map_err(|e| BuildError::SpawnFailed {
                program: program.clone(),
                error: e.to_string(),
            })?;

        let exit_code = output.status.code().unwrap_or(NO_EXIT_CODE);
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stdout.trim().is_empty() {
            tracing::debug!("{}", stdout.trim());
        }

        check_result(
            step,
            &argv.join(" "),
            CommandResult::new(exit_code, stdout, stderr, must_succeed),
        )
    }
}

/// Turn an unsuccessful result into [`BuildError::StepFailed`]
pub fn check_result(
    step: &str,
    command: &str,
    result: CommandResult,
) -> Result<CommandResult, BuildError> {
    if result.succeeded {
        return Ok(result);
    }

    tracing::warn!("{step} failed with exit code {}", result.exit_code);
    Err(BuildError::StepFailed {
        step: step.to_string(),
        command: command.to_string(),
        exit_code: result.exit_code,
        stdout: result.stdout,
        stderr: result.stderr,
    })
}
