//! Doctor command logic
//!
//! Checks that the CMake toolchain is installed and usable, and reports
//! issues with suggestions.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::{MIN_CMAKE_VERSION, PROJECT_MARKER};
use crate::core::global_config::GlobalConfig;
use crate::infra::dirs::SdkBuildDirs;
use crate::infra::toolchain::CMakeToolchain;

/// Result of a single dependency check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Name of the dependency being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version if available
    pub version: Option<String>,
    /// Resolved location on PATH
    pub path: Option<PathBuf>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
    /// Whether this is a required or optional dependency
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, version: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            version,
            path: None,
            error: None,
            suggestion: None,
            required,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            version: None,
            path: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
            required,
        }
    }

    #[must_use]
    fn at(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// Overall doctor report
#[derive(Debug, Default, Serialize)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Configuration issues found
    pub config_issues: Vec<String>,
}

impl DoctorReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check result
    pub fn add_check(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Add a configuration issue
    pub fn add_config_issue(&mut self, issue: String) {
        self.config_issues.push(issue);
    }

    /// Check if all required checks passed
    pub fn all_required_passed(&self) -> bool {
        self.checks
            .iter()
            .filter(|c| c.required)
            .all(|c| c.passed)
    }

    /// Check if all checks passed (including optional)
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed) && self.config_issues.is_empty()
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get all failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .collect()
    }
}

/// Run `command --version` and extract the version it prints
pub fn check_command_version(command: &Path) -> Option<String> {
    std::process::Command::new(command)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let combined = format!("{stdout}{stderr}");
                extract_version(&combined)
            } else {
                None
            }
        })
}

/// Extract version string from command output
fn extract_version(output: &str) -> Option<String> {
    // Matches "3.28.1", "1.11.1.git.kitware.jobserver-1" (prefix), "v4.0.0-rc1"
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse a possibly two-component version ("3.16") as semver
fn parse_version(version: &str) -> Option<semver::Version> {
    let core = version.split('-').next()?;
    let padded = match core.matches('.').count() {
        1 => format!("{core}.0"),
        _ => core.to_string(),
    };
    semver::Version::parse(&padded).ok()
}

/// Whether `version` satisfies [`MIN_CMAKE_VERSION`]
pub fn meets_min_cmake(version: &str) -> bool {
    let Ok(requirement) = semver::VersionReq::parse(&format!(">={MIN_CMAKE_VERSION}")) else {
        return false;
    };
    parse_version(version).is_some_and(|v| requirement.matches(&v))
}

/// Check the configure/build tool
pub fn check_cmake(toolchain: &CMakeToolchain) -> CheckResult {
    let name = "CMake";
    let Some(path) = toolchain.locate() else {
        return CheckResult::fail(
            name,
            &format!("'{}' not found in PATH", toolchain.cmake_path().display()),
            Some("Install CMake from https://cmake.org/download/ or use your package manager"),
            true,
        );
    };

    match check_command_version(&path) {
        Some(version) if meets_min_cmake(&version) => {
            CheckResult::pass(name, Some(version), true).at(path)
        }
        Some(version) => CheckResult::fail(
            name,
            &format!("CMake {version} is older than the required {MIN_CMAKE_VERSION}"),
            Some("Upgrade CMake to a newer release"),
            true,
        )
        .at(path),
        None => CheckResult::fail(
            name,
            "Could not determine CMake version",
            Some("Check that 'cmake --version' works"),
            true,
        )
        .at(path),
    }
}

/// Check the program backing the configured generator
pub fn check_generator(toolchain: &CMakeToolchain) -> Option<CheckResult> {
    let program = toolchain.generator_program()?;
    let name = format!("{} generator ({program})", toolchain.generator());

    let result = match which::which(program) {
        Ok(path) => CheckResult::pass(&name, check_command_version(&path), true).at(path),
        Err(_) => CheckResult::fail(
            &name,
            &format!("{program} not found in PATH"),
            Some("Install it with your package manager or pick another generator with --generator"),
            true,
        ),
    };
    Some(result)
}

/// Check CTest availability (optional, for running tests)
pub fn check_ctest() -> CheckResult {
    match which::which("ctest") {
        Ok(path) => CheckResult::pass("CTest", check_command_version(&path), false).at(path),
        Err(_) => CheckResult::fail(
            "CTest",
            "ctest not found in PATH",
            Some("CTest ships with CMake; needed only to run tests (optional)"),
            false,
        ),
    }
}

/// Check the project and user configuration
pub fn check_project_config(project_dir: &Path, dirs: &SdkBuildDirs) -> Vec<String> {
    let mut issues = Vec::new();

    if !project_dir.join(PROJECT_MARKER).is_file() {
        issues.push(format!(
            "No {PROJECT_MARKER} found in {}",
            project_dir.display()
        ));
    }

    if let Err(e) = GlobalConfig::load(dirs) {
        issues.push(e.to_string());
    }

    issues
}

/// Run all doctor checks
pub fn run_doctor(toolchain: &CMakeToolchain, project_dir: &Path, dirs: &SdkBuildDirs) -> DoctorReport {
    let mut report = DoctorReport::new();

    report.add_check(check_cmake(toolchain));
    if let Some(check) = check_generator(toolchain) {
        report.add_check(check);
    }
    report.add_check(check_ctest());

    for issue in check_project_config(project_dir, dirs) {
        report.add_config_issue(issue);
    }

    report
}
