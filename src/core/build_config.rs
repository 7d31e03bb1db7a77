//! Build request configuration
//!
//! A [`BuildConfig`] is built once per invocation from user input and never
//! mutated afterwards. The build directory is always derived from the project
//! root.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::{BUILD_DIR_NAME, DEFAULT_BUILD_JOBS, PROJECT_MARKER};

/// CMake build type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Unoptimized build with debug info
    #[default]
    Debug,
    /// Optimized build
    Release,
}

impl BuildMode {
    /// Value for `CMAKE_BUILD_TYPE`
    pub fn cmake_build_type(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Release => write!(f, "RELEASE"),
        }
    }
}

/// One build request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Build type
    pub mode: BuildMode,
    /// Build the test suite
    pub build_tests: bool,
    /// Remove the build directory first
    pub clean: bool,
    /// Ask the build tool for verbose output
    pub verbose: bool,
    /// Export `compile_commands.json` to the project root
    pub export_compile_commands: bool,
    /// Requested parallel jobs; detected when unset
    pub jobs: Option<NonZeroUsize>,
    project_root: PathBuf,
}

impl BuildConfig {
    /// Create a default debug build of the project at `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            mode: BuildMode::Debug,
            build_tests: false,
            clean: false,
            verbose: false,
            export_compile_commands: false,
            jobs: None,
            project_root: project_root.into(),
        }
    }

    /// Set the build mode
    #[must_use]
    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable building tests
    #[must_use]
    pub fn with_tests(mut self, build_tests: bool) -> Self {
        self.build_tests = build_tests;
        self
    }

    /// Enable or disable cleaning the build directory
    #[must_use]
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Enable or disable verbose tool output
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable or disable compile commands export
    #[must_use]
    pub fn with_export_compile_commands(mut self, export: bool) -> Self {
        self.export_compile_commands = export;
        self
    }

    /// Set the requested job count
    #[must_use]
    pub fn with_jobs(mut self, jobs: Option<NonZeroUsize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Project root
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build directory, always `<project_root>/build`
    pub fn build_dir(&self) -> PathBuf {
        self.project_root.join(BUILD_DIR_NAME)
    }

    /// Job count to pass to the build tool
    pub fn resolved_jobs(&self) -> NonZeroUsize {
        resolve_jobs(self.jobs, detect_parallelism())
    }
}

/// Pick the job count: requested, else detected, else [`DEFAULT_BUILD_JOBS`]
pub fn resolve_jobs(requested: Option<NonZeroUsize>, detected: Option<usize>) -> NonZeroUsize {
    requested
        .or_else(|| detected.and_then(NonZeroUsize::new))
        .or_else(|| NonZeroUsize::new(DEFAULT_BUILD_JOBS))
        .unwrap_or(NonZeroUsize::MIN)
}

/// Number of logical CPUs, if it can be determined
pub fn detect_parallelism() -> Option<usize> {
    match num_cpus::get() {
        0 => None,
        n => Some(n),
    }
}

/// Find the project root for `start`
///
/// Walks up from `start` to the nearest directory containing `CMakeLists.txt`.
/// Falls back to `start` itself when no ancestor has one.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).is_file())
        .unwrap_or(start)
        .to_path_buf()
}
