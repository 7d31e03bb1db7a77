//! Toolchain management
//!
//! Knows how to spell CMake configure and build invocations.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::config::defaults::{DEFAULT_CMAKE, DEFAULT_GENERATOR};
use crate::core::build_config::BuildMode;

/// CMake toolchain wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CMakeToolchain {
    /// Path to the cmake binary
    cmake_path: PathBuf,
    /// Generator passed to `-G`
    generator: String,
}

impl CMakeToolchain {
    /// Create a new CMake toolchain wrapper
    pub fn new(cmake_path: impl Into<PathBuf>, generator: impl Into<String>) -> Self {
        Self {
            cmake_path: cmake_path.into(),
            generator: generator.into(),
        }
    }

    /// Get the path to the cmake binary
    pub fn cmake_path(&self) -> &Path {
        &self.cmake_path
    }

    /// Get the generator name
    pub fn generator(&self) -> &str {
        &self.generator
    }

    /// Program that backs the generator, if it needs one on PATH
    pub fn generator_program(&self) -> Option<&'static str> {
        let generator = self.generator.to_ascii_lowercase();
        if generator.contains("ninja") {
            Some("ninja")
        } else if generator.contains("makefiles") {
            Some("make")
        } else {
            None
        }
    }

    /// Arguments for the configure step
    ///
    /// `cmake <root> -G <generator> -DCMAKE_BUILD_TYPE=<mode> -DBUILD_TESTS=<ON|OFF>
    /// -DBUILD_EXAMPLES=ON [-DCMAKE_EXPORT_COMPILE_COMMANDS=ON]`
    pub fn configure_args(
        &self,
        project_root: &Path,
        mode: BuildMode,
        build_tests: bool,
        export_compile_commands: bool,
    ) -> Vec<String> {
        let mut args = vec![
            self.cmake_path.display().to_string(),
            project_root.display().to_string(),
            "-G".to_string(),
            self.generator.clone(),
            format!("-DCMAKE_BUILD_TYPE={}", mode.cmake_build_type()),
            format!("-DBUILD_TESTS={}", on_off(build_tests)),
            "-DBUILD_EXAMPLES=ON".to_string(),
        ];

        if export_compile_commands {
            args.push("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON".to_string());
        }

        args
    }

    /// Arguments for the compile step: `cmake --build . [--verbose] --parallel <N>`
    pub fn build_args(&self, verbose: bool, jobs: NonZeroUsize) -> Vec<String> {
        let mut args = vec![
            self.cmake_path.display().to_string(),
            "--build".to_string(),
            ".".to_string(),
        ];

        if verbose {
            args.push("--verbose".to_string());
        }

        args.push("--parallel".to_string());
        args.push(jobs.to_string());
        args
    }

    /// Locate the cmake binary on PATH
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.cmake_path).ok()
    }
}

impl Default for CMakeToolchain {
    fn default() -> Self {
        Self::new(DEFAULT_CMAKE, DEFAULT_GENERATOR)
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}
