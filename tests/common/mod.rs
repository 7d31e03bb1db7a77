//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary CMake project plus a separate directory holding
/// the fake toolchain and an empty user config directory.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Fake tools and their invocation log
    pub tools: TempDir,
    /// User config directory passed via `SDKBUILD_CONFIG_DIR`
    pub config: TempDir,
}

impl TestProject {
    /// Create a new test project with a `CMakeLists.txt`
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            tools: TempDir::new().expect("Failed to create tools directory"),
            config: TempDir::new().expect("Failed to create config directory"),
        };
        project.create_file("CMakeLists.txt", SAMPLE_CMAKELISTS);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Get the build directory path
    pub fn build_dir(&self) -> PathBuf {
        self.dir.path().join("build")
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write the user config file
    pub fn write_user_config(&self, content: &str) {
        std::fs::write(self.config.path().join("config.toml"), content)
            .expect("Failed to write user config");
    }

    /// Path of the log the fake cmake appends to
    pub fn cmake_log_path(&self) -> PathBuf {
        self.tools.path().join("cmake.log")
    }

    /// Invocations recorded by the fake cmake, one `cwd|args` line each
    pub fn cmake_invocations(&self) -> Vec<String> {
        std::fs::read_to_string(self.cmake_log_path())
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Install a fake cmake with the given behavior and return its path
    #[cfg(unix)]
    pub fn install_fake_cmake(&self, behavior: FakeCmake) -> PathBuf {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let path = self.tools.path().join("cmake");
        let script = behavior.script(&self.cmake_log_path());
        {
            let mut file = std::fs::File::create(&path).expect("Failed to create fake cmake");
            file.write_all(script.as_bytes())
                .expect("Failed to write fake cmake");
            file.sync_all().expect("Failed to sync fake cmake");
        }
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake cmake executable");
        path
    }

    /// Run sdkbuild in the project with an isolated environment
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sdkbuild"));
        cmd.current_dir(self.path());
        cmd.env("SDKBUILD_CONFIG_DIR", self.config.path());
        cmd.env_remove("SDKBUILD_CMAKE");
        cmd.env_remove("SDKBUILD_GENERATOR");
        cmd.env("NO_COLOR", "1");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute sdkbuild")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// How the fake cmake behaves
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeCmake {
    /// Exit 1 from the configure step
    pub fail_configure: bool,
    /// Exit 2 from the compile step
    pub fail_build: bool,
    /// Write compile_commands.json when export is requested
    pub generate_compile_commands: bool,
    /// Version printed for `--version`
    pub version: &'static str,
}

impl FakeCmake {
    /// A fake cmake that succeeds at everything
    pub fn working() -> Self {
        Self {
            generate_compile_commands: true,
            version: "3.28.1",
            ..Self::default()
        }
    }

    fn script(self, log: &std::path::Path) -> String {
        format!(
            r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "cmake version {version}"
  exit 0
fi
echo "$(pwd)|$*" >> "{log}"
if [ "$1" = "--build" ]; then
  if [ "{fail_build}" = "true" ]; then
    echo "ninja: build stopped: subcommand failed." >&2
    exit 2
  fi
  mkdir -p examples
  : > libai-sdk-cpp.a
  exit 0
fi
if [ "{fail_configure}" = "true" ]; then
  echo "-- Configuring incomplete, errors occurred!"
  echo "CMake Error at CMakeLists.txt:1 (project): broken" >&2
  exit 1
fi
for arg in "$@"; do
  if [ "$arg" = "-DCMAKE_EXPORT_COMPILE_COMMANDS=ON" ] && [ "{generate}" = "true" ]; then
    echo '[{{"file": "src/client.cpp"}}]' > compile_commands.json
  fi
done
echo "-- Build files have been written to: $(pwd)"
"#,
            version = self.version,
            log = log.display(),
            fail_build = self.fail_build,
            fail_configure = self.fail_configure,
            generate = self.generate_compile_commands,
        )
    }
}

/// Minimal project description for testing
pub const SAMPLE_CMAKELISTS: &str = r#"
cmake_minimum_required(VERSION 3.16)
project(ai-sdk-cpp CXX)
"#;
