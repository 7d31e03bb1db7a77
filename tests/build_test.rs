//! Integration tests for the default `sdkbuild` build command
//!
//! Drives the real binary against a fake `cmake` script that records its
//! arguments, so the whole clean → configure → compile → export pipeline
//! runs without a real toolchain.

#![cfg(unix)]

mod common;

use common::{FakeCmake, TestProject};
use predicates::prelude::*;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn run_build(project: &TestProject, cmake: &std::path::Path, args: &[&str]) -> std::process::Output {
    let root = project.path();
    let root = root.to_str().expect("temp path is UTF-8");
    let cmake = cmake.to_str().expect("temp path is UTF-8");
    let mut all = vec!["--project-root", root, "--cmake", cmake, "--generator", "Ninja"];
    all.extend_from_slice(args);
    project.run(&all)
}

#[test]
fn test_release_build_on_fresh_directory() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());
    assert!(!project.build_dir().exists());

    let output = run_build(&project, &cmake, &["--mode", "release", "--jobs", "3"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(predicate::path::is_dir().eval(&project.build_dir()));

    let calls = project.cmake_invocations();
    assert_eq!(calls.len(), 2, "calls: {calls:?}");

    let (configure_cwd, configure_args) = calls[0].split_once('|').unwrap();
    assert!(configure_cwd.ends_with("/build"));
    assert!(configure_args.contains("-G Ninja"));
    assert!(configure_args.contains("-DCMAKE_BUILD_TYPE=Release"));
    assert!(configure_args.contains("-DBUILD_TESTS=OFF"));
    assert!(configure_args.contains("-DBUILD_EXAMPLES=ON"));
    assert!(!configure_args.contains("CMAKE_EXPORT_COMPILE_COMMANDS"));

    let (compile_cwd, compile_args) = calls[1].split_once('|').unwrap();
    assert!(compile_cwd.ends_with("/build"));
    assert_eq!(compile_args, "--build . --parallel 3");

    let out = stdout(&output);
    assert!(out.contains("Build Configuration"));
    assert!(out.contains("RELEASE"));
    assert!(out.contains("Build Completed"));
    assert!(out.contains("libai-sdk-cpp.a"));
    assert!(!out.contains("Tests:"));
}

#[test]
fn test_debug_is_default_mode() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());

    let output = run_build(&project, &cmake, &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let calls = project.cmake_invocations();
    assert!(calls[0].contains("-DCMAKE_BUILD_TYPE=Debug"));
}

#[test]
fn test_tests_and_verbose_flags() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());

    let output = run_build(&project, &cmake, &["--tests", "--verbose", "-j", "2"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let calls = project.cmake_invocations();
    assert!(calls[0].contains("-DBUILD_TESTS=ON"));
    assert!(calls[1].ends_with("--build . --verbose --parallel 2"));

    let out = stdout(&output);
    assert!(out.contains("Tests:"));
    assert!(out.contains("ctest"));
}

#[test]
fn test_configure_failure_stops_before_compile() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake {
        fail_configure: true,
        ..FakeCmake::working()
    });

    let output = run_build(&project, &cmake, &["--export-compile-commands"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(project.cmake_invocations().len(), 1);
    assert!(!project.file_exists("compile_commands.json"));

    let err = stderr(&output);
    assert!(err.contains("Configure failed"));
    assert!(err.contains("exited with code 1"));
    assert!(err.contains("STDERR:"));
    assert!(err.contains("CMake Error at CMakeLists.txt:1"));
    assert!(err.contains("Configuring incomplete"));
    assert!(!stdout(&output).contains("Build Completed"));
}

#[test]
fn test_json_failure_keeps_stdout_clean() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake {
        fail_configure: true,
        ..FakeCmake::working()
    });

    let output = run_build(&project, &cmake, &["--json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).trim().is_empty(), "stdout: {}", stdout(&output));
    let err = stderr(&output);
    assert!(err.contains("Caused by: Configure failed"));
    assert_eq!(err.matches("exited with code 1").count(), 1, "stderr: {err}");
}

#[test]
fn test_compile_failure_reports_exit_code() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake {
        fail_build: true,
        ..FakeCmake::working()
    });

    let output = run_build(&project, &cmake, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(project.cmake_invocations().len(), 2);
    let err = stderr(&output);
    assert!(err.contains("Compile failed"));
    assert!(err.contains("exited with code 2"));
    assert!(err.contains("subcommand failed"));
}

#[test]
fn test_export_replaces_previous_copy() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());
    project.create_file("compile_commands.json", "[\"stale\"]");

    let output = run_build(&project, &cmake, &["--export-compile-commands"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.cmake_invocations()[0].contains("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON"));
    let exported = project.read_file("compile_commands.json");
    assert!(exported.contains("src/client.cpp"));
    assert!(!exported.contains("stale"));
    assert!(stdout(&output).contains("Exported compile_commands.json"));
}

#[test]
fn test_export_without_generated_file_succeeds() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake {
        generate_compile_commands: false,
        ..FakeCmake::working()
    });

    let output = run_build(&project, &cmake, &["--export-compile-commands"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!project.file_exists("compile_commands.json"));
}

#[test]
fn test_existing_build_contents_survive_without_clean() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());
    project.create_file("build/keep.txt", "mine");

    let output = run_build(&project, &cmake, &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(project.read_file("build/keep.txt"), "mine");
}

#[test]
fn test_clean_removes_stale_build_contents() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());
    project.create_file("build/CMakeCache.txt", "stale cache");

    let output = run_build(&project, &cmake, &["--clean"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!project.file_exists("build/CMakeCache.txt"));
    assert!(project.build_dir().is_dir());
    assert!(stdout(&output).contains("Cleaned build directory"));
}

#[test]
fn test_json_output_is_report() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());

    let output = run_build(&project, &cmake, &["--json", "--tests", "--jobs", "5"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["mode"], "debug");
    assert_eq!(report["jobs"], 5);
    assert!(report["library"]
        .as_str()
        .unwrap()
        .ends_with("build/libai-sdk-cpp.a"));
    assert!(report["tests_dir"].as_str().unwrap().ends_with("build/tests"));
    assert!(report["compile_commands"].is_null());
}

#[test]
fn test_quiet_prints_nothing_on_success() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());

    let output = run_build(&project, &cmake, &["--quiet"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).trim().is_empty());
}

#[test]
fn test_user_config_jobs_used_when_flag_missing() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());
    project.write_user_config("[build]\njobs = 7\n");

    let output = run_build(&project, &cmake, &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.cmake_invocations()[1].ends_with("--parallel 7"));

    let output = run_build(&project, &cmake, &["--jobs", "9"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.cmake_invocations()[3].ends_with("--parallel 9"));
}

#[test]
fn test_invalid_user_config_is_fatal() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());
    project.write_user_config("[build\n");

    let output = run_build(&project, &cmake, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(project.cmake_invocations().is_empty());
    assert!(stderr(&output).contains("Failed to parse config file"));
}

#[test]
fn test_missing_cmake_suggests_doctor() {
    let project = TestProject::new();
    let missing = project.tools.path().join("no-such-cmake");

    let output = run_build(&project, &missing, &[]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Failed to run"));
    assert!(err.contains("sdkbuild doctor"));
}

#[test]
fn test_zero_jobs_rejected_before_building() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());

    let output = run_build(&project, &cmake, &["--jobs", "0"]);

    assert!(!output.status.success());
    assert!(project.cmake_invocations().is_empty());
    assert!(!project.build_dir().exists());
}

#[test]
fn test_project_root_discovered_from_subdirectory() {
    let project = TestProject::new();
    let cmake = project.install_fake_cmake(FakeCmake::working());
    project.create_file("src/client.cpp", "int main() {}");

    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_sdkbuild"));
    cmd.current_dir(project.path().join("src"))
        .env("SDKBUILD_CONFIG_DIR", project.config.path())
        .env("NO_COLOR", "1")
        .args(["--cmake", cmake.to_str().unwrap(), "--generator", "Ninja"]);
    let output = cmd.output().expect("Failed to execute sdkbuild");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.build_dir().is_dir());
    assert!(!project.path().join("src").join("build").exists());
}
