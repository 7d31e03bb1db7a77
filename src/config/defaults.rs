//! Default configuration values

/// Fallback number of parallel build jobs when CPU detection fails
pub const DEFAULT_BUILD_JOBS: usize = 4;

/// Build directory name, always relative to the project root
pub const BUILD_DIR_NAME: &str = "build";

/// Default configure/build tool
pub const DEFAULT_CMAKE: &str = "cmake";

/// Default CMake generator
pub const DEFAULT_GENERATOR: &str = "Ninja";

/// File marking a CMake project root
pub const PROJECT_MARKER: &str = "CMakeLists.txt";

/// Compile commands database written by CMake
pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

/// Static library produced by the build
pub const LIBRARY_FILE: &str = "libai-sdk-cpp.a";

/// Examples output directory inside the build directory
pub const EXAMPLES_DIR: &str = "examples";

/// Tests output directory inside the build directory
pub const TESTS_DIR: &str = "tests";

/// Example program suggested after a successful build
pub const EXAMPLE_PROGRAM: &str = "basic_chat";

/// Minimum supported CMake version
pub const MIN_CMAKE_VERSION: &str = "3.16.0";
