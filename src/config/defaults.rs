//! Default configuration values

/// File name (matched case-insensitively) that marks a build target directory
pub const ENTRY_POINT_FILE: &str = "main.go";

/// Name of the binary written for every target
pub const OUTPUT_BINARY_NAME: &str = "main";

/// Default number of concurrent builds
pub const DEFAULT_CONCURRENT_BUILDS: usize = 2;

/// Default external build tool
pub const DEFAULT_BUILD_TOOL: &str = "go";

/// Operating system every target is compiled for
pub const TARGET_OS: &str = "linux";

/// CPU architecture every target is compiled for
pub const TARGET_ARCH: &str = "amd64";

/// Compiler flags that disable optimizations and inlining
pub const DEBUG_GCFLAGS: &str = "all=-N -l";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 32;
