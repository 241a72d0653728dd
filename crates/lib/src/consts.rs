//! Constants shared between the library and the CLI.

/// Build description looked up in the current directory when `--file` is not given.
pub const DEFAULT_SCRIPT: &str = "build.jfdi";

/// Name of the format-version global every build description must set.
pub const VERSION_MARKER: &str = "JFDI_VERSION";

/// The only build-description format version this host implements.
pub const FORMAT_VERSION: i64 = 1;

/// Lifecycle functions every build description must define.
pub const LIFECYCLE_FUNCTIONS: [&str; 5] = ["list_input_files", "clean", "start_build", "build_this", "end_build"];

/// Generic fatal error.
pub const EXIT_FAILURE: i32 = 1;

/// Explicit abort through `die()`.
pub const EXIT_USER_ABORT: i32 = 3;
