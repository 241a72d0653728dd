//! Test utilities for jfdi-lib.
//!
//! Cross-platform shell snippets for tests that run commands through the
//! platform shell (`/bin/sh` on Unix, `cmd.exe` on Windows).

/// A command that prints an environment variable.
#[cfg(unix)]
pub fn shell_echo_env(var: &str) -> String {
  format!("echo \"${}\"", var)
}

#[cfg(windows)]
pub fn shell_echo_env(var: &str) -> String {
  format!("echo %{}%", var)
}

/// A command that exits with `code`.
pub fn exit_with(code: i32) -> String {
  format!("exit {}", code)
}

/// A command that creates an empty file at `path`.
#[cfg(unix)]
pub fn touch_file(path: &str) -> String {
  format!("touch '{}'", path)
}

#[cfg(windows)]
pub fn touch_file(path: &str) -> String {
  format!("type nul > \"{}\"", path)
}

/// Escape a path for embedding in a Lua string literal.
pub fn lua_str(path: &std::path::Path) -> String {
  path.to_string_lossy().replace('\\', "\\\\")
}
