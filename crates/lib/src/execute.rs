//! Shell command execution.
//!
//! Every command, whether planned by `build_this()` or run directly through
//! `cmd()`, goes through [`run_command`]. Commands block until they finish and
//! a non-zero exit is always fatal.

use std::process::Command;

use tracing::{debug, warn};

use crate::error::{BuildError, Result};

/// Run `cmd` through the platform shell.
///
/// Standard output and standard error are captured separately. Anything on
/// stderr is logged as a warning without failing the command.
///
/// # Returns
///
/// The stdout of the command on success, with trailing whitespace trimmed.
///
/// # Errors
///
/// [`BuildError::CommandFailed`] carrying the exit code when the command exits
/// unsuccessfully, or [`BuildError::Io`] if the shell cannot be spawned.
pub fn run_command(cmd: &str) -> Result<String> {
  let (shell, shell_args) = get_shell();

  let mut command = Command::new(shell);
  command.args(shell_args);
  push_command_arg(&mut command, cmd);

  debug!(shell, "spawning process");

  let output = command.output().map_err(|e| BuildError::io("spawn", shell, e))?;

  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stderr.trim().is_empty() {
    warn!("{}", stderr.trim_end());
  }

  if !output.status.success() {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
      debug!(stdout = %stdout.trim_end(), "command stdout");
    }
    return Err(BuildError::CommandFailed {
      cmd: cmd.to_string(),
      code: output.status.code(),
    });
  }

  let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
  Ok(stdout)
}

/// The shell and the argument that introduces a command string.
///
/// `/bin/sh -c` on Unix and `cmd.exe /C` on Windows, matching what a C
/// toolchain's own build scripts expect.
fn get_shell() -> (&'static str, &'static [&'static str]) {
  #[cfg(unix)]
  {
    ("/bin/sh", &["-c"])
  }

  #[cfg(windows)]
  {
    ("cmd.exe", &["/C"])
  }
}

#[cfg(unix)]
fn push_command_arg(command: &mut Command, cmd: &str) {
  command.arg(cmd);
}

// cmd.exe does its own parsing, so the command line must reach it unquoted.
#[cfg(windows)]
fn push_command_arg(command: &mut Command, cmd: &str) {
  use std::os::windows::process::CommandExt;
  command.raw_arg(cmd);
}
