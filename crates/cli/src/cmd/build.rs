//! Implementation of a `jfdi` build run.
//!
//! Loads the build description, drives it through its lifecycle and reports
//! the elapsed time. With `--clean` only `clean()` runs.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use jfdi_lib::platform::os::TargetOs;
use jfdi_lib::vars::CliVars;
use jfdi_lib::{BuildOptions, run_build};

use crate::output::{format_duration, print_success, print_warning};

/// Command-line arguments for a build run.
pub struct BuildArgs {
  pub file: Option<PathBuf>,
  pub clean: bool,
  pub force: bool,
  pub target_os: Option<TargetOs>,
  /// Raw `KEY[=VALUE]` tokens from `-V` and trailing arguments.
  pub vars: Vec<String>,
}

/// Execute a build.
///
/// # Errors
///
/// Returns the [`BuildError`](jfdi_lib::BuildError) that stopped the run; the
/// caller maps it to an exit code.
pub fn cmd_build(args: BuildArgs) -> Result<()> {
  let vars = CliVars::parse(&args.vars);
  if !vars.is_empty() {
    debug!("build variables: {}", vars);
  }

  let options = BuildOptions {
    script: args.file,
    clean: args.clean,
    force: args.force,
    target_os: args.target_os,
    vars,
  };

  let report = run_build(&options)?;

  let script = dunce::canonicalize(&report.script).unwrap_or(report.script);
  debug!(
    script = %script.display(),
    inputs = report.input_files.len(),
    commands = report.commands_run,
    "build finished"
  );

  if report.input_files.is_empty() {
    print_warning("list_input_files() returned no files");
  }

  if report.cleaned {
    print_success(&format!("cleaned. ({})", format_duration(report.elapsed)));
  } else {
    print_success(&format!("success. ({})", format_duration(report.elapsed)));
  }

  Ok(())
}
