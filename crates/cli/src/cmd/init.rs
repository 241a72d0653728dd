//! Implementation of `jfdi --init`.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use jfdi_lib::consts::DEFAULT_SCRIPT;
use jfdi_lib::init::init_script;

use crate::output::{print_success, symbols};

/// Write a starter build description.
///
/// Uses `file` when given, otherwise `build.jfdi` in the current directory.
/// An existing file is left untouched and reported as an error.
pub fn cmd_init(file: Option<&Path>) -> Result<()> {
  let path = file.unwrap_or(Path::new(DEFAULT_SCRIPT));

  let written = init_script(path).with_context(|| format!("cannot initialize {}", path.display()))?;
  let written = dunce::canonicalize(&written).unwrap_or(written);

  print_success(&format!("created {}", written.display()));
  println!(
    "  {} edit list_input_files() and build_this(), then run {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.cyan()),
    "jfdi".if_supports_color(Stream::Stdout, |s| s.bold())
  );

  Ok(())
}
