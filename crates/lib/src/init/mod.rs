//! Scaffold a starter build description.
//!
//! `jfdi --init` writes a commented `build.jfdi` listing the capability API and
//! stubs for every lifecycle function. An existing file is never overwritten.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BuildError, Result};

pub use templates::BUILD_SCRIPT_TEMPLATE;

/// Write the starter build description to `path`.
///
/// # Errors
///
/// [`BuildError::ScaffoldExists`] if `path` already exists, or
/// [`BuildError::Io`] if the file cannot be written.
pub fn init_script(path: &Path) -> Result<PathBuf> {
  if path.exists() {
    return Err(BuildError::ScaffoldExists {
      path: path.to_path_buf(),
    });
  }

  fs::write(path, BUILD_SCRIPT_TEMPLATE).map_err(|e| BuildError::io("write", path, e))?;
  debug!(path = %path.display(), "wrote build description scaffold");

  Ok(path.to_path_buf())
}
