//! Reading and compiling the build description.
//!
//! The description is compiled into the environment table the host hands it,
//! so its top-level assignments become that table's fields instead of leaking
//! into the VM's globals.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use mlua::prelude::*;
use tracing::debug;

use crate::consts::DEFAULT_SCRIPT;
use crate::error::{BuildError, Result};

/// How the build description path was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOrigin {
  /// `build.jfdi` in the current directory.
  Default,
  /// Named with `--file`.
  Explicit,
}

/// A build description read from disk.
#[derive(Debug, Clone)]
pub struct BuildScript {
  pub path: PathBuf,
  pub modified: SystemTime,
  source: String,
}

impl BuildScript {
  /// Resolve the path to load: the requested one, or the default file name.
  pub fn locate(requested: Option<&Path>) -> (PathBuf, ScriptOrigin) {
    match requested {
      Some(path) => (path.to_path_buf(), ScriptOrigin::Explicit),
      None => (PathBuf::from(DEFAULT_SCRIPT), ScriptOrigin::Default),
    }
  }

  /// Read the build description at `path`.
  ///
  /// # Errors
  ///
  /// [`BuildError::ScriptNotFound`] if the file does not exist, with a hint that
  /// depends on whether the path was the default or given explicitly.
  pub fn read(path: &Path, origin: ScriptOrigin) -> Result<Self> {
    if !path.is_file() {
      return Err(BuildError::ScriptNotFound {
        path: path.to_path_buf(),
        hint: not_found_hint(origin),
      });
    }

    let source = fs::read_to_string(path).map_err(|e| BuildError::io("read", path, e))?;
    let modified = fs::metadata(path)
      .and_then(|m| m.modified())
      .map_err(|e| BuildError::io("stat", path, e))?;

    debug!(path = %path.display(), ?modified, "loaded build description");

    Ok(Self {
      path: path.to_path_buf(),
      modified,
      source,
    })
  }

  /// Build a script from text already in memory.
  pub fn from_source(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      modified: SystemTime::now(),
      source: source.into(),
    }
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  /// Compile the description into a function whose globals live in `env`.
  ///
  /// # Errors
  ///
  /// [`BuildError::ScriptSyntax`] with the offending line and its text.
  pub fn compile(&self, lua: &Lua, env: LuaTable) -> Result<LuaFunction> {
    lua
      .load(self.source.as_str())
      .set_name(format!("@{}", self.path.display()))
      .set_environment(env)
      .into_function()
      .map_err(|e| self.syntax_error(e))
  }

  fn syntax_error(&self, err: LuaError) -> BuildError {
    let LuaError::SyntaxError { message, .. } = &err else {
      return BuildError::from(err);
    };

    let line = error_line(message).unwrap_or(0);
    let text = line
      .checked_sub(1)
      .and_then(|i| self.source.lines().nth(i))
      .unwrap_or("")
      .trim_end()
      .to_string();

    BuildError::ScriptSyntax {
      path: self.path.clone(),
      line,
      text,
      message: message.clone(),
    }
  }
}

fn not_found_hint(origin: ScriptOrigin) -> String {
  match origin {
    ScriptOrigin::Default => format!(
      "no {} in the current directory.\nIf starting from scratch, use `jfdi --init`.\n`jfdi --help` for detailed help.",
      DEFAULT_SCRIPT
    ),
    ScriptOrigin::Explicit => "the file passed with --file does not exist.".to_string(),
  }
}

/// Line number from a Lua error message of the form `chunk:LINE: text`.
fn error_line(message: &str) -> Option<usize> {
  message.split(':').skip(1).find_map(|segment| segment.parse().ok())
}
