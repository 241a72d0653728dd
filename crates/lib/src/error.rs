//! Error types for a build run.
//!
//! Every failure a build can hit is a [`BuildError`]. Errors raised inside a
//! capability travel through the Lua VM as external errors; [`BuildError::from_lua`]
//! digs them back out so the CLI can still map them to the right exit code.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use mlua::prelude::*;
use thiserror::Error;

use crate::consts::{EXIT_FAILURE, EXIT_USER_ABORT};

/// Result alias used throughout the crate.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Errors that abort a build.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
  /// The build description does not exist.
  #[error("build file not found: {}\n{hint}", path.display())]
  ScriptNotFound { path: PathBuf, hint: String },

  /// The build description failed to compile.
  #[error("syntax error in ({}, line {line}):\n\t{text}\n{message}", path.display())]
  ScriptSyntax {
    path: PathBuf,
    line: usize,
    text: String,
    message: String,
  },

  /// Required lifecycle entry points or the version marker are missing.
  #[error("errors were found during execution:\n{}", describe_missing(missing))]
  MissingContract { missing: Vec<String> },

  /// The build description declares a format version this host does not implement.
  #[error("build file declares JFDI_VERSION {found}, but this jfdi only understands version {expected}")]
  VersionMismatch { found: String, expected: i64 },

  /// `exp()` referenced a name that no scope binds.
  #[error("exp(): var {name} not found")]
  UnboundVariable { name: String },

  /// A capability that needs a toolchain was called before `arm()`.
  #[error("must call arm() before {capability}()")]
  ToolchainUnresolved { capability: &'static str },

  /// `arm()` was given an identifier it does not know.
  #[error("arm() unknown ID '{id}'\nacceptable IDs:\n\t{}", accepted.join(", "))]
  UnknownToolchain { id: String, accepted: Vec<&'static str> },

  /// A shell command exited unsuccessfully.
  #[error("error '{}' running command \"{cmd}\"", describe_code(*code))]
  CommandFailed { cmd: String, code: Option<i32> },

  /// The build description called `die()`.
  #[error("die: {message}")]
  UserAbort { message: String },

  /// A filesystem or process operation failed.
  #[error("{op} {}: {source}", path.display())]
  Io {
    op: &'static str,
    path: PathBuf,
    #[source]
    source: Arc<io::Error>,
  },

  /// An input-file wildcard could not be parsed.
  #[error("invalid wildcard '{pattern}': {message}")]
  Glob { pattern: String, message: String },

  /// A lifecycle entry point returned something of the wrong shape.
  #[error("{0}")]
  InvalidInput(String),

  /// Any other error raised by the build description itself.
  #[error("{0}")]
  Script(String),

  /// `--init` would overwrite an existing file.
  #[error("{} already exists", path.display())]
  ScaffoldExists { path: PathBuf },
}

impl BuildError {
  /// Wrap an I/O error with the operation and path that produced it.
  pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
    BuildError::Io {
      op,
      path: path.into(),
      source: Arc::new(source),
    }
  }

  /// Process exit code for this error.
  ///
  /// Command failures keep the failing command's own code when it has one.
  pub fn exit_code(&self) -> i32 {
    match self {
      BuildError::CommandFailed { code: Some(code), .. } => *code,
      BuildError::UserAbort { .. } => EXIT_USER_ABORT,
      _ => EXIT_FAILURE,
    }
  }

  /// Recover a [`BuildError`] from a Lua error.
  ///
  /// Capability errors are wrapped by mlua as external errors, possibly nested in
  /// callback and context layers. Anything else becomes [`BuildError::Script`].
  pub fn from_lua(err: &LuaError) -> Self {
    match find_build_error(err) {
      Some(build_err) => build_err.clone(),
      None => BuildError::Script(err.to_string()),
    }
  }
}

fn describe_missing(missing: &[String]) -> String {
  missing
    .iter()
    .map(|name| format!("  {name} must exist"))
    .collect::<Vec<_>>()
    .join("\n")
}

fn describe_code(code: Option<i32>) -> String {
  match code {
    Some(code) => code.to_string(),
    None => "signal".to_string(),
  }
}

fn find_build_error(err: &LuaError) -> Option<&BuildError> {
  match err {
    LuaError::ExternalError(inner) => inner.downcast_ref::<BuildError>(),
    LuaError::CallbackError { cause, .. } => find_build_error(cause),
    LuaError::WithContext { cause, .. } => find_build_error(cause),
    _ => None,
  }
}

impl From<LuaError> for BuildError {
  fn from(err: LuaError) -> Self {
    BuildError::from_lua(&err)
  }
}

impl From<BuildError> for LuaError {
  fn from(err: BuildError) -> Self {
    LuaError::external(err)
  }
}
