//! Toolchain profiles selected by `arm()`.
//!
//! A profile fixes the compiler, linker and object-file extension for the rest
//! of the run. `arg()` and `obj()` derive flags and object names from it.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{BuildError, Result};
use crate::platform::{split_ext, swap_slashes};
use crate::value::Value;

/// Identifiers `arm()` accepts. Anything starting with `msvc` selects MSVC.
pub const ACCEPTED_IDS: [&str; 3] = ["msvc", "clang", "gcc"];

/// Compiler family, which decides flag syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerKind {
  Msvc,
  /// gcc and gcc-compatible compilers such as clang.
  Gcc,
}

impl CompilerKind {
  /// The value published as `CCTYPE`.
  pub fn as_str(&self) -> &'static str {
    match self {
      CompilerKind::Msvc => "msvc",
      CompilerKind::Gcc => "gcc",
    }
  }

  pub fn flag_prefix(&self) -> char {
    match self {
      CompilerKind::Msvc => '/',
      CompilerKind::Gcc => '-',
    }
  }
}

/// The bindings one `arm()` call establishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainProfile {
  pub id: String,
  pub kind: CompilerKind,
  pub cc: &'static str,
  pub cxx: &'static str,
  pub ld: &'static str,
  /// Object extension without the dot.
  pub obj: &'static str,
}

impl ToolchainProfile {
  /// Look up the profile for `id`.
  pub fn from_id(id: &str) -> Result<Self> {
    let (kind, cc, cxx, ld, obj) = if id.starts_with("msvc") {
      (CompilerKind::Msvc, "cl.exe", "cl.exe", "link.exe", "obj")
    } else if id == "clang" {
      // /usr/bin/ld is too low-level to drive directly
      (CompilerKind::Gcc, "clang", "clang++", "clang", "o")
    } else if id == "gcc" {
      (CompilerKind::Gcc, "gcc", "g++", "gcc", "o")
    } else {
      return Err(BuildError::UnknownToolchain {
        id: id.to_string(),
        accepted: ACCEPTED_IDS.to_vec(),
      });
    };

    Ok(Self {
      id: id.to_string(),
      kind,
      cc,
      cxx,
      ld,
      obj,
    })
  }

  /// Warn about tools that cannot be found on the search path.
  pub fn check_search_path(&self) {
    for (role, tool) in [("compiler", self.cc), ("linker", self.ld)] {
      match which::which(tool) {
        Ok(path) => debug!(tool, path = %path.display(), "found {}", role),
        Err(_) => warn!("arm(): {} '{}' not found in search path.", role, tool),
      }
    }
  }

  /// Re-prefix a flag for this compiler: `-O2` and `/O2` both become `/O2` for
  /// MSVC and `-O2` otherwise.
  pub fn flag(&self, flag: &str) -> String {
    let bare = flag.trim_start_matches(['-', '/']);
    format!("{}{}", self.kind.flag_prefix(), bare)
  }

  /// Object file name for one source path, optionally under `prefix`.
  pub fn object_name(&self, path: &str, prefix: &str) -> String {
    let (stem, _) = split_ext(path);
    let file = format!("{}.{}", stem, self.obj);
    let prefix = swap_slashes(prefix);
    if prefix.is_empty() {
      file
    } else {
      Path::new(&prefix).join(file).to_string_lossy().into_owned()
    }
  }

  /// Object names for one path or a list of paths, keeping the shape.
  pub fn object_names(&self, paths: Value, prefix: &str) -> Value {
    paths.map(|p| self.object_name(&p, prefix))
  }
}
