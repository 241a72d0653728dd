//! Shared helpers for library integration tests.

use std::path::{Path, PathBuf};

use jfdi_lib::BuildOptions;
use tempfile::TempDir;

/// Escape a path for embedding in a Lua string literal.
pub fn lua_path(path: &Path) -> String {
  path.to_string_lossy().replace('\\', "\\\\")
}

/// A build description in its own temporary directory.
pub struct Sandbox {
  pub temp: TempDir,
  pub script: PathBuf,
}

impl Sandbox {
  /// Write `source` to `build.jfdi`, replacing `{dir}` with the sandbox path.
  pub fn new(source: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("build.jfdi");
    std::fs::write(&script, source.replace("{dir}", &lua_path(temp.path()))).unwrap();
    Self { temp, script }
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  pub fn write(&self, relative: &str, content: &str) {
    let path = self.path(relative);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
  }

  /// Lines of the sandbox's `trace.txt`, written by scripts to record call order.
  pub fn trace(&self) -> Vec<String> {
    std::fs::read_to_string(self.path("trace.txt"))
      .unwrap_or_default()
      .lines()
      .map(str::to_string)
      .collect()
  }

  pub fn options(&self) -> BuildOptions {
    BuildOptions {
      script: Some(self.script.clone()),
      ..Default::default()
    }
  }
}
