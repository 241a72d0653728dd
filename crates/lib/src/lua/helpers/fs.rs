//! File capabilities: `cp`, `rm`, `mkd`.

use std::fs;
use std::io;
use std::path::Path;

use mlua::prelude::*;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{BuildError, Result};
use crate::platform::swap_slashes;
use crate::value::Value;

/// Register `cp`, `rm` and `mkd` on `globals`.
pub fn register_fs_helpers(lua: &Lua, globals: &LuaTable) -> LuaResult<()> {
  // cp(src, dst) - copy a file, or a directory recursively
  globals.set(
    "cp",
    lua.create_function(|_, (src, dst): (String, String)| {
      copy(Path::new(&src), Path::new(&dst))?;
      Ok(())
    })?,
  )?;

  // rm(path | {paths}) - remove files or directory trees
  globals.set(
    "rm",
    lua.create_function(|_, paths: Value| {
      for path in paths.into_vec() {
        remove(&path)?;
      }
      Ok(())
    })?,
  )?;

  // mkd(path) - create every missing directory on the path
  globals.set(
    "mkd",
    lua.create_function(|_, dirs: String| {
      make_dirs(&dirs)?;
      Ok(())
    })?,
  )?;

  Ok(())
}

/// Copy `src` to `dst`.
///
/// Directories are copied recursively, merging into `dst` if it exists. A file
/// copied onto an existing directory lands inside it.
pub fn copy(src: &Path, dst: &Path) -> Result<()> {
  if !src.is_dir() {
    info!("cp {} to {}", src.display(), dst.display());
    let target = match src.file_name() {
      Some(name) if dst.is_dir() => dst.join(name),
      _ => dst.to_path_buf(),
    };
    fs::copy(src, &target).map_err(|e| BuildError::io("copy", src, e))?;
    return Ok(());
  }

  info!("recursively copy {} to {}", src.display(), dst.display());
  for entry in WalkDir::new(src) {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(src).to_path_buf();
      BuildError::io("copy", path, io::Error::from(e))
    })?;
    let Ok(relative) = entry.path().strip_prefix(src) else {
      continue;
    };
    let target = dst.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target).map_err(|e| BuildError::io("create directory", &target, e))?;
    } else {
      fs::copy(entry.path(), &target).map_err(|e| BuildError::io("copy", entry.path(), e))?;
    }
  }
  Ok(())
}

/// Remove a file or directory tree. A missing path is not an error.
pub fn remove(path: &str) -> Result<()> {
  let path = swap_slashes(path);
  let path = Path::new(&path);

  let Ok(meta) = fs::symlink_metadata(path) else {
    debug!("rm nonexistent {}", path.display());
    return Ok(());
  };

  let result = if meta.is_dir() {
    debug!("rmdir {}", path.display());
    fs::remove_dir_all(path)
  } else {
    debug!("rm {}", path.display());
    fs::remove_file(path)
  };

  match result {
    Err(e) if e.kind() != io::ErrorKind::NotFound => Err(BuildError::io("remove", path, e)),
    _ => Ok(()),
  }
}

/// Create `dirs` and all missing parents.
pub fn make_dirs(dirs: &str) -> Result<()> {
  let dirs = swap_slashes(dirs);
  debug!("making dirs {}", dirs);
  fs::create_dir_all(&dirs).map_err(|e| BuildError::io("create directory", &dirs, e))
}
