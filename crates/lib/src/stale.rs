//! Timestamp staleness checks backing `new(src, dst)`.

use std::fs;
use std::path::Path;

use tracing::debug;

/// Whether `dst` must be rebuilt from `src`.
///
/// True when `force` is set, when `dst` is missing, or when `src` was modified
/// strictly after `dst`. If `src` cannot be inspected while `dst` exists the pair
/// is reported stale so the build step itself reports the problem.
pub fn is_newer(src: &Path, dst: &Path, force: bool) -> bool {
  if force {
    return true;
  }

  let Ok(dst_mtime) = fs::metadata(dst).and_then(|m| m.modified()) else {
    return true;
  };

  match fs::metadata(src).and_then(|m| m.modified()) {
    Ok(src_mtime) => src_mtime > dst_mtime,
    Err(e) => {
      debug!(src = %src.display(), error = %e, "cannot read source mtime, treating as stale");
      true
    }
  }
}
