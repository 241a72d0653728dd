//! Host platform details: OS identity and path separators.

pub mod os;

use os::Os;

/// The OS this process runs on.
///
/// Unknown hosts are treated as Linux, the closest match for any remaining Unix.
pub fn host_os() -> Os {
  Os::current().unwrap_or(Os::Linux)
}

/// Swap path separators to the host's convention: `\` on Windows, `/` elsewhere.
pub fn swap_slashes(path: &str) -> String {
  if cfg!(windows) {
    path.replace('/', "\\")
  } else {
    path.replace('\\', "/")
  }
}

/// Split `path` into the part before its extension and the extension (with dot).
///
/// Only the last path component is searched, and leading dots of that
/// component never start an extension, so `.bashrc` has none.
pub fn split_ext(path: &str) -> (&str, &str) {
  let name_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
  let name = &path[name_start..];
  let leading_dots = name.len() - name.trim_start_matches('.').len();

  match name[leading_dots..].rfind('.') {
    Some(i) => path.split_at(name_start + leading_dots + i),
    None => (path, ""),
  }
}
