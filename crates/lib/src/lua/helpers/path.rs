use mlua::prelude::*;

use crate::context::SharedContext;
use crate::platform::{os::TargetOs, split_ext, swap_slashes};
use crate::vars::VarType;

/// Register the path capabilities `ext`, `stem`, `pth` and `exe` on `globals`.
pub fn register_path_helpers(lua: &Lua, globals: &LuaTable, ctx: SharedContext) -> LuaResult<()> {
  // ext(path) - file extension including the dot ("a.c" -> ".c")
  globals.set(
    "ext",
    lua.create_function(|_, path: String| Ok(split_ext(&path).1.to_string()))?,
  )?;

  // stem(path) - path without its extension ("src/a.c" -> "src/a")
  globals.set(
    "stem",
    lua.create_function(|_, path: String| Ok(split_ext(&path).0.to_string()))?,
  )?;

  // pth(path) - swap slashes to the host convention
  globals.set("pth", lua.create_function(|_, path: String| Ok(swap_slashes(&path)))?)?;

  // exe(path, debug_suffix?) - executable name for TARGET_OS
  globals.set(
    "exe",
    lua.create_function(move |_, (path, debug_suffix): (String, Option<String>)| {
      let ctx = ctx.borrow();
      let debug = ctx.vars.typed("DEBUG", VarType::Bool).is_truthy();
      Ok(executable_name(&path, debug_suffix.as_deref(), &ctx.target_os, debug))
    })?,
  )?;

  Ok(())
}

/// Executable file name for `target`.
///
/// The source extension is dropped, `debug_suffix` is appended when `debug` is
/// set, and `.exe` is appended for Windows targets.
pub fn executable_name(path: &str, debug_suffix: Option<&str>, target: &TargetOs, debug: bool) -> String {
  let (stem, _) = split_ext(path);
  let mut name = stem.to_string();
  if let Some(suffix) = debug_suffix.filter(|_| debug) {
    name.push_str(suffix);
  }
  name.push_str(target.exe_extension());
  name
}
