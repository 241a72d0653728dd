use mlua::prelude::*;

use crate::context::SharedContext;
use crate::lua::globals::{self, SCRIPT_ENV_KEY};

/// Create a new Lua runtime with the capability API registered in its globals.
pub fn create_runtime(ctx: SharedContext) -> LuaResult<Lua> {
  let lua = Lua::new();
  globals::register_globals(&lua, ctx)?;
  Ok(lua)
}

/// Create the environment table a build description runs in.
///
/// Reads fall through to the VM globals, so capabilities and published
/// identifiers are visible; writes stay in the table, which becomes the
/// description's exported symbol table. The table is also stored in the
/// registry so `exp()` can resolve description globals.
pub fn create_script_env(lua: &Lua) -> LuaResult<LuaTable> {
  let env = lua.create_table()?;
  let meta = lua.create_table()?;
  meta.set("__index", lua.globals())?;
  env.set_metatable(Some(meta))?;
  lua.set_named_registry_value(SCRIPT_ENV_KEY, env.clone())?;
  Ok(env)
}
