//! Lua tables as layers of the `exp()` lookup chain.

use mlua::prelude::*;

use crate::error::Result;
use crate::expand::Scope;
use crate::value::Value;

/// A Lua table consulted by name.
///
/// Lookups honour `__index`, so the description's environment table also sees
/// the capability globals and published identifiers behind it.
pub struct TableScope<'a> {
  lua: &'a Lua,
  table: &'a LuaTable,
}

impl<'a> TableScope<'a> {
  pub fn new(lua: &'a Lua, table: &'a LuaTable) -> Self {
    Self { lua, table }
  }
}

impl Scope for TableScope<'_> {
  fn resolve(&self, name: &str) -> Result<Option<Value>> {
    let value: LuaValue = self.table.get(name)?;
    Ok(Value::from_lua_lenient(self.lua, value)?)
  }
}
