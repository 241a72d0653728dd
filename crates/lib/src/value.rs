//! The "string or list of strings" value passed between Lua and the host.
//!
//! Capabilities such as `obj()` and `rm()` accept either shape, lifecycle
//! functions may return either shape, and `exp()` substitutes either shape.
//! [`Value::joined`] is the one place a list collapses into text.

use mlua::prelude::*;

/// A scalar string or an ordered sequence of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
  Scalar(String),
  List(Vec<String>),
}

impl Value {
  /// Collapse to text, joining list items with single spaces.
  pub fn joined(&self) -> String {
    match self {
      Value::Scalar(s) => s.clone(),
      Value::List(items) => items.join(" "),
    }
  }

  /// Every item as a list; a scalar becomes a one-element list.
  pub fn into_vec(self) -> Vec<String> {
    match self {
      Value::Scalar(s) => vec![s],
      Value::List(items) => items,
    }
  }

  /// Apply `f` to each item, keeping the shape.
  pub fn map(self, mut f: impl FnMut(String) -> String) -> Value {
    match self {
      Value::Scalar(s) => Value::Scalar(f(s)),
      Value::List(items) => Value::List(items.into_iter().map(f).collect()),
    }
  }

  /// Convert an arbitrary Lua value, rendering numbers and booleans with Lua's `tostring`.
  ///
  /// Returns `None` for `nil`.
  pub fn from_lua_lenient(lua: &Lua, value: LuaValue) -> LuaResult<Option<Value>> {
    match value {
      LuaValue::Nil => Ok(None),
      LuaValue::String(s) => Ok(Some(Value::Scalar(s.to_string_lossy()))),
      LuaValue::Table(table) => {
        let mut items = Vec::new();
        for item in table.sequence_values::<LuaValue>() {
          items.push(lua_tostring(lua, item?)?);
        }
        Ok(Some(Value::List(items)))
      }
      other => Ok(Some(Value::Scalar(lua_tostring(lua, other)?))),
    }
  }
}

fn lua_tostring(lua: &Lua, value: LuaValue) -> LuaResult<String> {
  if let LuaValue::String(s) = &value {
    return Ok(s.to_string_lossy());
  }
  let tostring: LuaFunction = lua.globals().get("tostring")?;
  tostring.call::<String>(value)
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Scalar(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::Scalar(s)
  }
}

impl From<Vec<String>> for Value {
  fn from(items: Vec<String>) -> Self {
    Value::List(items)
  }
}

impl FromLua for Value {
  fn from_lua(value: LuaValue, lua: &Lua) -> LuaResult<Self> {
    match value {
      LuaValue::Table(table) => Ok(Value::List(
        table.sequence_values::<String>().collect::<LuaResult<Vec<_>>>()?,
      )),
      other => Ok(Value::Scalar(String::from_lua(other, lua)?)),
    }
  }
}

impl IntoLua for Value {
  fn into_lua(self, lua: &Lua) -> LuaResult<LuaValue> {
    match self {
      Value::Scalar(s) => s.into_lua(lua),
      Value::List(items) => Ok(LuaValue::Table(lua.create_sequence_from(items)?)),
    }
  }
}
