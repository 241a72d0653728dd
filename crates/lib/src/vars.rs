//! Command-line build variables.
//!
//! Variables come from `KEY=VALUE` or bare `KEY` tokens on the command line.
//! Keys are stored uppercase; a bare key is the integer `1`. The set is frozen
//! once parsed and read by `var()` and `exp()`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use mlua::prelude::*;

use crate::value::Value;

/// The raw value of one command-line variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliValue {
  /// `KEY=VALUE`
  Text(String),
  /// Bare `KEY`, which means integer one.
  Flag,
}

impl CliValue {
  pub fn as_text(&self) -> String {
    match self {
      CliValue::Text(s) => s.clone(),
      CliValue::Flag => "1".to_string(),
    }
  }
}

/// The type requested from `var(name, type)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarType {
  #[default]
  Str,
  Int,
  Bool,
}

impl FromStr for VarType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "str" | "string" => Ok(VarType::Str),
      "int" | "integer" | "number" => Ok(VarType::Int),
      "bool" | "boolean" => Ok(VarType::Bool),
      other => Err(format!("unknown var type '{}', expected str, int or bool", other)),
    }
  }
}

/// A coerced variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
  Str(String),
  Int(i64),
  Bool(bool),
}

impl TypedValue {
  /// Truthiness: `false`, `0` and the empty string are false.
  pub fn is_truthy(&self) -> bool {
    match self {
      TypedValue::Str(s) => !s.is_empty(),
      TypedValue::Int(i) => *i != 0,
      TypedValue::Bool(b) => *b,
    }
  }
}

impl IntoLua for TypedValue {
  fn into_lua(self, lua: &Lua) -> LuaResult<LuaValue> {
    match self {
      TypedValue::Str(s) => s.into_lua(lua),
      TypedValue::Int(i) => Ok(LuaValue::Integer(i)),
      TypedValue::Bool(b) => Ok(LuaValue::Boolean(b)),
    }
  }
}

/// The frozen set of command-line variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliVars {
  vars: BTreeMap<String, CliValue>,
}

impl CliVars {
  /// Parse `KEY=VALUE` / `KEY` tokens. Later tokens override earlier ones.
  pub fn parse<I, S>(tokens: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut vars = BTreeMap::new();
    for token in tokens {
      let token = token.as_ref();
      match token.split_once('=') {
        Some((key, value)) => vars.insert(key.to_uppercase(), CliValue::Text(value.to_string())),
        None => vars.insert(token.to_uppercase(), CliValue::Flag),
      };
    }
    Self { vars }
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  /// Exact-key lookup, as used by `exp()`.
  pub fn get(&self, key: &str) -> Option<&CliValue> {
    self.vars.get(key)
  }

  /// Exact-key lookup rendered as a [`Value`].
  pub fn lookup(&self, key: &str) -> Option<Value> {
    self.get(key).map(|v| Value::Scalar(v.as_text()))
  }

  /// Case-insensitive lookup with coercion, as used by `var()`.
  ///
  /// Absent keys yield an empty string. A value that cannot be coerced to the
  /// requested type is returned unchanged as a string. For booleans, `"0"` and
  /// `""` are false and every other value is true.
  pub fn typed(&self, key: &str, ty: VarType) -> TypedValue {
    let Some(value) = self.vars.get(&key.to_uppercase()) else {
      return TypedValue::Str(String::new());
    };

    match (ty, value) {
      (VarType::Str, v) => TypedValue::Str(v.as_text()),
      (VarType::Int, CliValue::Flag) => TypedValue::Int(1),
      (VarType::Int, CliValue::Text(s)) => match s.trim().parse::<i64>() {
        Ok(i) => TypedValue::Int(i),
        Err(_) => TypedValue::Str(s.clone()),
      },
      (VarType::Bool, CliValue::Flag) => TypedValue::Bool(true),
      (VarType::Bool, CliValue::Text(s)) => TypedValue::Bool(!(s.is_empty() || s == "0")),
    }
  }
}

impl fmt::Display for CliVars {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let rendered: Vec<String> = self
      .vars
      .iter()
      .map(|(k, v)| format!("{}={}", k, v.as_text()))
      .collect();
    write!(f, "{}", rendered.join(" "))
  }
}
