//! Hosting a build description: inject, execute, validate, prime.

use mlua::prelude::*;
use tracing::debug;

use crate::consts::{FORMAT_VERSION, LIFECYCLE_FUNCTIONS, VERSION_MARKER};
use crate::context::SharedContext;
use crate::error::{BuildError, Result};
use crate::lua::loader::BuildScript;
use crate::lua::runtime;

/// The five entry points a build description must define.
pub struct Lifecycle {
  pub list_input_files: LuaFunction,
  pub clean: LuaFunction,
  pub start_build: LuaFunction,
  pub build_this: LuaFunction,
  pub end_build: LuaFunction,
}

/// A Lua VM with the capability API injected and an environment table for one
/// build description.
pub struct ScriptHost {
  lua: Lua,
  env: LuaTable,
  ctx: SharedContext,
}

impl ScriptHost {
  /// Create the VM and inject the capability API.
  pub fn new(ctx: SharedContext) -> Result<Self> {
    let lua = runtime::create_runtime(ctx.clone())?;
    let env = runtime::create_script_env(&lua)?;
    Ok(Self { lua, env, ctx })
  }

  pub fn lua(&self) -> &Lua {
    &self.lua
  }

  /// The description's environment table.
  pub fn env(&self) -> &LuaTable {
    &self.env
  }

  /// Compile and run the description's top-level code once.
  pub fn execute(&self, script: &BuildScript) -> Result<()> {
    let chunk = script.compile(&self.lua, self.env.clone())?;
    chunk.call::<()>(())?;
    debug!(path = %script.path.display(), "executed build description");
    Ok(())
  }

  /// Check the lifecycle contract against what the description defined.
  ///
  /// Every missing name is reported at once. The version marker is only
  /// compared once all names are present.
  pub fn validate(&self) -> Result<Lifecycle> {
    let mut missing = Vec::new();
    for name in LIFECYCLE_FUNCTIONS {
      if !matches!(self.env.raw_get::<LuaValue>(name)?, LuaValue::Function(_)) {
        missing.push(format!("{name}()"));
      }
    }

    let version: LuaValue = self.env.raw_get(VERSION_MARKER)?;
    if version.is_nil() {
      missing.push(VERSION_MARKER.to_string());
    }

    if !missing.is_empty() {
      return Err(BuildError::MissingContract { missing });
    }

    check_version(&version)?;

    Ok(Lifecycle {
      list_input_files: self.env.raw_get("list_input_files")?,
      clean: self.env.raw_get("clean")?,
      start_build: self.env.raw_get("start_build")?,
      build_this: self.env.raw_get("build_this")?,
      end_build: self.env.raw_get("end_build")?,
    })
  }

  /// Publish `HOST_OS` and `TARGET_OS` into the globals.
  pub fn prime(&self) -> Result<()> {
    let ctx = self.ctx.borrow();
    let globals = self.lua.globals();
    globals.set("HOST_OS", ctx.host_os.as_str())?;
    globals.set("TARGET_OS", ctx.target_os.as_str())?;
    debug!(host = %ctx.host_os, target = %ctx.target_os, "primed build description");
    Ok(())
  }
}

fn check_version(version: &LuaValue) -> Result<()> {
  let supported = match version {
    LuaValue::Integer(n) => *n == FORMAT_VERSION,
    LuaValue::Number(n) => *n == FORMAT_VERSION as f64,
    _ => false,
  };
  if supported {
    return Ok(());
  }

  let found = match version {
    LuaValue::String(s) => format!("\"{}\"", s.to_string_lossy()),
    other => other.to_string().unwrap_or_else(|_| other.type_name().to_string()),
  };
  Err(BuildError::VersionMismatch {
    found,
    expected: FORMAT_VERSION,
  })
}
