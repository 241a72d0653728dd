//! The capability API exposed to build descriptions.
//!
//! Every capability is a Rust closure set on the Lua globals table before the
//! description runs, so top-level code can call any of them:
//!
//! - `cp(src, dst)`, `rm(path|{paths})`, `mkd(path)` - file operations
//! - `cmd(str|{args})` - run a shell command, returns its stdout
//! - `die(msg)` - abort the build with exit code 3
//! - `env(name)` - environment variable or nil
//! - `arm(id)` - select a toolchain (`msvc*`, `clang`, `gcc`)
//! - `arg(flag)` - re-prefix a flag for the armed compiler
//! - `obj(path|{paths}, prefix?)` - object file names for the armed compiler
//! - `var(name, type?)` - command-line variable as `"str"`, `"int"` or `"bool"`
//! - `new(src, dst)` - true if `dst` is missing or older than `src`
//! - `exe(path, debug_suffix?)` - executable name for `TARGET_OS`
//! - `exp(str, locals?)` - expand `$NAME` tokens
//! - `pth(path)`, `ext(path)`, `stem(path)` - path helpers
//! - `log(msg)` - print unconditionally
//!
//! Capabilities share the run's [`BuildContext`](crate::context::BuildContext)
//! through the captured [`SharedContext`].

use std::path::Path;

use mlua::prelude::*;
use tracing::{debug, info, warn};

use super::helpers;
use super::scope::TableScope;
use crate::context::SharedContext;
use crate::error::BuildError;
use crate::execute::run_command;
use crate::expand::{ProcessEnv, Scope, expand};
use crate::stale::is_newer;
use crate::toolchain::ToolchainProfile;
use crate::value::Value;
use crate::vars::VarType;

/// Registry key holding the build description's environment table.
pub const SCRIPT_ENV_KEY: &str = "__jfdi_script_env";

/// Register the full capability API on the Lua globals table.
pub fn register_globals(lua: &Lua, ctx: SharedContext) -> LuaResult<()> {
  let globals = lua.globals();

  helpers::fs::register_fs_helpers(lua, &globals)?;
  helpers::path::register_path_helpers(lua, &globals, ctx.clone())?;

  // cmd(str | {args}) - run through the shell, fatal on non-zero exit
  globals.set(
    "cmd",
    lua.create_function(|_, command: Value| {
      let line = command.joined();
      info!("{}", line);
      Ok(run_command(&line)?)
    })?,
  )?;

  // die(msg) - user abort
  globals.set(
    "die",
    lua.create_function(|_, message: String| -> LuaResult<()> { Err(BuildError::UserAbort { message }.into()) })?,
  )?;

  // env(name) - environment variable or nil
  globals.set(
    "env",
    lua.create_function(|_, name: String| Ok(std::env::var(name).ok()))?,
  )?;

  // arm(id) - select a toolchain and publish CC, CXX, LD, OBJ, CCTYPE and flag lists
  let arm_ctx = ctx.clone();
  globals.set(
    "arm",
    lua.create_function(move |lua, id: String| {
      let profile = ToolchainProfile::from_id(&id)?;
      profile.check_search_path();
      publish_toolchain(lua, &profile)?;
      debug!(id = %profile.id, cc = profile.cc, ld = profile.ld, "armed toolchain");
      arm_ctx.borrow_mut().toolchain = Some(profile);
      Ok(())
    })?,
  )?;

  // arg(flag) - "/O2" or "-O2" depending on the armed compiler
  let arg_ctx = ctx.clone();
  globals.set(
    "arg",
    lua.create_function(move |_, flag: String| {
      let ctx = arg_ctx.borrow();
      let profile = ctx
        .toolchain
        .as_ref()
        .ok_or(BuildError::ToolchainUnresolved { capability: "arg" })?;
      Ok(profile.flag(&flag))
    })?,
  )?;

  // obj(path | {paths}, prefix?) - object names, same shape as the input
  let obj_ctx = ctx.clone();
  globals.set(
    "obj",
    lua.create_function(move |_, (paths, prefix): (Value, Option<String>)| {
      let ctx = obj_ctx.borrow();
      let profile = ctx
        .toolchain
        .as_ref()
        .ok_or(BuildError::ToolchainUnresolved { capability: "obj" })?;
      Ok(profile.object_names(paths, prefix.as_deref().unwrap_or("")))
    })?,
  )?;

  // var(name, type?) - command-line variable, coerced
  let var_ctx = ctx.clone();
  globals.set(
    "var",
    lua.create_function(move |_, (name, ty): (String, Option<String>)| {
      let ty = match ty.as_deref().map(str::parse::<VarType>) {
        None => VarType::Str,
        Some(Ok(ty)) => ty,
        Some(Err(e)) => {
          warn!("var(): {}; reading '{}' as str", e, name);
          VarType::Str
        }
      };
      Ok(var_ctx.borrow().vars.typed(&name, ty))
    })?,
  )?;

  // new(src, dst) - staleness check
  let new_ctx = ctx.clone();
  globals.set(
    "new",
    lua.create_function(move |_, (src, dst): (String, String)| {
      let force = new_ctx.borrow().force;
      Ok(is_newer(Path::new(&src), Path::new(&dst), force))
    })?,
  )?;

  // exp(str, locals?) - expand $NAME tokens
  let exp_ctx = ctx;
  globals.set(
    "exp",
    lua.create_function(move |lua, (input, locals): (String, Option<LuaTable>)| {
      let vars = exp_ctx.borrow().vars.clone();
      let script_scope = script_env(lua)?;

      let locals = locals.as_ref().map(|t| TableScope::new(lua, t));
      let globals = TableScope::new(lua, &script_scope);

      let mut chain: Vec<&dyn Scope> = Vec::with_capacity(4);
      if let Some(locals) = &locals {
        chain.push(locals);
      }
      chain.push(&vars);
      chain.push(&ProcessEnv);
      chain.push(&globals);

      Ok(expand(&input, &chain)?)
    })?,
  )?;

  // log(msg) - always printed
  globals.set(
    "log",
    lua.create_function(|_, message: Value| {
      println!("log:\t{}", message.joined());
      Ok(())
    })?,
  )?;

  Ok(())
}

/// The table `exp()` treats as global scope: the description's environment
/// once it has been loaded, the VM globals before that.
fn script_env(lua: &Lua) -> LuaResult<LuaTable> {
  match lua.named_registry_value::<LuaValue>(SCRIPT_ENV_KEY)? {
    LuaValue::Table(env) => Ok(env),
    _ => Ok(lua.globals()),
  }
}

fn publish_toolchain(lua: &Lua, profile: &ToolchainProfile) -> LuaResult<()> {
  let globals = lua.globals();
  globals.set("CC", profile.cc)?;
  globals.set("CXX", profile.cxx)?;
  globals.set("LD", profile.ld)?;
  globals.set("OBJ", profile.obj)?;
  globals.set("CCTYPE", profile.kind.as_str())?;
  for list in ["CFLAGS", "CPPFLAGS", "LDFLAGS"] {
    globals.set(list, lua.create_table()?)?;
  }
  Ok(())
}
