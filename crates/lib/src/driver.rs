//! Build driver.
//!
//! [`run_build`] drives one build description through its lifecycle:
//!
//! 1. Load the description from disk
//! 2. Inject the capability API
//! 3. Execute its top-level code
//! 4. Validate the lifecycle contract and version marker
//! 5. Publish `HOST_OS` / `TARGET_OS`
//! 6. Enumerate input files, expanding wildcards
//! 7. With `--clean`, call `clean(files)` and stop
//! 8. Call `start_build()`
//! 9. Call `build_this(path)` per file to collect its command
//! 10. Run the collected commands in order
//! 11. Call `end_build(files)`
//! 12. Report
//!
//! Any failure aborts the run; nothing after the failing step happens.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use mlua::prelude::*;
use tracing::{debug, error, info, warn};

use crate::context::{BuildContext, BuildOptions};
use crate::error::{BuildError, Result};
use crate::execute::run_command;
use crate::lua::host::{Lifecycle, ScriptHost};
use crate::lua::loader::BuildScript;
use crate::value::Value;

/// The shell invocation planned for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
  pub input: String,
  pub command: String,
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct BuildReport {
  /// The build description that was run.
  pub script: PathBuf,
  /// Input files after wildcard expansion.
  pub input_files: Vec<String>,
  /// Number of planned commands executed.
  pub commands_run: usize,
  /// True when the run was a `--clean` run.
  pub cleaned: bool,
  /// Wall-clock time for the whole run.
  pub elapsed: Duration,
}

/// Run a build end to end.
///
/// # Errors
///
/// The first [`BuildError`] hit by any lifecycle step. Errors raised inside
/// capabilities keep their original variant, so [`BuildError::exit_code`]
/// still reflects a failing command's exit code or a `die()`.
pub fn run_build(options: &BuildOptions) -> Result<BuildReport> {
  let started = Instant::now();

  let (path, origin) = BuildScript::locate(options.script.as_deref());
  let script = BuildScript::read(&path, origin)?;

  let ctx = BuildContext::new(options).shared();
  let host = ScriptHost::new(ctx)?;
  host.execute(&script)?;
  let lifecycle = host.validate()?;
  host.prime()?;

  let entries = list_input_files(host.lua(), &lifecycle)?;
  let input_files = expand_inputs(entries)?;
  debug!(count = input_files.len(), "enumerated input files");
  let files = host.lua().create_sequence_from(input_files.iter().map(String::as_str))?;

  if options.clean {
    info!("cleaning");
    lifecycle.clean.call::<()>(files)?;
    return Ok(BuildReport {
      script: script.path,
      input_files,
      commands_run: 0,
      cleaned: true,
      elapsed: started.elapsed(),
    });
  }

  lifecycle.start_build.call::<()>(())?;

  let plan = plan_commands(host.lua(), &lifecycle, &input_files)?;
  for record in &plan {
    info!("{}", record.command);
    let stdout = run_command(&record.command).inspect_err(|_| error!("building {} failed", record.input))?;
    if !stdout.is_empty() {
      info!("{}", stdout);
    }
  }

  lifecycle.end_build.call::<()>(files)?;

  Ok(BuildReport {
    script: script.path,
    input_files,
    commands_run: plan.len(),
    cleaned: false,
    elapsed: started.elapsed(),
  })
}

fn list_input_files(lua: &Lua, lifecycle: &Lifecycle) -> Result<Vec<String>> {
  let listed: LuaValue = lifecycle.list_input_files.call(())?;
  match Value::from_lua_lenient(lua, listed)? {
    Some(value) => Ok(value.into_vec()),
    None => Err(BuildError::InvalidInput(
      "list_input_files() must return a file name or a list of file names".to_string(),
    )),
  }
}

/// Expand wildcard entries into the regular files they match.
///
/// Entries containing `*` or `?` are globbed; their matches are sorted and
/// replace the entry in place. Other entries are kept as given, duplicates
/// included.
pub fn expand_inputs(entries: Vec<String>) -> Result<Vec<String>> {
  let mut files = Vec::with_capacity(entries.len());
  for entry in entries {
    if !entry.contains(['*', '?']) {
      files.push(entry);
      continue;
    }

    let paths = glob::glob(&entry).map_err(|e| BuildError::Glob {
      pattern: entry.clone(),
      message: e.msg.to_string(),
    })?;

    let mut matches = Vec::new();
    for path in paths {
      match path {
        Ok(path) if path.is_file() => matches.push(path.to_string_lossy().into_owned()),
        Ok(_) => {}
        Err(e) => warn!("glob error: {}", e),
      }
    }
    if matches.is_empty() {
      warn!("no files match '{}'", entry);
    }
    matches.sort();
    files.extend(matches);
  }
  Ok(files)
}

/// Ask `build_this()` for the command of every input file.
///
/// A list result is one command whose words are joined with spaces; `nil`,
/// `false` or an empty list means the file is up to date.
fn plan_commands(lua: &Lua, lifecycle: &Lifecycle, input_files: &[String]) -> Result<Vec<CommandRecord>> {
  let total = input_files.len();
  let mut plan = Vec::new();

  for (i, input) in input_files.iter().enumerate() {
    debug!("building {}/{} file(s): {}", i + 1, total, input);
    let planned: LuaValue = lifecycle.build_this.call(input.as_str())?;
    if matches!(planned, LuaValue::Nil | LuaValue::Boolean(false)) {
      debug!("{} is up to date", input);
      continue;
    }

    let command = Value::from_lua_lenient(lua, planned)?.map(|v| v.joined()).unwrap_or_default();
    if command.is_empty() {
      debug!("{} has nothing to run", input);
      continue;
    }
    plan.push(CommandRecord {
      input: input.clone(),
      command,
    });
  }

  Ok(plan)
}
