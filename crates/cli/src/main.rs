mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jfdi_lib::BuildError;
use jfdi_lib::platform::os::TargetOs;

use crate::output::print_error;

/// jfdi - just build it: run a Lua build description
#[derive(Parser)]
#[command(name = "jfdi")]
struct Cli {
  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,

  /// Read FILE as the build description instead of build.jfdi
  #[arg(short, long, value_name = "FILE")]
  file: Option<PathBuf>,

  /// Call clean() instead of building
  #[arg(short, long)]
  clean: bool,

  /// Target OS published as TARGET_OS (Linux, Darwin, Windows or any other name)
  #[arg(long, value_name = "OS")]
  target_os: Option<TargetOs>,

  /// Treat every output as out of date
  #[arg(long)]
  force: bool,

  /// Create a new build.jfdi in the current directory
  #[arg(long)]
  init: bool,

  /// Set a build variable (repeatable)
  #[arg(short = 'V', long = "var", value_name = "KEY[=VALUE]")]
  var: Vec<String>,

  /// Build variables as KEY[=VALUE]; a bare KEY is set to 1
  #[arg(value_name = "KEY[=VALUE]")]
  vars: Vec<String>,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  // Command echo and progress are info; -v adds debug detail. RUST_LOG wins.
  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .without_time()
    .init();

  let result = if cli.init {
    cmd::cmd_init(cli.file.as_deref())
  } else {
    let vars = cli.var.into_iter().chain(cli.vars).collect();
    cmd::cmd_build(cmd::BuildArgs {
      file: cli.file,
      clean: cli.clean,
      force: cli.force,
      target_os: cli.target_os,
      vars,
    })
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::from(exit_code(&err))
    }
  }
}

/// Process exit code for a failed run.
///
/// Build errors carry their own code (a failing command's code, 3 for `die()`);
/// anything else is 1.
fn exit_code(err: &anyhow::Error) -> u8 {
  let code = err.downcast_ref::<BuildError>().map_or(1, BuildError::exit_code);
  u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}
