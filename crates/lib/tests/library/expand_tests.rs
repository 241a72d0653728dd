//! Variable resolution through a full build run.

use jfdi_lib::run_build;
use jfdi_lib::vars::CliVars;

use super::common::Sandbox;

const EXPANDING_SCRIPT: &str = r#"
JFDI_VERSION = 1

OPT = "-O0"
FLAGS = { "-Wall", "-g" }

function list_input_files() return { "main.c" } end
function clean(files) end
function start_build() end

function build_this(path)
  local out = io.open("{dir}/expanded.txt", "w")
  out:write(exp("$OPT $FLAGS $FILE $TARGET_OS", { FILE = path }))
  out:close()
  return nil
end

function end_build(files) end
"#;

fn expanded(sandbox: &Sandbox) -> String {
  std::fs::read_to_string(sandbox.path("expanded.txt")).unwrap()
}

#[test]
fn description_globals_and_locals_expand() {
  let sandbox = Sandbox::new(EXPANDING_SCRIPT);
  let mut options = sandbox.options();
  options.target_os = Some(jfdi_lib::platform::os::Os::MacOs.into());

  run_build(&options).unwrap();

  assert_eq!(expanded(&sandbox), "-O0 -Wall -g main.c Darwin");
}

#[test]
fn command_line_variables_shadow_globals() {
  let sandbox = Sandbox::new(EXPANDING_SCRIPT);
  let mut options = sandbox.options();
  options.vars = CliVars::parse(["OPT=-O3", "FILE=ignored"]);
  options.target_os = Some(jfdi_lib::platform::os::Os::Linux.into());

  run_build(&options).unwrap();

  assert_eq!(expanded(&sandbox), "-O3 -Wall -g main.c Linux");
}
