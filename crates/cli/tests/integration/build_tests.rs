//! Build lifecycle integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

fn copy_tree_env() -> TestEnv {
  let env = TestEnv::from_fixture("copy_tree.jfdi");
  env.write_file("src/b.txt", "bee");
  env.write_file("src/a.txt", "ay");
  env.write_file("src/notes.md", "ignored");
  env
}

#[test]
fn builds_wildcard_inputs_and_reports_success() {
  if cfg!(windows) {
    return;
  }

  let env = copy_tree_env();

  env
    .jfdi_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("cp src/a.txt out/a.out"))
    .stdout(predicate::str::contains("cp src/b.txt out/b.out"))
    .stdout(predicate::str::contains("log:\tbuilt 2 file(s)"))
    .stdout(predicate::str::contains("success."));

  assert_eq!(env.read_file("out/a.out"), "ay");
  assert_eq!(env.read_file("out/b.out"), "bee");
  assert!(!env.dir().join("out/notes.out").exists());
}

#[test]
fn second_run_skips_up_to_date_files() {
  if cfg!(windows) {
    return;
  }

  let env = copy_tree_env();
  env.jfdi_cmd().assert().success();

  env
    .jfdi_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("cp src/").not())
    .stdout(predicate::str::contains("success."));
}

#[test]
fn force_rebuilds_everything() {
  if cfg!(windows) {
    return;
  }

  let env = copy_tree_env();
  env.jfdi_cmd().assert().success();

  env
    .jfdi_cmd()
    .arg("--force")
    .assert()
    .success()
    .stdout(predicate::str::contains("cp src/a.txt out/a.out"));
}

#[test]
fn clean_runs_only_clean() {
  if cfg!(windows) {
    return;
  }

  let env = copy_tree_env();
  env.jfdi_cmd().assert().success();
  assert!(env.dir().join("out").is_dir());

  env
    .jfdi_cmd()
    .arg("--clean")
    .assert()
    .code(0)
    .stdout(predicate::str::contains("log:\tremoved out"))
    .stdout(predicate::str::contains("built").not())
    .stdout(predicate::str::contains("cleaned."));

  assert!(!env.dir().join("out").exists());
}

#[test]
fn failing_command_stops_the_build_with_its_exit_code() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("failing_command.jfdi");

  env
    .jfdi_cmd()
    .assert()
    .code(7)
    .stdout(predicate::str::contains("end_build ran").not())
    .stderr(predicate::str::contains("exit 7"));

  assert_eq!(env.read_file("order.txt").trim(), "first");
}

#[test]
fn word_list_runs_as_one_command() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("word_list.jfdi");

  env
    .jfdi_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("log:\tdone"));

  assert_eq!(env.read_file("built.txt"), "built a.c\nbuilt b.c\n");
}

#[test]
fn die_exits_with_three() {
  let env = TestEnv::from_fixture("die.jfdi");

  env
    .jfdi_cmd()
    .args(["--target-os", "windows"])
    .assert()
    .code(3)
    .stderr(predicate::str::contains("die: no compiler for Windows"));
}

#[test]
fn missing_entry_point_is_reported_before_building() {
  let env = TestEnv::from_fixture("missing_contract.jfdi");

  env
    .jfdi_cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("list_input_files() must exist"));
}

#[test]
fn future_version_is_rejected_before_building() {
  let env = TestEnv::from_fixture("future_version.jfdi");

  env
    .jfdi_cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("JFDI_VERSION 2"));

  assert!(!env.dir().join("started.txt").exists());
}

#[test]
fn syntax_error_names_the_line() {
  let env = TestEnv::from_fixture("syntax_error.jfdi");

  env
    .jfdi_cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("syntax error"))
    .stderr(predicate::str::contains("line 4"))
    .stderr(predicate::str::contains("if then"));
}

#[test]
fn missing_default_script_suggests_init() {
  let env = TestEnv::empty();

  env
    .jfdi_cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("jfdi --init"));
}

#[test]
fn missing_explicit_script_says_so() {
  let env = TestEnv::empty();

  env
    .jfdi_cmd()
    .args(["--file", "other.jfdi"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("--file does not exist"));
}

#[test]
fn explicit_file_is_used() {
  let env = TestEnv::empty();
  env.write_file("sub/custom.jfdi", &super::common::fixture_content("vars.jfdi"));

  env
    .jfdi_cmd()
    .args(["-f", "sub/custom.jfdi", "FLAVOR=x", "LEVEL=0"])
    .assert()
    .success()
    .stdout(predicate::str::contains("log:\tdemo x 1"));
}

#[test]
fn variables_come_from_trailing_tokens_and_var_flag() {
  let env = TestEnv::from_fixture("vars.jfdi");

  env
    .jfdi_cmd()
    .args(["-V", "level=4", "flavor=fast", "--target-os", "windows"])
    .assert()
    .success()
    .stdout(predicate::str::contains("log:\tdemo fast 5"))
    .stdout(predicate::str::contains("log:\tbin/demo.exe"));
}

#[test]
fn bare_debug_variable_enables_debug_suffix() {
  let env = TestEnv::from_fixture("vars.jfdi");

  env
    .jfdi_cmd()
    .args(["FLAVOR=m", "LEVEL=1", "DEBUG", "--target-os", "linux"])
    .assert()
    .success()
    .stdout(predicate::str::contains("log:\tbin/demo_d\n"));
}

#[test]
fn unbound_variable_fails() {
  let env = TestEnv::from_fixture("vars.jfdi");

  env
    .jfdi_cmd()
    .env_remove("FLAVOR")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("exp(): var FLAVOR not found"));
}

#[test]
fn toolchain_names_objects() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("toolchain.jfdi");

  env
    .jfdi_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("obj/main.o"))
    .stdout(predicate::str::contains("obj/util.o"))
    .stdout(predicate::str::contains("log:\tgcc -O2 main.o,util.o"));
}

#[test]
fn verbose_shows_progress() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("toolchain.jfdi");

  env
    .jfdi_cmd()
    .arg("-v")
    .assert()
    .success()
    .stdout(predicate::str::contains("building 1/2 file(s)"));
}
