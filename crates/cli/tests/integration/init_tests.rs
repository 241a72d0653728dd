//! `jfdi --init` integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn init_writes_a_runnable_scaffold() {
  let env = TestEnv::empty();

  env
    .jfdi_cmd()
    .arg("--init")
    .assert()
    .success()
    .stdout(predicate::str::contains("created"));

  assert!(env.read_file("build.jfdi").contains("JFDI_VERSION = 1"));

  env
    .jfdi_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("success."));
}

#[test]
fn init_refuses_to_overwrite() {
  let env = TestEnv::empty();
  env.write_file("build.jfdi", "-- keep me");

  env
    .jfdi_cmd()
    .arg("--init")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("already exists"));

  assert_eq!(env.read_file("build.jfdi"), "-- keep me");
}

#[test]
fn init_honours_file_flag() {
  let env = TestEnv::empty();

  env
    .jfdi_cmd()
    .args(["--init", "--file", "release.jfdi"])
    .assert()
    .success();

  assert!(env.dir().join("release.jfdi").is_file());
  assert!(!env.dir().join("build.jfdi").exists());
}
