//! Per-run state shared by every capability call.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::platform::{
  self,
  os::{Os, TargetOs},
};
use crate::toolchain::ToolchainProfile;
use crate::vars::CliVars;

/// Options for one build run, usually straight from the command line.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
  /// Build description to load. `None` means `build.jfdi` in the current directory.
  pub script: Option<PathBuf>,
  /// Run `clean()` instead of building.
  pub clean: bool,
  /// Make `new()` always report stale.
  pub force: bool,
  /// Target OS override; defaults to the host.
  pub target_os: Option<TargetOs>,
  /// Command-line variables.
  pub vars: CliVars,
}

/// The explicit context a run threads through capabilities and lifecycle calls.
#[derive(Debug, Clone)]
pub struct BuildContext {
  pub vars: CliVars,
  pub force: bool,
  pub host_os: Os,
  pub target_os: TargetOs,
  /// Set by `arm()`.
  pub toolchain: Option<ToolchainProfile>,
}

/// Shared handle; the run is single-threaded so a `RefCell` is enough.
pub type SharedContext = Rc<RefCell<BuildContext>>;

impl BuildContext {
  pub fn new(options: &BuildOptions) -> Self {
    let host_os = platform::host_os();
    Self {
      vars: options.vars.clone(),
      force: options.force,
      host_os,
      target_os: options.target_os.clone().unwrap_or(TargetOs::Known(host_os)),
      toolchain: None,
    }
  }

  pub fn shared(self) -> SharedContext {
    Rc::new(RefCell::new(self))
  }
}

impl Default for BuildContext {
  fn default() -> Self {
    Self::new(&BuildOptions::default())
  }
}
