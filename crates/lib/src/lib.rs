//! jfdi-lib: Core types and logic for JFDI
//!
//! This crate hosts a Lua build description and drives it through its
//! lifecycle:
//! - [`lua`]: the Lua VM, the capability API and the lifecycle contract
//! - [`driver`]: the build lifecycle from loading to the final report
//! - [`expand`]: `$NAME` expansion over an ordered scope chain
//! - [`stale`]: mtime-based rebuild decisions
//! - [`execute`]: running shell commands

pub mod consts;
pub mod context;
pub mod driver;
pub mod error;
pub mod execute;
pub mod expand;
pub mod init;
pub mod lua;
pub mod platform;
pub mod stale;
pub mod toolchain;
pub mod util;
pub mod value;
pub mod vars;

pub use context::{BuildContext, BuildOptions};
pub use driver::{BuildReport, run_build};
pub use error::{BuildError, Result};
