mod build;
mod init;

pub use build::{BuildArgs, cmd_build};
pub use init::cmd_init;
