//! Capability groups registered into the Lua globals.

pub mod fs;
pub mod path;
