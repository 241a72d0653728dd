//! Lua runtime and build description hosting.
//!
//! # Submodules
//!
//! - [`loader`] - Reading and compiling the build description
//! - [`globals`] - The capability API (`cmd()`, `exp()`, `arm()`, etc.)
//! - [`helpers`] - File and path capability groups
//! - [`host`] - Executing the description and validating its lifecycle contract
//! - [`runtime`] - Low-level Lua VM management
//! - [`scope`] - Lua tables as `exp()` lookup scopes

pub mod globals;
pub mod helpers;
pub mod host;
pub mod loader;
pub mod runtime;
pub mod scope;
