//! Shared utilities.
//!
//! Test helpers live here; they are compiled for unit tests only.

#[cfg(test)]
pub mod testutil;
