//! jfdi-lib integration tests.

mod common;
mod expand_tests;
