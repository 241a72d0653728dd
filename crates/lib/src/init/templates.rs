//! Template content for `jfdi --init`.

/// Starter build description.
pub const BUILD_SCRIPT_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/build.jfdi"));
