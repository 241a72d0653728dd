//! `$NAME` expansion over an ordered chain of scopes.
//!
//! A `$` starts a token that runs to the next space or the end of the input.
//! A lone `$` is copied through. Each name is resolved against the scopes in
//! order and the first hit wins; a name no scope binds is an error.
//!
//! The chain `exp()` uses is: caller locals, command-line variables, process
//! environment, build-description globals.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{BuildError, Result};
use crate::value::Value;
use crate::vars::CliVars;

/// One layer of the lookup chain.
pub trait Scope {
  /// Look up `name`, returning `None` when this scope does not bind it.
  fn resolve(&self, name: &str) -> Result<Option<Value>>;
}

impl Scope for BTreeMap<String, Value> {
  fn resolve(&self, name: &str) -> Result<Option<Value>> {
    Ok(self.get(name).cloned())
  }
}

impl Scope for HashMap<String, Value> {
  fn resolve(&self, name: &str) -> Result<Option<Value>> {
    Ok(self.get(name).cloned())
  }
}

impl Scope for CliVars {
  fn resolve(&self, name: &str) -> Result<Option<Value>> {
    Ok(self.lookup(name))
  }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Scope for ProcessEnv {
  fn resolve(&self, name: &str) -> Result<Option<Value>> {
    Ok(std::env::var(name).ok().map(Value::Scalar))
  }
}

/// Expand every `$NAME` token in `input`.
pub fn expand(input: &str, scopes: &[&dyn Scope]) -> Result<String> {
  debug!("expanding \"{}\"", input);

  let mut out = String::with_capacity(input.len());
  let mut rest = input;

  while let Some(dollar) = rest.find('$') {
    out.push_str(&rest[..dollar]);

    let after = &rest[dollar + 1..];
    let end = after.find(' ').unwrap_or(after.len());
    let name = &after[..end];

    if name.is_empty() {
      out.push('$');
    } else {
      out.push_str(&resolve(name, scopes)?.joined());
    }

    rest = &after[end..];
  }

  out.push_str(rest);
  Ok(out)
}

/// Resolve a single name against the chain.
pub fn resolve(name: &str, scopes: &[&dyn Scope]) -> Result<Value> {
  for scope in scopes {
    if let Some(value) = scope.resolve(name)? {
      return Ok(value);
    }
  }
  Err(BuildError::UnboundVariable { name: name.to_string() })
}
