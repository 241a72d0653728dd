use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Operating systems a build can run on or target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// The identifier published to build descriptions as `HOST_OS` / `TARGET_OS`
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "Linux",
      Self::MacOs => "Darwin",
      Self::Windows => "Windows",
    }
  }

  /// File extension for executables, including the dot
  pub fn exe_extension(&self) -> &'static str {
    match self {
      Self::Windows => ".exe",
      Self::Linux | Self::MacOs => "",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Os {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "linux" => Ok(Self::Linux),
      "darwin" | "macos" | "osx" => Ok(Self::MacOs),
      "windows" | "win32" | "win" => Ok(Self::Windows),
      other => Err(format!("unknown OS '{}', expected one of: Linux, Darwin, Windows", other)),
    }
  }
}

/// The OS a build targets, as chosen with `--target-os`.
///
/// Names of known systems are normalized to their published identifier
/// (`windows` becomes `Windows`); any other name, such as `Android` or
/// `FreeBSD`, is kept verbatim so descriptions can branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetOs {
  Known(Os),
  Other(String),
}

impl TargetOs {
  /// The identifier published as `TARGET_OS`
  pub fn as_str(&self) -> &str {
    match self {
      Self::Known(os) => os.as_str(),
      Self::Other(name) => name,
    }
  }

  /// File extension for executables, including the dot
  pub fn exe_extension(&self) -> &'static str {
    match self {
      Self::Known(os) => os.exe_extension(),
      Self::Other(_) => "",
    }
  }
}

impl From<Os> for TargetOs {
  fn from(os: Os) -> Self {
    Self::Known(os)
  }
}

impl fmt::Display for TargetOs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for TargetOs {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match s.parse::<Os>() {
      Ok(os) => Self::Known(os),
      Err(_) => Self::Other(s.to_string()),
    })
  }
}
