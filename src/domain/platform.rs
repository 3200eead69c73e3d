//! Host platform identifier

use std::fmt;
use std::str::FromStr;

use crate::domain::error::RecordingError;

/// Platforms with a capture backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Resolve the platform this binary was compiled for.
    pub fn current() -> Result<Self, RecordingError> {
        std::env::consts::OS.parse()
    }

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = RecordingError;

    /// Accepts Rust `target_os` names as well as the `win32`/`darwin` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            _ => Err(RecordingError::unsupported_platform(s)),
        }
    }
}
