//! Operating-system identity used by platform-filtered directives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The operating system a configuration is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Macos,
    Windows,
    Bsd,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Macos
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(any(
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        )) {
            Platform::Bsd
        } else {
            Platform::Linux
        }
    }

    /// Whether a directive restricted to `only` applies on this platform.
    ///
    /// `None` means unrestricted.
    pub fn admits(self, only: Option<Platform>) -> bool {
        only.is_none_or(|p| p == self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Macos => "macos",
            Platform::Windows => "windows",
            Platform::Bsd => "bsd",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "macos" | "darwin" | "osx" => Ok(Platform::Macos),
            "windows" | "win" => Ok(Platform::Windows),
            "bsd" | "freebsd" | "openbsd" | "netbsd" => Ok(Platform::Bsd),
            other => Err(format!("Unknown platform: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits() {
        assert!(Platform::Linux.admits(None));
        assert!(Platform::Macos.admits(Some(Platform::Macos)));
        assert!(!Platform::Linux.admits(Some(Platform::Macos)));
    }

    #[test]
    fn test_parse() {
        assert_eq!("macos".parse::<Platform>(), Ok(Platform::Macos));
        assert_eq!("Darwin".parse::<Platform>(), Ok(Platform::Macos));
        assert!("amiga".parse::<Platform>().is_err());
    }
}
