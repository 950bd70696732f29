use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system used to pick install commands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Windows,
    Mac,
    Linux,
}

impl Os {
    pub const ALL: [Os; 3] = [Os::Windows, Os::Mac, Os::Linux];

    /// OS of the running binary. Anything that is not Windows or macOS is
    /// treated as Linux, the same fallback the site used for unknown platforms.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            "macos" => Os::Mac,
            _ => Os::Linux,
        }
    }

    /// Name used in the `os` field of install commands
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::Mac => "mac",
            Os::Linux => "linux",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::Mac => "macOS",
            Os::Linux => "Linux",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown operating system: {0}")]
pub struct UnknownOs(pub String);

impl FromStr for Os {
    type Err = UnknownOs;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" => Ok(Os::Windows),
            "mac" | "macos" | "darwin" | "osx" => Ok(Os::Mac),
            "linux" => Ok(Os::Linux),
            other => Err(UnknownOs(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Win".parse::<Os>().unwrap(), Os::Windows);
        assert_eq!("darwin".parse::<Os>().unwrap(), Os::Mac);
        assert_eq!(" macos ".parse::<Os>().unwrap(), Os::Mac);
        assert_eq!("linux".parse::<Os>().unwrap(), Os::Linux);
        assert!("beos".parse::<Os>().is_err());
    }

    #[test]
    fn test_unknown_os_message() {
        let err = "beos".parse::<Os>().unwrap_err();
        assert_eq!(err, UnknownOs("beos".into()));
        assert_eq!(err.to_string(), "unknown operating system: beos");
    }

    #[test]
    fn test_fixture_names_round_trip() {
        for os in Os::ALL {
            assert_eq!(os.as_str().parse::<Os>().unwrap(), os);
        }
    }
}
