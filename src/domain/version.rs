//! Four-component package version
//!
//! Wrap packages are versioned as `major.minor.build.revision`. Versions
//! are totally ordered, most-significant component first. Missing trailing
//! components parse as zero, so `1.2` is the same version as `1.2.0.0`.

use crate::error::InvalidVersion;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A package version with four numeric components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub build: u64,
    pub revision: u64,
}

impl Version {
    /// Creates a new version from its four components
    pub fn new(major: u64, minor: u64, build: u64, revision: u64) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let trimmed = s.strip_prefix('v').unwrap_or(s);
        if trimmed.is_empty() {
            return Err(InvalidVersion::new(s));
        }

        let mut components = [0u64; 4];
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() > 4 {
            return Err(InvalidVersion::new(s));
        }
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| InvalidVersion::new(s))?;
        }

        Ok(Version::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
