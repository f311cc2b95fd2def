//! Named dependency requirements

use super::{Version, VersionVertex};
use std::fmt;

/// A named requirement: a candidate package must carry this name
/// (case-insensitively) and satisfy every vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDependency {
    /// Package name; identity is case-insensitive
    pub name: String,
    /// Conjunction of version-range predicates
    pub vertices: Vec<VersionVertex>,
}

impl PackageDependency {
    /// Creates a new dependency
    pub fn new(name: impl Into<String>, vertices: Vec<VersionVertex>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    /// Creates an unconstrained dependency
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, vec![VersionVertex::Any])
    }

    /// Creates a dependency anchored to an installed version, matching only
    /// genuine upward revisions. Used by system updates.
    pub fn update_of(name: impl Into<String>, installed: Version) -> Self {
        Self::new(name, vec![VersionVertex::CompatibleUpdate(installed)])
    }

    /// The lowercase name used for identity comparisons
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-insensitive name comparison
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Checks whether a candidate version satisfies every vertex
    pub fn is_satisfied_by(&self, candidate: &Version) -> bool {
        self.vertices.iter().all(|v| v.is_compatible_with(candidate))
    }
}

impl fmt::Display for PackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constraints: Vec<String> = self
            .vertices
            .iter()
            .filter(|v| !matches!(v, VersionVertex::Any))
            .map(|v| v.to_string())
            .collect();
        if constraints.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, constraints.join(", "))
        }
    }
}
