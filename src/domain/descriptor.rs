//! Declared dependency lists
//!
//! A descriptor is the ordered list of named dependencies for a project, or
//! a synthesized virtual package (system updates build one descriptor per
//! installed package, anchored to its current version).

use super::{PackageDependency, Version};

/// An ordered list of named dependency constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub dependencies: Vec<PackageDependency>,
}

impl PackageDescriptor {
    /// Creates a descriptor from a list of dependencies
    pub fn new(dependencies: Vec<PackageDependency>) -> Self {
        Self { dependencies }
    }

    /// Creates a single-dependency descriptor anchoring an installed
    /// package to its current version. Resolving it finds only genuine
    /// upward revisions.
    pub fn update_anchor(name: impl Into<String>, installed: Version) -> Self {
        Self::new(vec![PackageDependency::update_of(name, installed)])
    }

    /// Keeps only the dependency with the given name (case-insensitive)
    pub fn retain_named(&mut self, name: &str) {
        self.dependencies.retain(|d| d.matches_name(name));
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
