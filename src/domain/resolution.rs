//! Resolution results
//!
//! One resolve call produces one `DependencyResolutionResult`, consumed
//! immediately by the copy and cache-verify steps. An absent package on an
//! entry means "not found in any queried repository".

use super::{Package, PackageDependency};

/// One dependency's resolution outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// The original requirement
    pub dependency: PackageDependency,
    /// The chosen package, or None if no repository satisfied the requirement
    pub package: Option<Package>,
}

/// The outcome of resolving a descriptor against an ordered repository list
#[derive(Debug, Clone, Default)]
pub struct DependencyResolutionResult {
    /// Per-dependency outcomes, in descriptor order
    pub dependencies: Vec<ResolvedDependency>,
    /// Names of every repository consulted, in precedence order
    pub repositories_searched: Vec<String>,
}

impl DependencyResolutionResult {
    /// True when at least one dependency resolved to a concrete package
    pub fn is_success(&self) -> bool {
        self.dependencies.iter().any(|d| d.package.is_some())
    }

    /// Entries that resolved to a concrete package
    pub fn resolved(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.dependencies.iter().filter(|d| d.package.is_some())
    }

    /// Entries no repository could satisfy
    pub fn missing(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.dependencies.iter().filter(|d| d.package.is_none())
    }

    /// Refines the result to its resolved subset. System updates use this:
    /// a package with no update candidate is simply not an update, not a
    /// failure.
    pub fn retain_resolved(mut self) -> Self {
        self.dependencies.retain(|d| d.package.is_some());
        self
    }
}
