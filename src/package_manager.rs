//! Package manager orchestration
//!
//! The facade the command layer calls: resolve a descriptor, copy the
//! resolved packages into target repositories, expand archives and verify
//! the package cache. Owns conflict detection. Every operation yields an
//! ordered sequence of output events; data-shaped problems (a missing
//! dependency, a conflicting group, one failed write) become events, never
//! fatal errors, so sibling packages keep processing.

use crate::domain::{DependencyResolutionResult, Package, PackageDescriptor};
use crate::output::CommandOutput;
use crate::repository::{FolderRepository, PackageRepository, WriteOutcome};
use crate::resolver;
use std::sync::Arc;

/// Orchestrates resolution and multi-repository synchronization
#[derive(Debug, Default)]
pub struct PackageManager;

impl PackageManager {
    pub fn new() -> Self {
        Self
    }

    /// Resolves the descriptor against the repositories, first hit wins
    pub async fn try_resolve_dependencies(
        &self,
        descriptor: &PackageDescriptor,
        repositories: &[Arc<dyn PackageRepository>],
    ) -> DependencyResolutionResult {
        resolver::try_resolve_dependencies(descriptor, repositories).await
    }

    /// Copies every resolved package into every target repository.
    ///
    /// Missing dependencies become `DependencyNotFound` events naming every
    /// repository that was searched. Resolved entries sharing a
    /// (case-insensitive) name but pointing at different packages become one
    /// `DependencyConflict` event per name group and are not written; the
    /// ambiguity is pushed to the user rather than auto-picking a winner.
    pub async fn copy_packages_to_repositories(
        &self,
        result: &DependencyResolutionResult,
        targets: &[Arc<dyn PackageRepository>],
    ) -> Vec<CommandOutput> {
        let mut output = Vec::new();

        for missing in result.missing() {
            output.push(CommandOutput::DependencyNotFound {
                dependency: missing.dependency.clone(),
                repositories_searched: result.repositories_searched.clone(),
            });
        }

        // Group resolved entries by dependency name, keeping the
        // descriptor's declared order (first occurrence wins the slot)
        let mut groups: Vec<(String, Vec<Package>)> = Vec::new();
        for entry in result.resolved() {
            if let Some(package) = entry.package.clone() {
                let key = entry.dependency.key();
                match groups.iter_mut().find(|(name, _)| *name == key) {
                    Some((_, packages)) => packages.push(package),
                    None => groups.push((key, vec![package])),
                }
            }
        }

        let mut to_copy = Vec::new();
        for (name, mut packages) in groups {
            let all_same = packages.windows(2).all(|pair| pair[0] == pair[1]);
            if all_same {
                // Duplicate requirements for one package collapse to one copy
                if let Some(package) = packages.pop() {
                    to_copy.push(package);
                }
            } else {
                output.push(CommandOutput::DependencyConflict { name, packages });
            }
        }

        for package in to_copy {
            for target in targets {
                match target.write(&package).await {
                    Ok(WriteOutcome::Copied) => output.push(CommandOutput::result(format!(
                        "Copying '{}' to '{}'.",
                        package,
                        target.name()
                    ))),
                    Ok(WriteOutcome::AlreadyPresent) => {
                        output.push(CommandOutput::result(format!(
                            "'{}' is already present in '{}'.",
                            package,
                            target.name()
                        )))
                    }
                    Err(e) => output.push(CommandOutput::error(e.to_string())),
                }
            }
        }

        output
    }

    /// Checks (and repairs) the expanded-package cache of a folder
    /// repository against a descriptor
    pub async fn verify_package_cache(
        &self,
        repository: &FolderRepository,
        descriptor: &PackageDescriptor,
    ) -> Vec<CommandOutput> {
        repository.verify_package_cache(descriptor).await
    }

    /// Stages copied archives into their usable layout across repositories
    pub async fn expand_packages(&self, repositories: &[&FolderRepository]) -> Vec<CommandOutput> {
        let mut output = Vec::new();
        for repository in repositories {
            output.extend(repository.expand_packages().await);
        }
        output
    }
}
