//! Dependency resolution over ordered repositories
//!
//! A flat pass over a descriptor's direct dependencies: each dependency is
//! looked up in the supplied repositories in order, and the first
//! repository with a satisfying package wins. Later repositories are not
//! consulted once a hit is found, so order encodes precedence. Resolution
//! is fully deterministic for fixed inputs.
//!
//! Transitive dependencies of resolved packages are not followed here; the
//! update workflows only ever resolve the requested descriptor's own list.

use crate::domain::{DependencyResolutionResult, PackageDescriptor, ResolvedDependency};
use crate::repository::PackageRepository;
use std::sync::Arc;

/// Resolves every dependency in the descriptor against the repositories,
/// in order. A repository whose lookup fails (an unreachable feed, an
/// unreadable index) counts as "found nothing" for that repository and
/// resolution continues with the rest.
pub async fn try_resolve_dependencies(
    descriptor: &PackageDescriptor,
    repositories: &[Arc<dyn PackageRepository>],
) -> DependencyResolutionResult {
    let repositories_searched = repositories.iter().map(|r| r.name().to_string()).collect();
    let mut dependencies = Vec::with_capacity(descriptor.dependencies.len());

    for dependency in &descriptor.dependencies {
        let mut package = None;
        for repository in repositories {
            match repository.find(&dependency.name, &dependency.vertices).await {
                Ok(Some(found)) => {
                    package = Some(found);
                    break;
                }
                Ok(None) | Err(_) => continue,
            }
        }
        dependencies.push(ResolvedDependency {
            dependency: dependency.clone(),
            package,
        });
    }

    DependencyResolutionResult {
        dependencies,
        repositories_searched,
    }
}
