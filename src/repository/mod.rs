//! Package repository backends
//!
//! This module provides:
//! - The `PackageRepository` trait every backing store implements
//! - HTTP client shared foundation with retry logic
//! - Folder repository (filesystem-backed, read-write, owns the expansion
//!   cache)
//! - Indexed folder repository (read-only, driven by an index file)
//! - Current-directory virtual repository
//! - HTTP feed repository (read-only, network-backed)

mod client;
mod current_dir;
mod folder;
mod http;
mod indexed;

pub use client::HttpClient;
pub use current_dir::CurrentDirectoryRepository;
pub use folder::FolderRepository;
pub use http::HttpRepository;
pub use indexed::IndexedFolderRepository;

use crate::domain::{Package, VersionVertex};
use crate::error::RepositoryError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Outcome of writing a package into a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The archive was copied into the backing store
    Copied,
    /// The exact (name, version) was already present; the write was a no-op
    AlreadyPresent,
}

/// Uniform read/write surface over heterogeneous package stores.
///
/// Repositories are consulted in caller-supplied order during resolution;
/// order encodes precedence. Read methods reflect the backing store at call
/// time, with no caching guarantee beyond a single call's consistency.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Human-readable repository name, used in messages
    fn name(&self) -> &str;

    /// All packages, grouped by lowercase name, each group sorted by
    /// ascending version
    async fn packages_by_name(&self)
        -> Result<BTreeMap<String, Vec<Package>>, RepositoryError>;

    /// The greatest version under `name` satisfying every vertex, or None.
    /// Versions are unique per name within one repository, so there is no
    /// tie to break.
    async fn find(
        &self,
        name: &str,
        vertices: &[VersionVertex],
    ) -> Result<Option<Package>, RepositoryError> {
        let packages = self.packages_by_name().await?;
        Ok(packages.get(&name.to_lowercase()).and_then(|candidates| {
            candidates
                .iter()
                .rev()
                .find(|p| vertices.iter().all(|v| v.is_compatible_with(&p.version)))
                .cloned()
        }))
    }

    /// Copies a package's archive into the backing store. Idempotent when
    /// the exact version already exists. Read-only backends return
    /// `RepositoryError::ReadOnly`.
    async fn write(&self, package: &Package) -> Result<WriteOutcome, RepositoryError>;
}
