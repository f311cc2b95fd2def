//! Virtual repository over the invocation directory
//!
//! Treats the current directory's own built `.wrap` artifacts as a package
//! source, so a developer's in-progress build participates in resolution
//! alongside the configured repositories. Read-only; packages leave it only
//! by being copied into a folder repository.

use crate::domain::Package;
use crate::error::RepositoryError;
use crate::repository::folder::scan_wrap_archives;
use crate::repository::{PackageRepository, WriteOutcome};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Read-only view over `.wrap` artifacts in the invocation directory
#[derive(Debug, Clone)]
pub struct CurrentDirectoryRepository {
    directory: PathBuf,
}

impl CurrentDirectoryRepository {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl PackageRepository for CurrentDirectoryRepository {
    fn name(&self) -> &str {
        "current directory"
    }

    async fn packages_by_name(&self) -> Result<BTreeMap<String, Vec<Package>>, RepositoryError> {
        scan_wrap_archives(&self.directory, self.name())
    }

    async fn write(&self, _package: &Package) -> Result<WriteOutcome, RepositoryError> {
        Err(RepositoryError::read_only(self.name()))
    }
}
