//! Indexed folder repository
//!
//! A read-only folder repository driven by an `index.toml` at its root
//! rather than a directory scan. Backs `file://` remotes, where the feed
//! maintainer publishes the index next to the archives:
//!
//! ```toml
//! [packages]
//! foo = ["1.0.0.0", "2.0.0.0"]
//! bar = ["0.1.0.0"]
//! ```

use crate::domain::{Package, Version};
use crate::error::RepositoryError;
use crate::repository::{PackageRepository, WriteOutcome};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Index file name expected at the repository root
const INDEX_FILE_NAME: &str = "index.toml";

#[derive(Debug, Deserialize)]
struct IndexFile {
    #[serde(default)]
    packages: BTreeMap<String, Vec<String>>,
}

/// Read-only repository listing packages through an index file
#[derive(Debug, Clone)]
pub struct IndexedFolderRepository {
    name: String,
    root: PathBuf,
}

impl IndexedFolderRepository {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    fn load_index(&self) -> Result<IndexFile, RepositoryError> {
        let path = self.root.join(INDEX_FILE_NAME);
        let content =
            fs::read_to_string(&path).map_err(|e| RepositoryError::io(&self.name, path, e))?;
        toml::from_str(&content).map_err(|e| RepositoryError::index(&self.name, e.to_string()))
    }
}

#[async_trait]
impl PackageRepository for IndexedFolderRepository {
    fn name(&self) -> &str {
        &self.name
    }

    async fn packages_by_name(&self) -> Result<BTreeMap<String, Vec<Package>>, RepositoryError> {
        let index = self.load_index()?;
        let mut by_name: BTreeMap<String, Vec<Package>> = BTreeMap::new();

        for (name, versions) in index.packages {
            for version_str in versions {
                let version: Version = version_str.parse().map_err(|e| {
                    RepositoryError::index(&self.name, format!("{} for '{}'", e, name))
                })?;
                let archive = self.root.join(format!("{}-{}.wrap", name, version));
                let package = Package::from_file(&name, version, archive);
                by_name.entry(package.key()).or_default().push(package);
            }
        }

        for group in by_name.values_mut() {
            group.sort_by_key(|p| p.version);
        }
        Ok(by_name)
    }

    async fn write(&self, _package: &Package) -> Result<WriteOutcome, RepositoryError> {
        Err(RepositoryError::read_only(&self.name))
    }
}
