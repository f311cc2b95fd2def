//! Resolved package artifacts
//!
//! A `Package` is immutable once resolved; its identity is the
//! case-insensitive name plus the version. The source locates the `.wrap`
//! archive, either on disk or behind a remote feed href.

use super::Version;
use crate::error::RepositoryError;
use crate::repository::HttpClient;
use std::fmt;
use std::path::PathBuf;

/// Where a package's archive content lives
#[derive(Debug, Clone)]
pub enum PackageSource {
    /// A `.wrap` archive on the local filesystem
    File(PathBuf),
    /// A `.wrap` archive behind a remote feed, fetched on demand
    Remote { url: String, client: HttpClient },
}

/// A concrete, resolved package
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub version: Version,
    source: PackageSource,
}

impl Package {
    /// Creates a package backed by a local archive file
    pub fn from_file(name: impl Into<String>, version: Version, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version,
            source: PackageSource::File(path.into()),
        }
    }

    /// Creates a package backed by a remote feed href
    pub fn from_remote(
        name: impl Into<String>,
        version: Version,
        url: impl Into<String>,
        client: HttpClient,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            source: PackageSource::Remote {
                url: url.into(),
                client,
            },
        }
    }

    /// The lowercase name used for identity comparisons
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// The canonical archive file name, `<name>-<version>.wrap`
    pub fn archive_file_name(&self) -> String {
        format!("{}-{}.wrap", self.name, self.version)
    }

    /// The local archive path, when the package is file-backed
    pub fn local_path(&self) -> Option<&PathBuf> {
        match &self.source {
            PackageSource::File(path) => Some(path),
            PackageSource::Remote { .. } => None,
        }
    }

    /// Reads the package's archive bytes, downloading if remote
    pub async fn content(&self) -> Result<Vec<u8>, RepositoryError> {
        match &self.source {
            PackageSource::File(path) => std::fs::read(path)
                .map_err(|e| RepositoryError::io(self.to_string(), path.clone(), e)),
            PackageSource::Remote { url, client } => client
                .get_bytes(url, &self.name, "remote feed")
                .await
                .map_err(|e| RepositoryError::network(self.to_string(), e.to_string())),
        }
    }
}

/// Identity is (case-insensitive name, version); the source is not part of it
impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name) && self.version == other.version
    }
}

impl Eq for Package {}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_identity_ignores_source() {
        let a = Package::from_file("foo", version("1.0"), "/repo-a/foo-1.0.0.0.wrap");
        let b = Package::from_file("Foo", version("1.0"), "/repo-b/foo-1.0.0.0.wrap");
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_differs_by_version() {
        let a = Package::from_file("foo", version("1.0"), "/r/foo-1.0.0.0.wrap");
        let b = Package::from_file("foo", version("2.0"), "/r/foo-2.0.0.0.wrap");
        assert_ne!(a, b);
    }

    #[test]
    fn test_archive_file_name() {
        let package = Package::from_file("foo", version("1.2.3.4"), "/r/foo-1.2.3.4.wrap");
        assert_eq!(package.archive_file_name(), "foo-1.2.3.4.wrap");
    }

    #[test]
    fn test_display() {
        let package = Package::from_file("foo", version("1.0"), "/r/foo-1.0.0.0.wrap");
        assert_eq!(package.to_string(), "foo-1.0.0.0");
    }

    #[tokio::test]
    async fn test_content_missing_file_is_io_error() {
        let package = Package::from_file("foo", version("1.0"), "/nonexistent/foo-1.0.0.0.wrap");
        let err = package.content().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Io { .. }));
    }
}
