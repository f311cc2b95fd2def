//! HTTP feed repository
//!
//! A read-only remote feed publishing a JSON index of named, versioned
//! packages:
//!
//! ```json
//! { "packages": [
//!     { "name": "foo", "version": "1.0.0.0", "href": "foo-1.0.0.0.wrap" }
//! ] }
//! ```
//!
//! Hrefs are resolved against the index URL. An unreachable or partial feed
//! degrades to an empty listing so resolution can continue against the
//! remaining repositories in precedence order.

use crate::domain::{Package, Version};
use crate::error::RepositoryError;
use crate::repository::{HttpClient, PackageRepository, WriteOutcome};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

#[derive(Debug, Deserialize)]
struct FeedIndex {
    #[serde(default)]
    packages: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    name: String,
    version: String,
    href: String,
}

/// Read-only repository over a remote JSON feed
#[derive(Debug, Clone)]
pub struct HttpRepository {
    name: String,
    index_url: Url,
    client: HttpClient,
}

impl HttpRepository {
    pub fn new(name: impl Into<String>, index_url: Url, client: HttpClient) -> Self {
        Self {
            name: name.into(),
            index_url,
            client,
        }
    }

    async fn fetch_index(&self) -> Result<FeedIndex, RepositoryError> {
        self.client
            .get_json(self.index_url.as_str(), "package index", &self.name)
            .await
    }
}

#[async_trait]
impl PackageRepository for HttpRepository {
    fn name(&self) -> &str {
        &self.name
    }

    async fn packages_by_name(&self) -> Result<BTreeMap<String, Vec<Package>>, RepositoryError> {
        // A feed that cannot be reached contributes nothing; it must not
        // abort resolution against the other repositories.
        let index = match self.fetch_index().await {
            Ok(index) => index,
            Err(_) => return Ok(BTreeMap::new()),
        };

        let mut by_name: BTreeMap<String, Vec<Package>> = BTreeMap::new();
        for entry in index.packages {
            let Ok(version) = entry.version.parse::<Version>() else {
                continue;
            };
            let Ok(archive_url) = self.index_url.join(&entry.href) else {
                continue;
            };
            let package =
                Package::from_remote(&entry.name, version, archive_url, self.client.clone());
            by_name.entry(package.key()).or_default().push(package);
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
