//! Filesystem-backed package repository
//!
//! A folder repository is a directory of `<name>-<version>.wrap` archives
//! (gzipped tarballs) plus an expansion cache under `_cache/` where copied
//! archives are staged into a usable layout. The project and system
//! repositories are both folder repositories.

use crate::domain::{Package, PackageDescriptor, Version};
use crate::error::RepositoryError;
use crate::output::CommandOutput;
use crate::repository::{PackageRepository, WriteOutcome};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Directory under the repository root holding expanded packages
const CACHE_DIR_NAME: &str = "_cache";

fn archive_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Greedy name followed by the trailing dash-separated version
    PATTERN.get_or_init(|| {
        Regex::new(r"^(.+)-(\d+(?:\.\d+){0,3})\.wrap$").expect("archive pattern is valid")
    })
}

/// Scans a directory for `.wrap` archives, grouped by lowercase package
/// name and sorted by ascending version. A missing directory is an empty
/// repository, not an error. Files that do not match the naming convention
/// are ignored.
pub(crate) fn scan_wrap_archives(
    root: &Path,
    repository: &str,
) -> Result<BTreeMap<String, Vec<Package>>, RepositoryError> {
    let mut by_name: BTreeMap<String, Vec<Package>> = BTreeMap::new();
    if !root.is_dir() {
        return Ok(by_name);
    }

    let entries =
        fs::read_dir(root).map_err(|e| RepositoryError::io(repository, root.to_path_buf(), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| RepositoryError::io(repository, root.to_path_buf(), e))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(captures) = archive_name_pattern().captures(file_name) else {
            continue;
        };
        let Ok(version) = captures[2].parse::<Version>() else {
            continue;
        };
        let package = Package::from_file(&captures[1], version, entry.path());
        by_name.entry(package.key()).or_default().push(package);
    }

    for group in by_name.values_mut() {
        group.sort_by_key(|p| p.version);
    }
    Ok(by_name)
}

/// Read-write repository over a directory of `.wrap` archives
#[derive(Debug, Clone)]
pub struct FolderRepository {
    name: String,
    root: PathBuf,
}

impl FolderRepository {
    /// Creates a folder repository over the given directory
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// The repository's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR_NAME)
    }

    /// Where a package's expanded copy lives
    fn expanded_dir(&self, package: &Package) -> PathBuf {
        self.cache_dir().join(format!("{}", package))
    }

    /// Extracts an archive into the expansion cache
    fn expand_archive(&self, package: &Package, archive: &Path) -> Result<(), RepositoryError> {
        let target = self.expanded_dir(package);
        fs::create_dir_all(&target)
            .map_err(|e| RepositoryError::io(&self.name, target.clone(), e))?;

        let file = fs::File::open(archive)
            .map_err(|e| RepositoryError::io(&self.name, archive.to_path_buf(), e))?;
        let mut tarball = tar::Archive::new(GzDecoder::new(file));
        tarball.unpack(&target).map_err(|e| {
            RepositoryError::invalid_archive(package.to_string(), e.to_string())
        })?;
        Ok(())
    }

    /// True when the package already has an expanded copy in the cache
    fn is_expanded(&self, package: &Package) -> bool {
        self.expanded_dir(package).is_dir()
    }

    /// Unpacks every copied archive that has no expanded copy yet.
    /// One package's failure becomes an error event; the rest of the batch
    /// still runs.
    pub async fn expand_packages(&self) -> Vec<CommandOutput> {
        let mut output = Vec::new();
        let packages = match self.packages_by_name().await {
            Ok(packages) => packages,
            Err(e) => return vec![CommandOutput::error(e.to_string())],
        };

        for package in packages.values().flatten() {
            if self.is_expanded(package) {
                continue;
            }
            let Some(archive) = package.local_path() else {
                continue;
            };
            match self.expand_archive(package, &archive.clone()) {
                Ok(()) => output.push(CommandOutput::result(format!(
                    "Expanded '{}' into the package cache.",
                    package
                ))),
                Err(e) => output.push(CommandOutput::error(e.to_string())),
            }
        }
        output
    }

    /// Checks that every dependency in the descriptor has a locally usable
    /// (expanded) copy, repairing drift between "copied" and "expanded"
    /// state by re-extracting.
    pub async fn verify_package_cache(&self, descriptor: &PackageDescriptor) -> Vec<CommandOutput> {
        let mut output = Vec::new();

        for dependency in &descriptor.dependencies {
            let found = match self.find(&dependency.name, &dependency.vertices).await {
                Ok(found) => found,
                Err(e) => {
                    output.push(CommandOutput::error(e.to_string()));
                    continue;
                }
            };
            let Some(package) = found else {
                output.push(CommandOutput::warning(format!(
                    "'{}' is not available in the {}.",
                    dependency,
                    self.name
                )));
                continue;
            };
            if self.is_expanded(&package) {
                continue;
            }
            let Some(archive) = package.local_path().cloned() else {
                continue;
            };
            match self.expand_archive(&package, &archive) {
                Ok(()) => output.push(CommandOutput::result(format!(
                    "Expanded '{}' into the package cache.",
                    package
                ))),
                Err(e) => output.push(CommandOutput::error(e.to_string())),
            }
        }
        output
    }
}

#[async_trait]
impl PackageRepository for FolderRepository {
    fn name(&self) -> &str {
        &self.name
    }

    async fn packages_by_name(&self) -> Result<BTreeMap<String, Vec<Package>>, RepositoryError> {
        scan_wrap_archives(&self.root, &self.name)
    }

    async fn write(&self, package: &Package) -> Result<WriteOutcome, RepositoryError> {
        // Identity is case-insensitive, so the presence check goes through
        // the lowercase-keyed scan rather than the literal file name
        let existing = self.packages_by_name().await?;
        let already_present = existing
            .get(&package.key())
            .is_some_and(|group| group.iter().any(|p| p.version == package.version));
        if already_present {
            return Ok(WriteOutcome::AlreadyPresent);
        }

        let destination = self.root.join(package.archive_file_name());
        let content = package.content().await?;
        fs::create_dir_all(&self.root)
            .map_err(|e| RepositoryError::io(&self.name, self.root.clone(), e))?;
        fs::write(&destination, content)
            .map_err(|e| RepositoryError::io(&self.name, destination.clone(), e))?;
        Ok(WriteOutcome::Copied)
    }
}
