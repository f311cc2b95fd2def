//! Project descriptor file (wrap.toml)
//!
//! A project declares its dependencies in a `wrap.toml` next to (or above)
//! the directory it is invoked from:
//!
//! ```toml
//! [dependencies]
//! openwrap = "> 1.0"
//! "OpenWrap.Testing" = "= 1.2.3.4"
//! sax = "*"
//! ```
//!
//! The file is located by walking the invocation directory's ancestors; the
//! nearest match wins. A project without a descriptor is a valid state
//! unless a project-scoped operation is requested.

use crate::domain::{parse_constraints, PackageDependency, PackageDescriptor};
use crate::error::DescriptorError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor file name searched for in ancestor directories
pub const DESCRIPTOR_FILE_NAME: &str = "wrap.toml";

#[derive(Debug, Deserialize)]
struct DescriptorFile {
    #[serde(default)]
    dependencies: toml::Table,
}

/// A parsed project descriptor plus the file it came from
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    /// Path of the wrap.toml this was parsed from
    pub path: PathBuf,
    /// The declared dependency list
    pub descriptor: PackageDescriptor,
}

impl ProjectDescriptor {
    /// The directory containing the descriptor file
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// Walks `start` and its ancestors for a descriptor file
pub fn find_descriptor_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DESCRIPTOR_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Parses a descriptor file into the domain model
pub fn parse_descriptor_file(path: &Path) -> Result<ProjectDescriptor, DescriptorError> {
    let content =
        fs::read_to_string(path).map_err(|e| DescriptorError::read_error(path, e))?;
    let file: DescriptorFile = toml::from_str(&content)
        .map_err(|e| DescriptorError::toml_parse_error(path, e.to_string()))?;

    let mut dependencies = Vec::with_capacity(file.dependencies.len());
    for (name, value) in file.dependencies {
        let constraint = value.as_str().ok_or_else(|| {
            DescriptorError::invalid_constraint(
                &name,
                value.to_string(),
                "expected a constraint string",
            )
        })?;
        let vertices = parse_constraints(&name, constraint)?;
        dependencies.push(PackageDependency::new(name, vertices));
    }

    Ok(ProjectDescriptor {
        path: path.to_path_buf(),
        descriptor: PackageDescriptor::new(dependencies),
    })
}

/// Locates and parses the nearest descriptor, if any
pub fn load_descriptor(start: &Path) -> Result<Option<ProjectDescriptor>, DescriptorError> {
    match find_descriptor_file(start) {
        Some(path) => parse_descriptor_file(&path).map(Some),
        None => Ok(None),
    }
}
