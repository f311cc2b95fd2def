//! Application error types using thiserror
//!
//! Error hierarchy:
//! - DescriptorError: Issues with project descriptor (wrap.toml) parsing
//! - RepositoryError: Issues with package repository backends
//! - ConfigError: Issues with remote-feed configuration
//!
//! Data-shaped problems (a dependency that cannot be resolved, conflicting
//! resolutions) are never errors at this level; they surface as output
//! events so one bad package cannot abort a whole batch.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Project descriptor related errors
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Package repository related errors
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A version string that does not parse as `major[.minor[.build[.revision]]]`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{value}': expected up to four dot-separated numeric components")]
pub struct InvalidVersion {
    pub value: String,
}

impl InvalidVersion {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Errors related to the project descriptor file
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// Failed to read the descriptor file
    #[error("failed to read descriptor {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Invalid version constraint for a declared dependency
    #[error("invalid version constraint '{constraint}' for dependency '{name}': {message}")]
    InvalidConstraint {
        name: String,
        constraint: String,
        message: String,
    },
}

/// Errors related to package repository backends
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Filesystem operation failed
    #[error("IO error in repository '{repository}' at {path}: {source}")]
    Io {
        repository: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Write attempted against a read-only repository
    #[error("repository '{repository}' is read-only")]
    ReadOnly { repository: String },

    /// The repository's index is missing or malformed
    #[error("invalid index for repository '{repository}': {message}")]
    Index { repository: String, message: String },

    /// Network request against a remote feed failed
    #[error("failed to query remote repository '{repository}': {message}")]
    Network { repository: String, message: String },

    /// A package archive could not be read or expanded
    #[error("invalid package archive '{package}': {message}")]
    InvalidArchive { package: String, message: String },
}

/// Errors related to remote-feed configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read configuration {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse configuration {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },
}

impl DescriptorError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DescriptorError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DescriptorError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidConstraint error
    pub fn invalid_constraint(
        name: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        DescriptorError::InvalidConstraint {
            name: name.into(),
            constraint: constraint.into(),
            message: message.into(),
        }
    }
}

impl RepositoryError {
    /// Creates a new Io error
    pub fn io(
        repository: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        RepositoryError::Io {
            repository: repository.into(),
            path: path.into(),
            source,
        }
    }

    /// Creates a new ReadOnly error
    pub fn read_only(repository: impl Into<String>) -> Self {
        RepositoryError::ReadOnly {
            repository: repository.into(),
        }
    }

    /// Creates a new Index error
    pub fn index(repository: impl Into<String>, message: impl Into<String>) -> Self {
        RepositoryError::Index {
            repository: repository.into(),
            message: message.into(),
        }
    }

    /// Creates a new Network error
    pub fn network(repository: impl Into<String>, message: impl Into<String>) -> Self {
        RepositoryError::Network {
            repository: repository.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidArchive error
    pub fn invalid_archive(package: impl Into<String>, message: impl Into<String>) -> Self {
        RepositoryError::InvalidArchive {
            package: package.into(),
            message: message.into(),
        }
    }
}
