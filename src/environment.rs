//! Per-run repository wiring
//!
//! Builds the layered repository set for one invocation: the optional
//! project repository next to the descriptor, the machine-wide system
//! repository, the current-directory virtual source, and the configured
//! remote feeds. Repositories live for the run's duration and are not
//! shared across concurrent invocations.

use crate::config;
use crate::descriptor::{self, ProjectDescriptor};
use crate::error::AppError;
use crate::output::CommandOutput;
use crate::repository::{
    CurrentDirectoryRepository, FolderRepository, HttpClient, PackageRepository,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory next to the descriptor holding the project's packages
pub const PROJECT_REPOSITORY_DIR: &str = "wraps";

/// Environment variable overriding the system repository root (used by tests)
pub const SYSTEM_ROOT_ENV: &str = "WRAPUP_SYSTEM_ROOT";

/// The repositories and descriptor for one invocation
pub struct Environment {
    /// Directory the command was invoked from
    pub current_directory: PathBuf,
    /// The nearest project descriptor, if any
    pub descriptor: Option<ProjectDescriptor>,
    /// The project's package repository; absent when there is no project
    /// context, which is a valid state
    pub project_repository: Option<Arc<FolderRepository>>,
    /// Machine-wide cache of installed packages
    pub system_repository: Arc<FolderRepository>,
    /// The invocation directory's own built artifacts
    pub current_directory_repository: Arc<CurrentDirectoryRepository>,
    /// Configured remote feeds, in precedence order
    pub remote_repositories: Vec<Arc<dyn PackageRepository>>,
    /// Warnings raised while loading configuration
    pub bootstrap_warnings: Vec<CommandOutput>,
}

/// The machine-wide system repository location
pub fn system_repository_root() -> PathBuf {
    if let Ok(root) = std::env::var(SYSTEM_ROOT_ENV) {
        return PathBuf::from(root);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wrapup")
        .join("packages")
}

impl Environment {
    /// Wires up the environment for an invocation from `current_directory`
    pub fn initialize(current_directory: &Path, client: &HttpClient) -> Result<Self, AppError> {
        let descriptor = descriptor::load_descriptor(current_directory)?;

        // The project repository anchors next to the descriptor; it only
        // exists when scaffolding created its directory
        let project_repository = descriptor.as_ref().and_then(|project| {
            let dir = project.directory().join(PROJECT_REPOSITORY_DIR);
            dir.is_dir()
                .then(|| Arc::new(FolderRepository::new("project repository", dir)))
        });

        let system_repository = Arc::new(FolderRepository::new(
            "system repository",
            system_repository_root(),
        ));

        let remotes = config::load_remotes(None)?;
        let (remote_repositories, bootstrap_warnings) =
            config::build_remote_repositories(&remotes, client);

        Ok(Self {
            current_directory: current_directory.to_path_buf(),
            descriptor,
            project_repository,
            system_repository,
            current_directory_repository: Arc::new(CurrentDirectoryRepository::new(
                current_directory,
            )),
            remote_repositories,
            bootstrap_warnings,
        })
    }

    /// Search order for project updates: remote feeds, then the system
    /// cache, then the current directory's own build output
    pub fn project_search_order(&self) -> Vec<Arc<dyn PackageRepository>> {
        let mut order = self.remote_repositories.clone();
        order.push(self.system_repository.clone() as Arc<dyn PackageRepository>);
        order.push(self.current_directory_repository.clone() as Arc<dyn PackageRepository>);
        order
    }

    /// Search order for system updates: remote feeds, then the current
    /// directory's own build output
    pub fn system_search_order(&self) -> Vec<Arc<dyn PackageRepository>> {
        let mut order = self.remote_repositories.clone();
        order.push(self.current_directory_repository.clone() as Arc<dyn PackageRepository>);
        order
    }

    /// Precedence-ordered write targets for project updates
    pub fn repositories_for_write(&self) -> Vec<Arc<dyn PackageRepository>> {
        self.project_repository
            .iter()
            .map(|repo| repo.clone() as Arc<dyn PackageRepository>)
            .collect()
    }
}
