//! The update command
//!
//! Composes the package manager into the two update workflows:
//!
//! - Project mode resolves the project's declared dependencies (optionally
//!   filtered to one name) against remote feeds, then the system cache,
//!   then the current directory, and copies hits into the project
//!   repository.
//! - System mode synthesizes one descriptor per installed system package,
//!   anchored to its installed version, resolves against remote feeds then
//!   the current directory, and copies genuine updates into the system
//!   repository.
//!
//! Each mode runs verify-preconditions, resolve, copy, then cache
//! verification; precondition failures stop before any resolution work.

use crate::domain::PackageDescriptor;
use crate::environment::Environment;
use crate::output::CommandOutput;
use crate::package_manager::PackageManager;
use crate::progress::Progress;
use crate::repository::PackageRepository;
use std::sync::Arc;

/// The `update` command with its three-valued mode flags.
///
/// Each flag distinguishes unset from explicitly set: `--project` defaults
/// to on unless `--system` was explicitly turned on while `--project` was
/// left unset.
pub struct UpdateWrap {
    /// Restrict the update to one dependency name (case-insensitive)
    name: Option<String>,
    project: Option<bool>,
    system: Option<bool>,
    manager: PackageManager,
}

impl UpdateWrap {
    pub fn new(name: Option<String>, project: Option<bool>, system: Option<bool>) -> Self {
        Self {
            name,
            project,
            system,
            manager: PackageManager::new(),
        }
    }

    /// Whether project packages are updated this run
    pub fn project(&self) -> bool {
        self.project == Some(true) || (self.project.is_none() && self.system != Some(true))
    }

    /// Whether system packages are updated this run
    pub fn system(&self) -> bool {
        self.system == Some(true)
    }

    /// Runs the selected update workflows, producing the ordered event list
    pub async fn execute(&self, env: &Environment, progress: &mut Progress) -> Vec<CommandOutput> {
        if let Some(error) = self.verify_inputs(env) {
            return vec![error];
        }

        let mut output = Vec::new();
        if self.project() {
            output.extend(self.update_project_packages(env, progress).await);
        }
        if self.system() {
            output.extend(self.update_system_packages(env, progress).await);
        }
        output
    }

    /// Environment-shaped precondition checks; a failure here halts the
    /// invocation before any resolution work begins
    fn verify_inputs(&self, env: &Environment) -> Option<CommandOutput> {
        if !self.project() && !self.system() {
            return Some(CommandOutput::error(
                "Nothing selected for update; use --project or --system.",
            ));
        }
        if self.project() && env.project_repository.is_none() {
            return Some(CommandOutput::error(
                "Project repository not found, cannot update. If you meant to update the \
                 system repository, use the --system flag.",
            ));
        }
        None
    }

    async fn update_project_packages(
        &self,
        env: &Environment,
        progress: &mut Progress,
    ) -> Vec<CommandOutput> {
        // verify_inputs guarantees a project repository, which only exists
        // alongside a descriptor
        let (Some(project), Some(project_repository)) =
            (&env.descriptor, &env.project_repository)
        else {
            return Vec::new();
        };

        let mut descriptor = project.descriptor.clone();
        if let Some(name) = &self.name {
            descriptor.retain_named(name);
            if descriptor.is_empty() {
                return vec![CommandOutput::warning(format!(
                    "'{}' is not declared in the project descriptor.",
                    name
                ))];
            }
        }
        if descriptor.is_empty() {
            return vec![CommandOutput::result(
                "The project descriptor declares no dependencies.",
            )];
        }

        let sources = env.project_search_order();
        progress.spinner("Resolving dependencies...");
        let resolved = self.manager.try_resolve_dependencies(&descriptor, &sources).await;
        progress.finish_and_clear();

        // A single missing dependency is a hard failure for a project:
        // report every missing dependency and any conflicts, copy nothing.
        // Copying to zero targets yields exactly those events.
        if resolved.missing().next().is_some() {
            return self.manager.copy_packages_to_repositories(&resolved, &[]).await;
        }

        let mut output = self
            .manager
            .copy_packages_to_repositories(&resolved, &env.repositories_for_write())
            .await;
        output.extend(
            self.manager
                .verify_package_cache(project_repository, &descriptor)
                .await,
        );
        output
    }

    async fn update_system_packages(
        &self,
        env: &Environment,
        progress: &mut Progress,
    ) -> Vec<CommandOutput> {
        let mut output = vec![CommandOutput::result("Searching for updated packages...")];

        let installed = match env.system_repository.packages_by_name().await {
            Ok(installed) => installed,
            Err(e) => {
                output.push(CommandOutput::error(e.to_string()));
                return output;
            }
        };

        // One descriptor per installed package, anchored to its greatest
        // installed version so only genuine upward revisions match
        let descriptors: Vec<PackageDescriptor> = installed
            .values()
            .filter_map(|group| group.last())
            .filter(|latest| self.should_include_in_system_update(&latest.name))
            .map(|latest| PackageDescriptor::update_anchor(latest.name.clone(), latest.version))
            .collect();

        let sources = env.system_search_order();
        let system_repository =
            env.system_repository.clone() as Arc<dyn PackageRepository>;

        progress.start(descriptors.len() as u64, "Checking system packages");
        for descriptor in descriptors {
            if let Some(dependency) = descriptor.dependencies.first() {
                progress.set_message(&format!("Checking {}", dependency.name));
            }

            let resolved = self
                .manager
                .try_resolve_dependencies(&descriptor, &sources)
                .await
                // A package with no update candidate is not a failure;
                // keep only the entries that actually resolved
                .retain_resolved();
            if !resolved.is_success() {
                progress.inc();
                continue;
            }

            let copied = self
                .manager
                .copy_packages_to_repositories(&resolved, &[system_repository.clone()])
                .await;
            for event in copied {
                output.push(match event {
                    CommandOutput::DependencyNotFound { dependency, .. } => {
                        CommandOutput::warning(format!(
                            "Package '{}' doesn't exist in any remote repository.",
                            dependency.name
                        ))
                    }
                    other => other,
                });
            }

            output.extend(
                self.manager
                    .verify_package_cache(&env.system_repository, &descriptor)
                    .await,
            );
            progress.inc();
        }
        progress.finish_and_clear();

        output
    }

    /// Name filter for system updates; no filter includes everything
    fn should_include_in_system_update(&self, package_name: &str) -> bool {
        match &self.name {
            Some(name) => name.eq_ignore_ascii_case(package_name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::PROJECT_REPOSITORY_DIR;
    use crate::repository::{CurrentDirectoryRepository, FolderRepository};
    use crate::test_support::write_wrap_archive;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn command(name: Option<&str>, project: Option<bool>, system: Option<bool>) -> UpdateWrap {
        UpdateWrap::new(name.map(String::from), project, system)
    }

    /// Builds an environment from explicit directories, bypassing the
    /// user-level configuration
    fn make_env(
        current: &Path,
        project_repo: Option<&Path>,
        system_repo: &Path,
        remotes: Vec<Arc<dyn PackageRepository>>,
    ) -> Environment {
        Environment {
            current_directory: current.to_path_buf(),
            descriptor: crate::descriptor::load_descriptor(current).unwrap(),
            project_repository: project_repo
                .map(|dir| Arc::new(FolderRepository::new("project repository", dir))),
            system_repository: Arc::new(FolderRepository::new("system repository", system_repo)),
            current_directory_repository: Arc::new(CurrentDirectoryRepository::new(current)),
            remote_repositories: remotes,
            bootstrap_warnings: Vec::new(),
        }
    }

    fn remote(dir: &Path) -> Arc<dyn PackageRepository> {
        Arc::new(FolderRepository::new("main feed", dir))
    }

    #[test]
    fn test_flag_derivation_defaults_to_project() {
        let cmd = command(None, None, None);
        assert!(cmd.project());
        assert!(!cmd.system());
    }

    #[test]
    fn test_flag_derivation_system_only() {
        let cmd = command(None, None, Some(true));
        assert!(!cmd.project());
        assert!(cmd.system());
    }

    #[test]
    fn test_flag_derivation_both_explicit() {
        let cmd = command(None, Some(true), Some(true));
        assert!(cmd.project());
        assert!(cmd.system());
    }

    #[test]
    fn test_flag_derivation_project_explicitly_off() {
        let cmd = command(None, Some(false), None);
        assert!(!cmd.project());
        assert!(!cmd.system());
    }

    #[test]
    fn test_flag_derivation_explicit_project_survives_system() {
        let cmd = command(None, Some(true), None);
        assert!(cmd.project());
    }

    #[tokio::test]
    async fn test_nothing_selected_is_an_error() {
        let dir = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let env = make_env(dir.path(), None, system.path(), Vec::new());

        let cmd = command(None, Some(false), None);
        let output = cmd.execute(&env, &mut Progress::disabled()).await;
        assert_eq!(output.len(), 1);
        assert!(output[0].to_string().contains("Nothing selected"));
    }

    #[tokio::test]
    async fn test_project_mode_without_project_repository_is_fatal() {
        let dir = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let env = make_env(dir.path(), None, system.path(), Vec::new());

        let cmd = command(None, None, None);
        let output = cmd.execute(&env, &mut Progress::disabled()).await;
        assert_eq!(output.len(), 1);
        assert!(output[0]
            .to_string()
            .contains("Project repository not found"));
    }

    #[tokio::test]
    async fn test_project_update_copies_and_expands() {
        let project = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let feed = TempDir::new().unwrap();

        fs::write(
            project.path().join("wrap.toml"),
            "[dependencies]\nfoo = \"> 1.0\"\n",
        )
        .unwrap();
        let wraps = project.path().join(PROJECT_REPOSITORY_DIR);
        fs::create_dir(&wraps).unwrap();
        write_wrap_archive(feed.path(), "foo", "2.0.0.0");

        let env = make_env(
            project.path(),
            Some(&wraps),
            system.path(),
            vec![remote(feed.path())],
        );

        let cmd = command(None, None, None);
        let output = cmd.execute(&env, &mut Progress::disabled()).await;

        assert!(output
            .iter()
            .any(|o| o.to_string().contains("Copying 'foo-2.0.0.0'")));
        assert!(wraps.join("foo-2.0.0.0.wrap").exists());
        // Cache verification expanded the copy
        assert!(wraps.join("_cache/foo-2.0.0.0").is_dir());
    }

    #[tokio::test]
    async fn test_project_update_missing_dependency_is_hard_failure() {
        let project = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let feed = TempDir::new().unwrap();

        fs::write(
            project.path().join("wrap.toml"),
            "[dependencies]\nbar = \"> 1.0\"\n",
        )
        .unwrap();
        let wraps = project.path().join(PROJECT_REPOSITORY_DIR);
        fs::create_dir(&wraps).unwrap();

        let env = make_env(
            project.path(),
            Some(&wraps),
            system.path(),
            vec![remote(feed.path())],
        );

        let cmd = command(None, None, None);
        let output = cmd.execute(&env, &mut Progress::disabled()).await;

        let not_found: Vec<_> = output
            .iter()
            .filter(|o| matches!(o, CommandOutput::DependencyNotFound { .. }))
            .collect();
        assert_eq!(not_found.len(), 1);
        // No copy events and nothing written
        assert!(!output.iter().any(|o| o.to_string().contains("Copying")));
        assert_eq!(fs::read_dir(&wraps).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_project_update_name_filter() {
        let project = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let feed = TempDir::new().unwrap();

        fs::write(
            project.path().join("wrap.toml"),
            "[dependencies]\nfoo = \"> 1.0\"\nbar = \"> 1.0\"\n",
        )
        .unwrap();
        let wraps = project.path().join(PROJECT_REPOSITORY_DIR);
        fs::create_dir(&wraps).unwrap();
        write_wrap_archive(feed.path(), "foo", "2.0.0.0");
        // 'bar' is nowhere; filtering to 'foo' must not fail on it

        let env = make_env(
            project.path(),
            Some(&wraps),
            system.path(),
            vec![remote(feed.path())],
        );

        let cmd = command(Some("FOO"), None, None);
        let output = cmd.execute(&env, &mut Progress::disabled()).await;
        assert!(output
            .iter()
            .any(|o| o.to_string().contains("Copying 'foo-2.0.0.0'")));
        assert!(!output
            .iter()
            .any(|o| matches!(o, CommandOutput::DependencyNotFound { .. })));
    }

    #[tokio::test]
    async fn test_project_update_unknown_name_filter_warns() {
        let project = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();

        fs::write(
            project.path().join("wrap.toml"),
            "[dependencies]\nfoo = \"> 1.0\"\n",
        )
        .unwrap();
        let wraps = project.path().join(PROJECT_REPOSITORY_DIR);
        fs::create_dir(&wraps).unwrap();

        let env = make_env(project.path(), Some(&wraps), system.path(), Vec::new());
        let cmd = command(Some("ghost"), None, None);
        let output = cmd.execute(&env, &mut Progress::disabled()).await;
        assert_eq!(output.len(), 1);
        assert!(output[0]
            .to_string()
            .contains("'ghost' is not declared in the project descriptor"));
    }

    #[tokio::test]
    async fn test_system_update_picks_greatest_compatible() {
        let current = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let feed = TempDir::new().unwrap();

        write_wrap_archive(system.path(), "foo", "1.0.0.0");
        write_wrap_archive(feed.path(), "foo", "1.0.0.1");
        write_wrap_archive(feed.path(), "foo", "2.0.0.0");

        let env = make_env(
            current.path(),
            None,
            system.path(),
            vec![remote(feed.path())],
        );

        let cmd = command(None, None, Some(true));
        let output = cmd.execute(&env, &mut Progress::disabled()).await;

        assert!(output
            .iter()
            .any(|o| o.to_string().contains("Searching for updated packages")));
        assert!(output
            .iter()
            .any(|o| o.to_string().contains("Copying 'foo-2.0.0.0' to 'system repository'")));
        assert!(system.path().join("foo-2.0.0.0.wrap").exists());
    }

    #[tokio::test]
    async fn test_system_update_skips_packages_without_candidates() {
        let current = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let feed = TempDir::new().unwrap();

        write_wrap_archive(system.path(), "foo", "2.0.0.0");
        // The feed only has an older version; not an update
        write_wrap_archive(feed.path(), "foo", "1.0.0.0");

        let env = make_env(
            current.path(),
            None,
            system.path(),
            vec![remote(feed.path())],
        );

        let cmd = command(None, None, Some(true));
        let output = cmd.execute(&env, &mut Progress::disabled()).await;

        // Only the leading search message; no copies, no warnings
        assert_eq!(output.len(), 1);
        assert!(!system.path().join("foo-1.0.0.0.wrap").exists());
    }

    #[tokio::test]
    async fn test_system_update_name_filter() {
        let current = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let feed = TempDir::new().unwrap();

        write_wrap_archive(system.path(), "foo", "1.0.0.0");
        write_wrap_archive(system.path(), "bar", "1.0.0.0");
        write_wrap_archive(feed.path(), "foo", "2.0.0.0");
        write_wrap_archive(feed.path(), "bar", "2.0.0.0");

        let env = make_env(
            current.path(),
            None,
            system.path(),
            vec![remote(feed.path())],
        );

        let cmd = command(Some("bar"), None, Some(true));
        cmd.execute(&env, &mut Progress::disabled()).await;

        assert!(system.path().join("bar-2.0.0.0.wrap").exists());
        assert!(!system.path().join("foo-2.0.0.0.wrap").exists());
    }

    #[tokio::test]
    async fn test_system_update_prefers_current_directory_build_as_fallback() {
        let current = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();

        write_wrap_archive(system.path(), "foo", "1.0.0.0");
        // No remotes; the in-progress build in the invocation directory
        // is the only update source
        write_wrap_archive(current.path(), "foo", "1.1.0.0");

        let env = make_env(current.path(), None, system.path(), Vec::new());
        let cmd = command(None, None, Some(true));
        cmd.execute(&env, &mut Progress::disabled()).await;

        assert!(system.path().join("foo-1.1.0.0.wrap").exists());
    }
}
