//! The list command
//!
//! Prints the packages present in the project repository, or in the
//! system repository with `--system`, one line per package name with its
//! available versions in ascending order.

use crate::environment::Environment;
use crate::output::CommandOutput;
use crate::repository::PackageRepository;

pub struct ListWrap {
    system: bool,
}

impl ListWrap {
    pub fn new(system: bool) -> Self {
        Self { system }
    }

    pub async fn execute(&self, env: &Environment) -> Vec<CommandOutput> {
        let repository = if self.system {
            env.system_repository.clone()
        } else {
            match &env.project_repository {
                Some(repository) => repository.clone(),
                None => {
                    return vec![CommandOutput::error(
                        "Project repository not found. If you meant to list the system \
                         repository, use the --system flag.",
                    )]
                }
            }
        };

        let packages = match repository.packages_by_name().await {
            Ok(packages) => packages,
            Err(e) => return vec![CommandOutput::error(e.to_string())],
        };

        if packages.is_empty() {
            return vec![CommandOutput::result(format!(
                "No packages found in the {}.",
                repository.name()
            ))];
        }

        packages
            .values()
            .map(|group| {
                let name = group
                    .first()
                    .map(|p| p.name.as_str())
                    .unwrap_or_default();
                let versions: Vec<String> =
                    group.iter().map(|p| p.version.to_string()).collect();
                CommandOutput::result(format!("{}: {}", name, versions.join(", ")))
            })
            .collect()
    }
}
