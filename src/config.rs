//! Remote-feed configuration
//!
//! Remote repositories are declared in a `remotes.toml`, an ordered list of
//! named feeds (order is query precedence):
//!
//! ```toml
//! [[remotes]]
//! name = "openwrap"
//! href = "https://wraps.example.org/index.json"
//!
//! [[remotes]]
//! name = "team share"
//! href = "file:///srv/wraps"
//! ```
//!
//! The file lives under the user configuration directory; a missing file
//! means no remotes, which is a valid configuration. `WRAPUP_REMOTES_CONFIG`
//! overrides the location (used by tests).

use crate::error::ConfigError;
use crate::output::CommandOutput;
use crate::repository::{HttpClient, HttpRepository, IndexedFolderRepository, PackageRepository};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Environment variable overriding the configuration file location
pub const REMOTES_CONFIG_ENV: &str = "WRAPUP_REMOTES_CONFIG";

/// One configured remote feed
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Default, Deserialize)]
struct RemotesFile {
    #[serde(default)]
    remotes: Vec<RemoteEntry>,
}

/// The default configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(REMOTES_CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("wrapup").join("remotes.toml"))
}

/// Loads the ordered remote list. A missing file is an empty list.
pub fn load_remotes(path: Option<PathBuf>) -> Result<Vec<RemoteEntry>, ConfigError> {
    let Some(path) = path.or_else(default_config_path) else {
        return Ok(Vec::new());
    };
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let file: RemotesFile = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path,
        message: e.to_string(),
    })?;
    Ok(file.remotes)
}

/// Builds repositories for the configured remotes, preserving order.
/// `http(s)` hrefs become HTTP feeds, `file` hrefs become indexed folder
/// repositories; anything else is skipped with a warning event.
pub fn build_remote_repositories(
    remotes: &[RemoteEntry],
    client: &HttpClient,
) -> (Vec<Arc<dyn PackageRepository>>, Vec<CommandOutput>) {
    let mut repositories: Vec<Arc<dyn PackageRepository>> = Vec::new();
    let mut warnings = Vec::new();

    for remote in remotes {
        let url = match Url::parse(&remote.href) {
            Ok(url) => url,
            Err(e) => {
                warnings.push(CommandOutput::warning(format!(
                    "Ignoring remote '{}': invalid href '{}' ({}).",
                    remote.name, remote.href, e
                )));
                continue;
            }
        };
        match url.scheme() {
            "http" | "https" => {
                repositories.push(Arc::new(HttpRepository::new(
                    &remote.name,
                    url,
                    client.clone(),
                )));
            }
            "file" => match url.to_file_path() {
                Ok(path) => {
                    repositories.push(Arc::new(IndexedFolderRepository::new(&remote.name, path)));
                }
                Err(()) => warnings.push(CommandOutput::warning(format!(
                    "Ignoring remote '{}': '{}' is not a local path.",
                    remote.name, remote.href
                ))),
            },
            scheme => warnings.push(CommandOutput::warning(format!(
                "Ignoring remote '{}': unsupported scheme '{}'.",
                remote.name, scheme
            ))),
        }
    }

    (repositories, warnings)
}
