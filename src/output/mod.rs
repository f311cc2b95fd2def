//! Command output events and formatting
//!
//! This module provides:
//! - The `CommandOutput` event type every operation produces
//! - Text output for human-readable display
//! - JSON output for machine processing
//!
//! Events are ordered, append-only notifications; producers never block
//! waiting for the consumer to act on them.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::{Package, PackageDependency};
use std::fmt;
use std::io::Write;

/// Severity of an output event, used for rendering and exit-code policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One ordered notification produced by a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Informational progress or success message
    Result(String),
    /// Non-fatal problem; processing continued
    Warning(String),
    /// Failure of one step; sibling steps still ran
    Error(String),
    /// Two or more entries for one dependency name resolved to different
    /// packages. The group is surfaced; no winner is picked.
    DependencyConflict {
        name: String,
        packages: Vec<Package>,
    },
    /// No queried repository satisfied the dependency
    DependencyNotFound {
        dependency: PackageDependency,
        repositories_searched: Vec<String>,
    },
}

impl CommandOutput {
    pub fn result(message: impl Into<String>) -> Self {
        CommandOutput::Result(message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        CommandOutput::Warning(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        CommandOutput::Error(message.into())
    }

    pub fn severity(&self) -> Severity {
        match self {
            CommandOutput::Result(_) => Severity::Info,
            CommandOutput::Warning(_) | CommandOutput::DependencyNotFound { .. } => {
                Severity::Warning
            }
            CommandOutput::Error(_) | CommandOutput::DependencyConflict { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Result(message)
            | CommandOutput::Warning(message)
            | CommandOutput::Error(message) => write!(f, "{}", message),
            CommandOutput::DependencyConflict { name, packages } => {
                let versions: Vec<String> = packages.iter().map(|p| p.to_string()).collect();
                write!(
                    f,
                    "Dependency '{}' resolved to conflicting packages: {}.",
                    name,
                    versions.join(", ")
                )
            }
            CommandOutput::DependencyNotFound {
                dependency,
                repositories_searched,
            } => {
                write!(
                    f,
                    "'{}' not found in '{}'.",
                    dependency,
                    repositories_searched.join(", ")
                )
            }
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Configuration for output formatting
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Suppress informational events
    pub quiet: bool,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quiet: false,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, quiet: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            quiet,
            color: !json,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write an ordered event sequence
    fn format(&self, output: &[CommandOutput], writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create a formatter for the given configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
