//! CLI argument parsing module for wrapup

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Package update and repository synchronization tool
#[derive(Parser, Debug, Clone)]
#[command(name = "wrapup", version, about = "Package update and repository synchronization tool")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Directory to run in (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    pub path: PathBuf,

    /// Enable quiet mode - warnings and errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Update project or system packages to the newest matching versions
    Update(UpdateArgs),

    /// List the packages present in a repository
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Restrict the update to one package name
    pub name: Option<String>,

    /// Update the project's packages (default unless --system is given)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub project: Option<bool>,

    /// Update the machine-wide system packages
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub system: Option<bool>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// List the system repository instead of the project repository
    #[arg(long)]
    pub system: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_update_defaults() {
        let args = parse(&["wrapup", "update"]);
        let Command::Update(update) = args.command else {
            panic!("expected update command");
        };
        assert_eq!(update.name, None);
        // Unset flags stay unset so the command can tell "defaulted" from
        // "explicitly chosen"
        assert_eq!(update.project, None);
        assert_eq!(update.system, None);
    }

    #[test]
    fn test_update_bare_flag_means_true() {
        let args = parse(&["wrapup", "update", "--system"]);
        let Command::Update(update) = args.command else {
            panic!("expected update command");
        };
        assert_eq!(update.system, Some(true));
        assert_eq!(update.project, None);
    }

    #[test]
    fn test_update_explicit_flag_values() {
        let args = parse(&["wrapup", "update", "--project", "false", "--system", "true"]);
        let Command::Update(update) = args.command else {
            panic!("expected update command");
        };
        assert_eq!(update.project, Some(false));
        assert_eq!(update.system, Some(true));
    }

    #[test]
    fn test_update_with_name() {
        let args = parse(&["wrapup", "update", "openwrap"]);
        let Command::Update(update) = args.command else {
            panic!("expected update command");
        };
        assert_eq!(update.name.as_deref(), Some("openwrap"));
    }

    #[test]
    fn test_global_flags() {
        let args = parse(&["wrapup", "update", "--quiet", "--json", "--path", "/tmp"]);
        assert!(args.quiet);
        assert!(args.json);
        assert_eq!(args.path, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_list_system() {
        let args = parse(&["wrapup", "list", "--system"]);
        let Command::List(list) = args.command else {
            panic!("expected list command");
        };
        assert!(list.system);
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(CliArgs::try_parse_from(["wrapup", "install"]).is_err());
    }
}
