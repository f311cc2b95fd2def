//! wrapup - package update and repository synchronization CLI tool
//!
//! Keeps project and system package repositories in sync with configured
//! remote feeds:
//! - `wrapup update` copies the newest matching packages into the project
//! - `wrapup update --system` refreshes the machine-wide package cache
//! - `wrapup list` shows what a repository currently holds

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use wrapup::cli::{CliArgs, Command};
use wrapup::commands::{ListWrap, UpdateWrap};
use wrapup::environment::Environment;
use wrapup::output::{create_formatter, CommandOutput, OutputConfig, Severity};
use wrapup::progress::Progress;
use wrapup::repository::HttpClient;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    // Absolute form so the descriptor search can walk real ancestors
    let current_directory = args
        .path
        .canonicalize()
        .with_context(|| format!("cannot access '{}'", args.path.display()))?;
    if !current_directory.is_dir() {
        anyhow::bail!("'{}' is not a directory", args.path.display());
    }

    let client = HttpClient::new()?;
    let env = Environment::initialize(&current_directory, &client)?;
    let mut progress = Progress::new(!args.quiet && !args.json);

    // Configuration warnings lead the event stream so the user sees them
    // before the results they may have influenced
    let mut output: Vec<CommandOutput> = env.bootstrap_warnings.clone();
    match &args.command {
        Command::Update(update) => {
            let command =
                UpdateWrap::new(update.name.clone(), update.project, update.system);
            output.extend(command.execute(&env, &mut progress).await);
        }
        Command::List(list) => {
            let command = ListWrap::new(list.system);
            output.extend(command.execute(&env).await);
        }
    }
    progress.finish_and_clear();

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.quiet));
    let mut stdout = io::stdout().lock();
    formatter.format(&output, &mut stdout)?;
    stdout.flush()?;

    // Individual step failures surface as error events; exit code 2 keeps
    // them distinguishable from a clean run without aborting the batch
    let any_failed = output.iter().any(|o| o.severity() == Severity::Error);
    if any_failed {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
