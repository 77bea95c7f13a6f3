//! aicommit - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use aicommit::{
    Config, EditMode, GitCli, OpenAiClient, Reviewer, RunError, RunOutcome, TerminalPrompter,
    Workflow,
};

/// Draft a Conventional Commits message from the staged diff and commit it.
#[derive(Parser, Debug)]
#[command(name = "aicommit")]
#[command(about = "Draft a Conventional Commits message from the staged diff and commit it")]
#[command(version)]
struct Cli {
    /// Split staged files by scope (apps/<name>, libs/<name>, root) and
    /// commit each scope separately
    #[arg(long)]
    scoped: bool,

    /// How `e` edits a proposal [default: inline, or editor with --scoped]
    #[arg(long, value_enum)]
    edit_mode: Option<EditMode>,

    /// Model to use (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Dry run - print the git commit command instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);
    let dry_run = cli.dry_run;

    match run(cli).await {
        Ok(outcome) => {
            report(outcome, dry_run);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            let code = e
                .downcast_ref::<RunError>()
                .map(RunError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<RunOutcome> {
    // Step 1: Check prerequisites
    let git = GitCli::discover().map_err(RunError::from)?;
    debug!("Repository work tree: {}", git.workdir().display());

    let config = Config::from_env()
        .map_err(RunError::from)?
        .with_model(cli.model);

    // Step 2: Build collaborators
    let client = OpenAiClient::new(&config).context("Failed to create HTTP client")?;
    debug!("Using model {}", client.model());

    let mode = cli.edit_mode.unwrap_or(if cli.scoped {
        EditMode::Editor
    } else {
        EditMode::Inline
    });
    let reviewer = Reviewer::new(TerminalPrompter, mode, config.editor.clone());

    // Step 3: Generate, review, commit
    let mut workflow = Workflow::new(&git, &client, reviewer).dry_run(cli.dry_run);
    let outcome = if cli.scoped {
        println!("Generating commit messages per scope with {}...", config.model);
        workflow.run_scoped(&config.scope_dirs).await?
    } else {
        println!("Generating commit message with {}...", config.model);
        workflow.run_single().await?
    };

    Ok(outcome)
}

fn report(outcome: RunOutcome, dry_run: bool) {
    match outcome {
        RunOutcome::Completed { commits } if dry_run => {
            println!("Dry run complete, {} commit(s) not created", commits)
        }
        RunOutcome::Completed { commits } => println!("✓ {} commit(s) done", commits),
        RunOutcome::Cancelled { commits: 0 } => println!("Commit cancelled."),
        RunOutcome::Cancelled { commits } => {
            println!("Stopped after {} commit(s); remaining changes are still staged.", commits)
        }
    }
}
