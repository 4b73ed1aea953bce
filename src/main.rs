//! subup - Automated pull requests for outdated git submodules
//!
//! CLI binary for keeping a repository's submodules current.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use subup::config::{DEFAULT_BRANCH_PREFIX, DEFAULT_REMOTE_NAME};

mod cli;

#[derive(Parser)]
#[command(name = "subup")]
#[command(about = "Automated pull requests for outdated git submodules")]
#[command(version)]
struct Cli {
    /// Path to the git repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every submodule against its upstream and open or refresh PRs
    Update {
        /// GitHub token (falls back to GITHUB_TOKEN, GH_TOKEN, then the gh CLI)
        #[arg(long)]
        token: Option<String>,

        /// Target repository as owner/repo (defaults to the origin remote)
        #[arg(long)]
        repo: Option<String>,

        /// Login update branches are pushed under (defaults to the token's user)
        #[arg(long)]
        actor: Option<String>,

        /// Name of the push remote to provision
        #[arg(long, default_value = DEFAULT_REMOTE_NAME)]
        remote_name: String,

        /// Branch name prefix for per-submodule update branches
        #[arg(long, default_value = DEFAULT_BRANCH_PREFIX)]
        branch_prefix: String,

        /// Sync and report, but do not commit, push, or open PRs
        #[arg(long)]
        dry_run: bool,

        /// Stop at the first submodule that fails
        #[arg(long)]
        fail_fast: bool,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Commands::Update {
            token,
            repo,
            actor,
            remote_name,
            branch_prefix,
            dry_run,
            fail_fast,
            json,
        } => {
            let args = cli::UpdateArgs {
                token,
                repo,
                actor,
                remote_name,
                branch_prefix,
                dry_run,
                fail_fast,
                json,
            };
            let summary = cli::run_update(&path, &args).await?;
            if !summary.all_ok() {
                std::process::exit(1);
            }
        }
        Commands::Auth { action } => match action {
            AuthAction::Test => cli::run_auth("test").await?,
            AuthAction::Setup => cli::run_auth("setup").await?,
        },
    }

    Ok(())
}
