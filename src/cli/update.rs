//! Update command - check submodules and open or refresh PRs

use crate::cli::progress::CliProgress;
use crate::cli::style::{bullet, Stylize};
use anstream::{eprintln, println};
use std::env;
use std::path::Path;
use subup::auth::resolve_github_token;
use subup::config::UpdateConfig;
use subup::error::{Error, Result};
use subup::forge::{parse_github_remote, ForgeService, GitHubForge};
use subup::repo::{ConfigScope, GitRepo};
use subup::types::{RepoSlug, UpdateOutcome, UpdateSummary};
use subup::update::{execute_update, UpdateOptions};

/// Parsed flags for the update command
pub struct UpdateArgs {
    /// Explicit token, if given
    pub token: Option<String>,
    /// Explicit owner/repo, if given
    pub repo: Option<String>,
    /// Explicit actor login, if given
    pub actor: Option<String>,
    /// Push remote name
    pub remote_name: String,
    /// Update branch prefix
    pub branch_prefix: String,
    /// Skip commit/push/PR creation
    pub dry_run: bool,
    /// Abort at the first failing submodule
    pub fail_fast: bool,
    /// Emit the summary as JSON
    pub json: bool,
}

/// Run the update command
pub async fn run_update(path: &Path, args: &UpdateArgs) -> Result<UpdateSummary> {
    let repo = GitRepo::open(path)?;
    let auth = resolve_github_token(args.token.as_deref()).await?;

    // Resolve the target repository: explicit flag, else the origin remote
    // (or the first remote that points at GitHub).
    let (slug, host) = match &args.repo {
        Some(spec) => {
            let slug: RepoSlug = spec.parse().map_err(|_| {
                Error::Config(format!("invalid --repo value {spec:?}, expected owner/repo"))
            })?;
            (slug, env::var("GH_HOST").ok())
        }
        None => {
            let remotes = repo.remotes()?;
            let github_remote = remotes
                .iter()
                .find(|r| r.name == "origin")
                .into_iter()
                .chain(remotes.iter())
                .find_map(|r| parse_github_remote(&r.url).ok())
                .ok_or(Error::NoGitHubRemote)?;
            (github_remote.slug, github_remote.host)
        }
    };

    let forge = GitHubForge::new(auth.token.clone(), slug.clone(), host.clone())?;

    let actor_login = match &args.actor {
        Some(actor) => actor.clone(),
        None => forge.current_user().await?,
    };

    let mut config = UpdateConfig::new(auth.token.clone(), actor_login, slug);
    config.remote_name = args.remote_name.clone();
    config.branch_prefix = args.branch_prefix.clone();
    config.host = host;

    // Commit identity lands in global git config so the update commits carry
    // it; the push remote URL embeds the credential.
    if !args.dry_run {
        repo.set_config(ConfigScope::Global, "user.name", &config.committer_name)?;
        repo.set_config(ConfigScope::Global, "user.email", &config.committer_email)?;
        repo.ensure_remote(&config.remote_name, &config.push_remote_url())?;
    }

    let progress = CliProgress;
    let options = UpdateOptions {
        dry_run: args.dry_run,
        fail_fast: args.fail_fast,
    };
    let summary = execute_update(&repo, &forge, &config, &progress, options).await?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| Error::Parse(format!("cannot render summary: {e}")))?;
        println!("{rendered}");
    } else {
        print_summary(&summary, args.dry_run);
    }

    Ok(summary)
}

fn print_summary(summary: &UpdateSummary, dry_run: bool) {
    println!();

    if summary.outcomes.is_empty() {
        println!("{}", "No submodules to check".muted());
        return;
    }

    let checked = summary.outcomes.len();
    let line = format!(
        "{checked} submodule{} checked: {} updated, {} PR{} created, {} failed",
        if checked == 1 { "" } else { "s" },
        summary.updated_count(),
        summary.created_pr_count(),
        if summary.created_pr_count() == 1 { "" } else { "s" },
        summary.failed_count(),
    );

    if dry_run {
        println!("{} {}", line.emphasis(), "(dry run)".muted());
    } else if summary.all_ok() {
        println!("{}", line.success());
    } else {
        eprintln!("{}", line.warn());
        for outcome in &summary.outcomes {
            if let UpdateOutcome::Failed { name, error } = outcome {
                eprintln!("  {} {}: {}", bullet(), name.accent().for_stderr(), error.error());
            }
        }
    }
}
