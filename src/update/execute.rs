//! Workflow execution
//!
//! Runs the update over every submodule: branch scope in, sync against the
//! upstream tip, commit/push when dirty, then create or reuse the pull
//! request.

use crate::config::UpdateConfig;
use crate::error::Result;
use crate::forge::{parse_github_remote, ForgeService};
use crate::repo::{BranchScope, GitRepo};
use crate::types::{Submodule, UpdateOutcome, UpdateSummary};
use crate::update::{Phase, ProgressCallback, SubmoduleStatus};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Run-level switches
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Sync and inspect only; skip commit, push, and PR creation
    pub dry_run: bool,
    /// Abort the run at the first failing submodule instead of continuing
    pub fail_fast: bool,
}

/// Everything a single submodule's processing needs, borrowed once
struct RunContext<'a> {
    repo: &'a GitRepo,
    forge: &'a dyn ForgeService,
    config: &'a UpdateConfig,
    progress: &'a dyn ProgressCallback,
    open_heads: HashSet<String>,
    base_branch: String,
    dry_run: bool,
}

/// Execute the update workflow across all submodules
///
/// The open-PR list and the parent's default branch are fetched once per run.
/// Submodules are processed strictly sequentially; a failing submodule is
/// recorded and reported, and the run continues unless
/// [`UpdateOptions::fail_fast`] is set. The run itself only errors when the
/// initial forge queries fail.
pub async fn execute_update(
    repo: &GitRepo,
    forge: &dyn ForgeService,
    config: &UpdateConfig,
    progress: &dyn ProgressCallback,
    options: UpdateOptions,
) -> Result<UpdateSummary> {
    let started_at = Utc::now();

    progress.on_phase(Phase::FetchingPrs).await;
    let open_heads: HashSet<String> = forge
        .list_open_pull_requests()
        .await?
        .into_iter()
        .map(|pr| pr.head_label)
        .collect();
    let base_branch = forge.default_branch().await?;
    debug!(open_prs = open_heads.len(), base = %base_branch, "forge state fetched");

    let submodules = repo.submodules()?;
    if submodules.is_empty() {
        progress.on_message("No submodules in repository").await;
        progress.on_phase(Phase::Complete).await;
        return Ok(UpdateSummary {
            started_at,
            outcomes: Vec::new(),
        });
    }

    let ctx = RunContext {
        repo,
        forge,
        config,
        progress,
        open_heads,
        base_branch,
        dry_run: options.dry_run,
    };

    progress.on_phase(Phase::Updating).await;
    if options.dry_run {
        progress.on_message("Dry run - nothing will be committed, pushed, or opened").await;
    }

    let mut outcomes = Vec::new();
    for submodule in &submodules {
        progress
            .on_submodule(&submodule.name, SubmoduleStatus::Started)
            .await;

        match process_submodule(&ctx, submodule).await {
            Ok(outcome) => {
                info!(submodule = %submodule.name, ?outcome, "submodule processed");
                outcomes.push(outcome);
            }
            Err(error) => {
                warn!(submodule = %submodule.name, %error, "submodule failed");
                progress
                    .on_submodule(&submodule.name, SubmoduleStatus::Failed(error.to_string()))
                    .await;
                progress.on_error(&error).await;
                outcomes.push(UpdateOutcome::Failed {
                    name: submodule.name.clone(),
                    error: error.to_string(),
                });
                if options.fail_fast {
                    break;
                }
            }
        }
    }

    progress.on_phase(Phase::Complete).await;
    Ok(UpdateSummary {
        started_at,
        outcomes,
    })
}

/// Process one submodule inside its branch scope
///
/// The scope guard restores the original branch on every exit path: the happy
/// path goes through `finish()`, error paths through `Drop`.
async fn process_submodule(ctx: &RunContext<'_>, submodule: &Submodule) -> Result<UpdateOutcome> {
    let target_branch = ctx.config.branch_for(&submodule.name);
    let scope = BranchScope::enter(ctx.repo, &target_branch)?;

    let outcome = update_in_scope(ctx, submodule, scope.branch()).await;
    match outcome {
        Ok(outcome) => {
            scope.finish()?;
            Ok(outcome)
        }
        // Dropping the scope restores the initial branch best-effort
        Err(error) => Err(error),
    }
}

async fn update_in_scope(
    ctx: &RunContext<'_>,
    submodule: &Submodule,
    branch: &str,
) -> Result<UpdateOutcome> {
    let head_label = ctx.config.head_label_for(&submodule.name);
    let pr_exists = ctx.open_heads.contains(&head_label);

    // An in-flight PR may have review commits on the branch; integrate them
    // before moving the submodule pointer.
    if pr_exists && !ctx.dry_run {
        ctx.progress
            .on_message(&format!(
                "Open PR found for {head_label}, pulling {branch} first"
            ))
            .await;
        ctx.repo.pull(&ctx.config.remote_name, branch)?;
    }

    // Track the upstream's default branch. Submodules hosted off the forge
    // (relative or local URLs) keep whatever branch is configured.
    match parse_github_remote(&submodule.url) {
        Ok(remote) => {
            let info = ctx.forge.get_repository(&remote.slug).await?;
            ctx.repo
                .set_submodule_branch(&submodule.name, &info.default_branch)?;
        }
        Err(_) => {
            debug!(
                submodule = %submodule.name,
                url = %submodule.url,
                "not a forge URL, keeping configured tracking branch"
            );
        }
    }

    ctx.repo.sync_submodule(&submodule.path)?;
    ctx.repo.update_submodule_remote(&submodule.path)?;

    if !ctx.repo.is_dirty(Some(&submodule.path))? {
        ctx.progress
            .on_submodule(&submodule.name, SubmoduleStatus::UpToDate)
            .await;
        return Ok(UpdateOutcome::UpToDate {
            name: submodule.name.clone(),
        });
    }

    if ctx.dry_run {
        ctx.progress
            .on_message(&format!(
                "Would commit {} and push {branch}{}",
                submodule.path,
                if pr_exists { "" } else { " and open a PR" }
            ))
            .await;
        return Ok(UpdateOutcome::Updated {
            name: submodule.name.clone(),
            branch: branch.to_string(),
            pull_request: None,
            reused_existing_pr: pr_exists,
        });
    }

    ctx.repo.stage(&submodule.path)?;
    ctx.repo.commit(&ctx.config.commit_message(&submodule.name))?;
    ctx.repo.push(&ctx.config.remote_name, branch)?;
    ctx.progress
        .on_submodule(&submodule.name, SubmoduleStatus::Pushed)
        .await;

    let pull_request = if pr_exists {
        ctx.progress.on_pr_reused(&submodule.name, &head_label).await;
        None
    } else {
        let pr = ctx
            .forge
            .create_pull_request(
                &ctx.config.pr_title(&submodule.name),
                &ctx.config.pr_body(&submodule.name),
                &head_label,
                &ctx.base_branch,
            )
            .await?;
        ctx.progress.on_pr_created(&submodule.name, &pr).await;
        Some(pr)
    };

    Ok(UpdateOutcome::Updated {
        name: submodule.name.clone(),
        branch: branch.to_string(),
        pull_request,
        reused_existing_pr: pr_exists,
    })
}
