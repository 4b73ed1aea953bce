//! Core types for subup

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A submodule entry parsed from `.gitmodules`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submodule {
    /// Logical name (the `submodule."<name>"` section)
    pub name: String,
    /// Path of the checkout relative to the repository root
    pub path: String,
    /// Upstream URL the submodule is cloned from
    pub url: String,
    /// Tracked branch, if one is configured
    pub branch: Option<String>,
}

/// A local branch as reported by `git branch`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchRecord {
    /// Branch name with the active marker stripped
    pub name: String,
    /// Whether this is the currently checked-out branch
    pub is_current: bool,
}

/// A pull request on the forge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Head label in `user:branch` form
    pub head_label: String,
    /// Head branch name
    pub head_ref: String,
    /// Base branch name
    pub base_ref: String,
    /// PR title
    pub title: String,
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// Owner/repository pair identifying a forge repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoSlug {
    /// Build a slug from its parts
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoSlug {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                Ok(Self::new(owner, repo))
            }
            _ => Err(crate::error::Error::Parse(format!(
                "expected owner/repo, got: {s}"
            ))),
        }
    }
}

/// Repository metadata fetched from the forge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoInfo {
    /// The repository's primary integration branch
    pub default_branch: String,
}

/// Per-submodule result of one workflow run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Upstream had not moved; nothing was committed or pushed
    UpToDate {
        /// Submodule name
        name: String,
    },
    /// The pinned commit moved; a commit was pushed
    Updated {
        /// Submodule name
        name: String,
        /// Branch the update was pushed to
        branch: String,
        /// Newly created PR, if one did not already exist
        pull_request: Option<PullRequest>,
        /// Whether an open PR for this branch was already in flight
        reused_existing_pr: bool,
    },
    /// Processing this submodule failed; later submodules may still run
    Failed {
        /// Submodule name
        name: String,
        /// Rendered error
        error: String,
    },
}

impl UpdateOutcome {
    /// Submodule this outcome belongs to
    pub fn name(&self) -> &str {
        match self {
            Self::UpToDate { name } | Self::Updated { name, .. } | Self::Failed { name, .. } => {
                name
            }
        }
    }

    /// Whether the submodule failed to process
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Aggregated result of a full workflow run
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Per-submodule outcomes, in processing order
    pub outcomes: Vec<UpdateOutcome>,
}

impl UpdateSummary {
    /// Number of submodules that produced a pushed update
    pub fn updated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, UpdateOutcome::Updated { .. }))
            .count()
    }

    /// Number of PRs created during this run
    pub fn created_pr_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    UpdateOutcome::Updated {
                        pull_request: Some(_),
                        ..
                    }
                )
            })
            .count()
    }

    /// Number of submodules that failed
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Whether every submodule processed cleanly
    pub fn all_ok(&self) -> bool {
        self.failed_count() == 0
    }
}
