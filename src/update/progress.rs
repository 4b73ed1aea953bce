//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, CI runners, etc.) to receive
//! progress updates while the update workflow runs.

use crate::error::Error;
use crate::types::PullRequest;
use async_trait::async_trait;
use std::fmt;

/// Workflow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fetching the open-PR list and default branch from the forge
    FetchingPrs,
    /// Iterating submodules
    Updating,
    /// Run complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchingPrs => write!(f, "Fetching open pull requests"),
            Self::Updating => write!(f, "Updating submodules"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Per-submodule processing status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmoduleStatus {
    /// Processing started
    Started,
    /// Upstream had not moved; nothing to do
    UpToDate,
    /// Update committed and pushed
    Pushed,
    /// Processing failed with error message
    Failed(String),
}

impl fmt::Display for SubmoduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::UpToDate => write!(f, "up to date"),
            Self::Pushed => write!(f, "pushed"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during an update run.
/// - CLI implementations can print to terminal
/// - CI runners can annotate job logs
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called when a submodule changes status
    async fn on_submodule(&self, name: &str, status: SubmoduleStatus);

    /// Called when a PR is created for a submodule
    async fn on_pr_created(&self, name: &str, pr: &PullRequest);

    /// Called when an in-flight PR is being reused for a submodule
    async fn on_pr_reused(&self, name: &str, head_label: &str);

    /// Called when an error occurs (non-fatal for the run)
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_submodule(&self, _name: &str, _status: SubmoduleStatus) {}
    async fn on_pr_created(&self, _name: &str, _pr: &PullRequest) {}
    async fn on_pr_reused(&self, _name: &str, _head_label: &str) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
