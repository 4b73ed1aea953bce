//! Scoped branch switching with guaranteed restoration
//!
//! The update workflow must never leave the working copy stranded on an
//! update branch, even when the work inside the scope fails. [`BranchScope`]
//! records the branch that was active on entry and restores it either through
//! the explicit [`BranchScope::finish`] call or, on error and panic paths,
//! from `Drop`.

use super::GitRepo;
use crate::error::Result;
use tracing::warn;

/// Guard holding a checkout of a dedicated update branch
pub struct BranchScope<'a> {
    repo: &'a GitRepo,
    initial: String,
    branch: String,
    restored: bool,
}

impl<'a> BranchScope<'a> {
    /// Switch the repository onto `target_branch`, creating it at HEAD if no
    /// branch with exactly that name exists.
    ///
    /// Existing branches are matched by full-name equality against the parsed
    /// branch list; a branch that merely starts with the target name (e.g.
    /// `submodule-update/foo2` for target `submodule-update/foo`) is never
    /// reused.
    pub fn enter(repo: &'a GitRepo, target_branch: &str) -> Result<Self> {
        let branches = repo.branches()?;
        let initial = repo.current_branch()?;

        if !branches.iter().any(|b| b.name == target_branch) {
            repo.create_branch(target_branch)?;
        }
        repo.checkout(target_branch)?;

        Ok(Self {
            repo,
            initial,
            branch: target_branch.to_string(),
            restored: false,
        })
    }

    /// Branch the repository is checked out on while the scope is held
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Branch that will be restored when the scope ends
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// Restore the initial branch, surfacing checkout failures
    pub fn finish(mut self) -> Result<()> {
        self.restored = true;
        self.repo.checkout(&self.initial)
    }
}

impl Drop for BranchScope<'_> {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(error) = self.repo.checkout(&self.initial) {
                warn!(initial = %self.initial, %error, "failed to restore branch on scope exit");
            }
        }
    }
}
