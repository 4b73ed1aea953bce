//! Forge services for pull-request operations
//!
//! Provides the interface the update workflow drives for everything hosted
//! on the forge: the open-PR list, PR creation, and repository metadata.

mod detection;
mod github;

pub use detection::{detect_github, parse_github_remote, GitHubRemote};
pub use github::GitHubForge;

use crate::error::Result;
use crate::types::{PullRequest, RepoInfo, RepoSlug};
use async_trait::async_trait;

/// Forge service trait for pull-request operations
///
/// Abstracts the hosted API so the update workflow can run against a mock in
/// tests. All calls are authenticated with the bearer credential supplied at
/// construction.
#[async_trait]
pub trait ForgeService: Send + Sync {
    /// List open pull requests on the target repository
    ///
    /// Called once per run; PR existence for individual submodules is decided
    /// by head-label membership in this list.
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>>;

    /// Create a pull request on the target repository
    async fn create_pull_request(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest>;

    /// Fetch metadata for an arbitrary repository (used to resolve default
    /// branches of the target repo and of each submodule's upstream)
    async fn get_repository(&self, slug: &RepoSlug) -> Result<RepoInfo>;

    /// Login of the authenticated user
    async fn current_user(&self) -> Result<String>;

    /// The repository this service targets
    fn slug(&self) -> &RepoSlug;

    /// Default branch of the target repository (the PR base)
    async fn default_branch(&self) -> Result<String> {
        Ok(self.get_repository(self.slug()).await?.default_branch)
    }
}
