//! Mock forge service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use subup::error::{Error, Result};
use subup::forge::ForgeService;
use subup::types::{PullRequest, RepoInfo, RepoSlug};

/// Call record for `create_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

/// Simple mock forge service for testing
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Configurable open-PR list and per-slug default branches
/// - Error injection for failure path testing
pub struct MockForgeService {
    slug: RepoSlug,
    next_pr_number: AtomicU64,
    open_prs: Mutex<Vec<PullRequest>>,
    default_branches: Mutex<HashMap<String, String>>,
    // Call tracking
    list_calls: AtomicU64,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    get_repository_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_create_pr: Mutex<Option<String>>,
    error_on_list: Mutex<Option<String>>,
}

impl MockForgeService {
    /// Create a mock targeting `octo/widgets` with default branch `main`
    pub fn new() -> Self {
        Self::with_slug(RepoSlug::new("octo", "widgets"))
    }

    /// Create a mock targeting the given slug
    pub fn with_slug(slug: RepoSlug) -> Self {
        Self {
            slug,
            next_pr_number: AtomicU64::new(1),
            open_prs: Mutex::new(Vec::new()),
            default_branches: Mutex::new(HashMap::new()),
            list_calls: AtomicU64::new(0),
            create_pr_calls: Mutex::new(Vec::new()),
            get_repository_calls: Mutex::new(Vec::new()),
            error_on_create_pr: Mutex::new(None),
            error_on_list: Mutex::new(None),
        }
    }

    // === Configuration methods ===

    /// Register an open pull request
    pub fn add_open_pr(&self, pr: PullRequest) {
        self.open_prs.lock().unwrap().push(pr);
    }

    /// Set the default branch reported for a slug (default: `main`)
    pub fn set_default_branch(&self, slug: &str, branch: &str) {
        self.default_branches
            .lock()
            .unwrap()
            .insert(slug.to_string(), branch.to_string());
    }

    // === Error injection methods ===

    /// Make `create_pull_request` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_open_pull_requests` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// How many times the open-PR list was fetched
    pub fn list_call_count(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Get all `create_pull_request` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get all slugs `get_repository` was called with
    pub fn get_repository_calls(&self) -> Vec<String> {
        self.get_repository_calls.lock().unwrap().clone()
    }

    /// Assert that `create_pull_request` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pull_request({head}, {base}) but got: {calls:?}"
        );
    }
}

impl Default for MockForgeService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForgeService for MockForgeService {
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::ForgeApi {
                status: 500,
                message: msg.clone(),
            });
        }

        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn create_pull_request(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            title: title.to_string(),
            body: body.to_string(),
            head: head.to_string(),
            base: base.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::ForgeApi {
                status: 422,
                message: msg.clone(),
            });
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let branch = head.split_once(':').map_or(head, |(_, b)| b);
        let pr = PullRequest {
            number,
            html_url: format!("https://github.com/{}/pull/{number}", self.slug),
            head_label: head.to_string(),
            head_ref: branch.to_string(),
            base_ref: base.to_string(),
            title: title.to_string(),
        };
        self.open_prs.lock().unwrap().push(pr.clone());
        Ok(pr)
    }

    async fn get_repository(&self, slug: &RepoSlug) -> Result<RepoInfo> {
        self.get_repository_calls
            .lock()
            .unwrap()
            .push(slug.to_string());

        let default_branch = self
            .default_branches
            .lock()
            .unwrap()
            .get(&slug.to_string())
            .cloned()
            .unwrap_or_else(|| "main".to_string());

        Ok(RepoInfo { default_branch })
    }

    async fn current_user(&self) -> Result<String> {
        Ok("robot".to_string())
    }

    fn slug(&self) -> &RepoSlug {
        &self.slug
    }
}
