//! GitHub forge service implementation

use crate::error::{Error, Result};
use crate::forge::ForgeService;
use crate::types::{PullRequest, RepoInfo, RepoSlug};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

/// Default request timeout in seconds
///
/// A hung forge call must not stall the run indefinitely.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("subup/", env!("CARGO_PKG_VERSION"));

/// GitHub service using reqwest
pub struct GitHubForge {
    client: Client,
    token: String,
    host: Option<String>,
    slug: RepoSlug,
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    html_url: String,
    title: String,
    head: RefResponse,
    base: RefResponse,
}

#[derive(Deserialize)]
struct RefResponse {
    label: String,
    #[serde(rename = "ref")]
    ref_field: String,
}

#[derive(Deserialize)]
struct RepoResponse {
    default_branch: String,
}

#[derive(Deserialize)]
struct UserResponse {
    login: String,
}

#[derive(Serialize)]
struct CreatePullPayload<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
}

impl GitHubForge {
    /// Create a new GitHub service targeting `slug`
    pub fn new(token: String, slug: RepoSlug, host: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            token,
            host,
            slug,
        })
    }

    /// Client for user-scoped endpoints only, not tied to a repository
    ///
    /// Repository-scoped calls through a client built this way will fail.
    pub fn for_user(token: String, host: Option<String>) -> Result<Self> {
        Self::new(token, RepoSlug::new(String::new(), String::new()), host)
    }

    fn api_url(&self, path: &str) -> String {
        // GHE serves the REST API under /api/v3
        match &self.host {
            Some(host) => format!("https://{host}/api/v3{path}"),
            None => format!("https://api.github.com{path}"),
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.api_url(path))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.api_url(path))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
    }
}

/// Map a non-success response to [`Error::ForgeApi`] with status and body
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("<unreadable response body>"));
    Err(Error::ForgeApi {
        status: status.as_u16(),
        message,
    })
}

fn to_pull_request(pull: PullResponse) -> PullRequest {
    PullRequest {
        number: pull.number,
        html_url: pull.html_url,
        head_label: pull.head.label,
        head_ref: pull.head.ref_field,
        base_ref: pull.base.ref_field,
        title: pull.title,
    }
}

#[async_trait]
impl ForgeService for GitHubForge {
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let path = format!("/repos/{}/pulls", self.slug);

        let response = self
            .get(&path)
            .query(&[("state", "open"), ("per_page", "100")])
            .send()
            .await?;

        let pulls: Vec<PullResponse> = check_status(response).await?.json().await?;
        Ok(pulls.into_iter().map(to_pull_request).collect())
    }

    async fn create_pull_request(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest> {
        let path = format!("/repos/{}/pulls", self.slug);
        let payload = CreatePullPayload {
            title,
            body,
            head,
            base,
        };

        let response = self.post(&path).json(&payload).send().await?;
        let pull: PullResponse = check_status(response).await?.json().await?;
        Ok(to_pull_request(pull))
    }

    async fn get_repository(&self, slug: &RepoSlug) -> Result<RepoInfo> {
        let path = format!("/repos/{slug}");

        let response = self.get(&path).send().await?;
        let repo: RepoResponse = check_status(response).await?.json().await?;
        Ok(RepoInfo {
            default_branch: repo.default_branch,
        })
    }

    async fn current_user(&self) -> Result<String> {
        let response = self.get("/user").send().await?;
        let user: UserResponse = check_status(response).await?.json().await?;
        Ok(user.login)
    }

    fn slug(&self) -> &RepoSlug {
        &self.slug
    }
}
