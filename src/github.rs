use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::models::{AccountProfile, RepositorySummary};
use crate::query::{AccountType, Query};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "repo_browse";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GitHub API error ({status}): {body}")]
    Status { status: StatusCode, body: String },
}

/// The repository host the controller talks to. Two operations: the
/// account profile (for the public repository count) and one page of the
/// repository listing.
#[async_trait]
pub trait RepoHost: Send + Sync {
    async fn account_profile(
        &self,
        account_type: AccountType,
        account: &str,
    ) -> Result<AccountProfile, ApiError>;

    async fn repositories(
        &self,
        query: &Query,
        page: u32,
    ) -> Result<Vec<RepositorySummary>, ApiError>;
}

pub struct GithubApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubApi {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        request
    }
}

#[async_trait]
impl RepoHost for GithubApi {
    async fn account_profile(
        &self,
        account_type: AccountType,
        account: &str,
    ) -> Result<AccountProfile, ApiError> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            account_type.path_prefix(),
            urlencoding::encode(account)
        );

        debug!(url = %url, "fetching account profile");
        let response = self.build_request(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let profile: AccountProfile = response.json().await?;
        Ok(profile)
    }

    async fn repositories(
        &self,
        query: &Query,
        page: u32,
    ) -> Result<Vec<RepositorySummary>, ApiError> {
        let url = format!(
            "{}/{}/{}/repos?type={}&sort={}&direction={}&per_page={}&page={}",
            self.base_url,
            query.account_type.path_prefix(),
            urlencoding::encode(&query.account),
            query.visibility.api_value(),
            query.sort.api_field(),
            query.sort.api_direction(),
            query.per_page.count(),
            page
        );

        debug!(url = %url, "fetching repository listing");
        let response = self.build_request(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let repos: Vec<RepositorySummary> = response.json().await?;
        Ok(repos)
    }
}
