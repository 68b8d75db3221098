use async_trait::async_trait;
use std::collections::HashMap;

use upkeep_utils::{get, Uri};

use crate::base_provider::ReleaseSource;
use crate::data::ReleaseDescriptor;
use crate::error::{ProviderError, Result};
use crate::repo::RepoId;

pub const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("upkeep/", env!("CARGO_PKG_VERSION"));

pub struct GitHubProvider {
    api_url: String,
    token: Option<String>,
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubProvider {
    pub fn new() -> Self {
        GitHubProvider {
            api_url: GITHUB_API_URL.to_string(),
            token: None,
        }
    }

    /// Point the provider at another API root (GitHub Enterprise, test servers).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Blank tokens are ignored.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn latest_release_url(&self, repo: &RepoId) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, repo.owner, repo.repo
        )
    }

    fn header_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::from([
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            (
                "Accept".to_string(),
                "application/vnd.github+json".to_string(),
            ),
        ]);
        if let Some(token) = &self.token {
            map.insert(
                "Authorization".to_string(),
                format!("Bearer {}", token.trim()),
            );
        }
        map
    }
}

#[async_trait]
impl ReleaseSource for GitHubProvider {
    fn get_friendly_name(&self) -> &'static str {
        "github"
    }

    async fn get_latest_release(&self, repo: &RepoId) -> Result<ReleaseDescriptor> {
        let url = self.latest_release_url(repo);
        let parsed_url = url
            .parse::<Uri>()
            .map_err(|e| ProviderError::InvalidUrl {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(%url, authenticated = self.token.is_some(), "querying GitHub");
        let rsp = get(parsed_url, &self.header_map())
            .await
            .map_err(|e| ProviderError::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;
        if !rsp.is_ok() {
            return Err(ProviderError::Status {
                url,
                status: rsp.status,
            });
        }

        let body = rsp.body.unwrap_or_default();
        serde_json::from_slice::<ReleaseDescriptor>(&body)
            .map_err(|source| ProviderError::Decode { url, source })
    }
}
