use async_trait::async_trait;
use octocrab::models::Repository;
use octocrab::{Octocrab, Page};
use serde::Serialize;
use tracing::warn;

use crate::client::SubscriptionClient;
use crate::config::{Config, Credentials};
use crate::error::{Result, UnwatchError};
use crate::types::{Subscription, WatchedPage};

const USER_AGENT: &str = "gh-unwatch";

pub struct GitHub {
    client: Octocrab,
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for UnwatchError {
    fn from(err: octocrab::Error) -> Self {
        UnwatchError::Api(err.to_string())
    }
}

#[derive(Serialize)]
struct ListParams {
    per_page: u8,
    page: u32,
}

impl GitHub {
    pub fn new(config: &Config, credentials: &Credentials) -> Result<Self> {
        let client = Octocrab::builder()
            .base_uri(config.api_url.as_str())
            .map_err(|e| UnwatchError::Config(format!("invalid api_url: {}", e)))?
            .personal_token(credentials.token().to_string())
            .build()
            .map_err(|e| UnwatchError::Auth(e.to_string()))?;

        Ok(Self {
            client,
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: credentials.token().to_string(),
        })
    }
}

#[async_trait]
impl SubscriptionClient for GitHub {
    async fn list_watched(&self, page: u32, per_page: u8) -> Result<WatchedPage> {
        let repos: Page<Repository> = self
            .client
            .get("/user/subscriptions", Some(&ListParams { per_page, page }))
            .await?;

        let next_page = repos
            .next
            .as_ref()
            .and_then(|uri| page_param(uri.query()));
        let last_page = repos.number_of_pages();

        let items = repos
            .items
            .into_iter()
            .filter_map(|repo| match repo.owner {
                Some(owner) if !repo.name.is_empty() => {
                    Some(Subscription::new(owner.login, repo.name))
                }
                _ => {
                    warn!(repo = %repo.name, "skipping watched repository without owner");
                    None
                }
            })
            .collect();

        Ok(WatchedPage {
            items,
            next_page,
            last_page,
        })
    }

    async fn delete_subscription(&self, organization: &str, repository: &str) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/subscription",
            self.api_url, organization, repository
        );
        let response = self
            .http
            .delete(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| UnwatchError::Api(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(UnwatchError::Api(format!("{}: {}", status, text)));
        }
        Ok(())
    }
}

/// Extract the `page` query parameter from a `Link` header URI.
fn page_param(query: Option<&str>) -> Option<u32> {
    query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_param_finds_page() {
        assert_eq!(page_param(Some("per_page=100&page=3")), Some(3));
        assert_eq!(page_param(Some("page=2&per_page=100")), Some(2));
    }

    #[test]
    fn page_param_ignores_per_page() {
        assert_eq!(page_param(Some("per_page=100")), None);
    }

    #[test]
    fn page_param_handles_missing_query() {
        assert_eq!(page_param(None), None);
        assert_eq!(page_param(Some("page=abc")), None);
    }
}
