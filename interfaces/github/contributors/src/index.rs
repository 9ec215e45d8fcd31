use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const USER_AGENT: &str = "rust-client";
const ACCEPT: &str = "application/vnd.github+json";

pub struct GitHubRestResult {
    pub body: String,
    pub status: StatusCode,
}

/// One entry of the contributors listing. Fields GitHub sends beyond these
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubContributor {
    pub login: String,
    pub avatar_url: String,
    pub site_admin: bool,
    pub contributions: i64,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: String,
}

#[derive(Debug, Error)]
pub enum BuildGitHubClientError {
    #[error("BuildHttpClient: {source}")]
    BuildHttpClient {
        #[source]
        source: reqwest::Error,
    },
}

impl GitHubClient {
    pub fn new(
        base_url: Url,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BuildGitHubClientError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| BuildGitHubClientError::BuildHttpClient { source })?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/repos/{owner}/{repo}/contributors`, keeping any path prefix
    /// the base carries (GitHub Enterprise mounts the API under `/api/v3`).
    pub fn contributors_url(&self, owner: &str, repo: &str) -> Result<Url, FetchRepoContributorsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchRepoContributorsError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "contributors"]);
        Ok(url)
    }

    pub async fn fetch_repo_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<GitHubRestResult, FetchRepoContributorsError> {
        let url = self.contributors_url(owner, repo)?;

        let response = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, bearer(&self.token))
            .header(header::ACCEPT, ACCEPT)
            .send()
            .await
            .map_err(|source| FetchRepoContributorsError::RequestSend { source })?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|source| FetchRepoContributorsError::ResponseRead { source })?;

        Ok(GitHubRestResult { body, status })
    }
}

/// Tokens already carrying a scheme (`Bearer ...`, `token ...`) are sent as is.
fn bearer(token: &str) -> String {
    let token = token.trim();
    let has_scheme = ["bearer ", "token "]
        .iter()
        .any(|scheme| {
            token.len() > scheme.len()
                && token
                    .get(..scheme.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        });

    if has_scheme {
        token.to_owned()
    } else {
        format!("Bearer {token}")
    }
}

#[derive(Debug, Error)]
pub enum FetchRepoContributorsError {
    #[error("InvalidBaseUrl: {base_url} cannot carry a path")]
    InvalidBaseUrl { base_url: String },

    #[error("RequestSend: {source}")]
    RequestSend {
        #[source]
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        #[source]
        source: reqwest::Error,
    },
}

/// Decodes a successful listing. GitHub answers `204 No Content` for empty
/// repositories, so a blank body is an empty list.
pub fn parse_contributors(body: &str) -> Result<Vec<GitHubContributor>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GitHubClient {
        GitHubClient::new(Url::parse(base).unwrap(), "secret", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn contributors_url_from_root_base() {
        let url = client("https://api.github.com")
            .contributors_url("rust-lang", "cargo")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/rust-lang/cargo/contributors"
        );
    }

    #[test]
    fn contributors_url_keeps_enterprise_prefix() {
        let url = client("https://ghe.example.com/api/v3/")
            .contributors_url("acme", "widgets")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/widgets/contributors"
        );
    }

    #[test]
    fn contributors_url_escapes_segments() {
        let url = client("https://api.github.com")
            .contributors_url("a/b", "c d")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/a%2Fb/c%20d/contributors"
        );
    }

    #[test]
    fn bearer_prefixes_bare_tokens_only() {
        assert_eq!(bearer("abc"), "Bearer abc");
        assert_eq!(bearer("Bearer abc"), "Bearer abc");
        assert_eq!(bearer("token abc"), "token abc");
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let body = r#"[
            {"login": "octocat", "id": 1, "avatar_url": "https://a/1", "type": "User",
             "site_admin": false, "contributions": 42},
            {"login": "dependabot[bot]", "avatar_url": "https://a/2", "type": "Bot",
             "site_admin": false, "contributions": 3}
        ]"#;
        let parsed = parse_contributors(body).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].login, "octocat");
        assert_eq!(parsed[0].contributions, 42);
        assert_eq!(parsed[1].login, "dependabot[bot]");
    }

    #[test]
    fn parse_blank_body_is_empty() {
        assert!(parse_contributors("").unwrap().is_empty());
        assert!(parse_contributors("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_missing_login() {
        let body = r#"[{"avatar_url": "u", "site_admin": false, "contributions": 1}]"#;
        assert!(parse_contributors(body).is_err());
    }
}
