use super::pagination::next_link;
use super::{ContentEntry, RepositoryApi};
use crate::error::{InsightsError, Result};
use crate::model::{ContributorStat, RepoSlug};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: &str = "100";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("repo-insights/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Blocking client for one repository on GitHub (or GitHub Enterprise).
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    repo: RepoSlug,
}

#[derive(Debug, Deserialize)]
struct FileContentResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<CommitSignature>,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ContributorItem {
    author: Option<ContributorAuthor>,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct ContributorAuthor {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

impl GitHubClient {
    pub fn new(config: &ClientConfig, repo: RepoSlug) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {}", config.token)).map_err(|_| {
            InsightsError::Config("token contains invalid header characters".to_string())
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            InsightsError::Config(format!("invalid API URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(InsightsError::Config(format!(
                "invalid API URL '{}'",
                config.base_url
            )));
        }

        info!("Created GitHub API client for {} at {}", repo, base_url);
        Ok(Self { client, base_url, repo })
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    /// `{base}/repos/{owner}/{name}/{segments...}` with each segment escaped.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["repos", self.repo.owner.as_str(), self.repo.name.as_str()])
                .extend(segments.into_iter().filter(|s| !s.is_empty()));
        }
        url
    }

    fn contents_url(&self, path: &str) -> Url {
        self.endpoint(std::iter::once("contents").chain(path.split('/')))
    }

    fn get(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        check_status(response)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        Ok(self.get(url)?.json()?)
    }

    /// Follow `Link: rel="next"` until the listing is exhausted.
    fn get_paginated<T: DeserializeOwned>(&self, mut url: Url) -> Result<Vec<T>> {
        url.query_pairs_mut().append_pair("per_page", PER_PAGE);
        let mut items = Vec::new();
        let mut next = Some(url);
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            let response = self.get(url)?;
            next = next_page(response.url(), response.headers().get(LINK))?;
            let page: Vec<T> = response.json()?;
            items.extend(page);
            pages += 1;
        }

        debug!("Fetched {} items over {} pages", items.len(), pages);
        Ok(items)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .map(|m| m.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                body
            }
        });
    Err(InsightsError::api(status.as_u16(), url, message))
}

/// Resolve the `rel="next"` target of a page against the URL it was served from.
fn next_page(current: &Url, link: Option<&HeaderValue>) -> Result<Option<Url>> {
    let Some(link) = link else {
        return Ok(None);
    };
    let pagination_error = |reason: String| InsightsError::Pagination {
        url: current.to_string(),
        reason,
    };
    let header = link
        .to_str()
        .map_err(|e| pagination_error(format!("Link header is not valid text: {e}")))?;
    match next_link(header) {
        Some(target) => current
            .join(&target)
            .map(Some)
            .map_err(|e| pagination_error(format!("invalid next target '{target}': {e}"))),
        None => Ok(None),
    }
}

fn decode_file_content(response: FileContentResponse, path: &str) -> Result<Vec<u8>> {
    match response.encoding.as_str() {
        "base64" => decode_base64_content(&response.content),
        // symlinks to directories and submodules come back without a payload
        "" if response.content.is_empty() => Ok(Vec::new()),
        other => Err(InsightsError::UnexpectedEncoding {
            encoding: other.to_string(),
            path: path.to_string(),
        }),
    }
}

/// Decode a base64 payload as served by the contents endpoint (wrapped at 60 columns).
pub fn decode_base64_content(content: &str) -> Result<Vec<u8>> {
    let cleaned: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(BASE64.decode(cleaned)?)
}

impl RepositoryApi for GitHubClient {
    fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>> {
        self.get_json(self.contents_url(path))
    }

    fn file_content(&self, path: &str) -> Result<Vec<u8>> {
        let response: FileContentResponse = self.get_json(self.contents_url(path))?;
        decode_file_content(response, path)
    }

    fn commit_dates(&self) -> Result<Vec<DateTime<Utc>>> {
        info!("Fetching commit history for {}", self.repo);
        let commits: Vec<CommitItem> = self.get_paginated(self.endpoint(["commits"]))?;
        commits
            .into_iter()
            .map(|c| {
                c.commit.author.map(|a| a.date).ok_or_else(|| {
                    InsightsError::InvalidDate(format!("commit {} has no author date", c.sha))
                })
            })
            .collect()
    }

    fn contributor_stats(&self) -> Result<Vec<ContributorStat>> {
        info!("Fetching contributor statistics for {}", self.repo);
        let response = self.get(self.endpoint(["stats", "contributors"]))?;
        match response.status() {
            StatusCode::ACCEPTED => {
                return Err(InsightsError::StatsPending(self.repo.to_string()));
            }
            StatusCode::NO_CONTENT => return Ok(Vec::new()),
            _ => {}
        }
        let items: Vec<ContributorItem> = response.json()?;
        Ok(items
            .into_iter()
            .map(|item| {
                let login = match item.author {
                    Some(author) => author.login,
                    None => {
                        warn!("Contributor entry without an author, reporting as ghost");
                        "ghost".to_string()
                    }
                };
                ContributorStat {
                    login,
                    total_commits: item.total,
                }
            })
            .collect())
    }
}
