//! GitHub REST API client
//!
//! Read-only, unauthenticated access to the two repository endpoints the
//! updater consumes: tag listings and single-commit lookups.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;

use crate::{Error, Result};

const GITHUB_API_BASE: &str = "https://api.github.com";

/// A release tag as returned by the tag listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit: CommitRef,
}

/// Bare commit reference embedded in a tag
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// A single commit as returned by the commit lookup endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub committer: CommitSignature,
}

/// Committer identity attached to a commit
#[derive(Debug, Clone, Deserialize)]
pub struct CommitSignature {
    /// ISO-8601 committer timestamp
    pub date: String,
}

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
}

impl GitHubClient {
    /// Create a new API client
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("edopro-update/0.1.0")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Build headers for API requests
    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            reqwest::header::HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static("2022-11-28"),
        );
        headers
    }

    /// Fetch the newest release tag of a repository.
    ///
    /// The tag listing endpoint returns tags newest first, so the first
    /// element is the latest release. An empty listing is an error.
    pub async fn latest_tag(&self, owner: &str, repo: &str) -> Result<Tag> {
        let url = format!("{}/repos/{}/{}/tags", GITHUB_API_BASE, owner, repo);

        let response = self
            .client
            .get(&url)
            .headers(Self::build_headers())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "Failed to list tags for {}/{}: {}",
                owner,
                repo,
                response.status()
            )));
        }

        let tags: Vec<Tag> = response.json().await.map_err(Error::Http)?;
        tags.into_iter()
            .next()
            .ok_or_else(|| Error::NoTags(format!("{}/{}", owner, repo)))
    }

    /// Look up a single commit by revision.
    pub async fn get_commit(&self, owner: &str, repo: &str, rev: &str) -> Result<Commit> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}",
            GITHUB_API_BASE, owner, repo, rev
        );

        let response = self
            .client
            .get(&url)
            .headers(Self::build_headers())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "Failed to fetch commit {}/{}@{}: {}",
                owner,
                repo,
                rev,
                response.status()
            )));
        }

        response.json().await.map_err(Error::Http)
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_listing() {
        let json = r#"[
            {
                "name": "v40.1.4",
                "zipball_url": "https://api.github.com/repos/edo9300/edopro/zipball/refs/tags/v40.1.4",
                "tarball_url": "https://api.github.com/repos/edo9300/edopro/tarball/refs/tags/v40.1.4",
                "commit": {
                    "sha": "48e6dd5c5c3a70705c2e7e6336b162eaa7946b23",
                    "url": "https://api.github.com/repos/edo9300/edopro/commits/48e6dd5c5c3a70705c2e7e6336b162eaa7946b23"
                },
                "node_id": "MDM6UmVmMTIzNDU2Nzg5OnJlZnMvdGFncy92NDAuMS40"
            },
            {
                "name": "v40.1.3",
                "commit": {
                    "sha": "0000000000000000000000000000000000000000",
                    "url": "https://api.github.com/repos/edo9300/edopro/commits/0000000000000000000000000000000000000000"
                }
            }
        ]"#;

        let tags: Vec<Tag> = serde_json::from_str(json).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "v40.1.4");
        assert_eq!(
            tags[0].commit.sha,
            "48e6dd5c5c3a70705c2e7e6336b162eaa7946b23"
        );
    }

    #[test]
    fn test_parse_commit() {
        let json = r#"{
            "sha": "7edde28d4f8c0c3589934c398a3a441286bb7c22",
            "node_id": "MDY6Q29tbWl0MTIzNDU2Nzg5",
            "commit": {
                "author": {
                    "name": "edo9300",
                    "email": "edo9300@example.com",
                    "date": "2023-05-01T09:58:12Z"
                },
                "committer": {
                    "name": "edo9300",
                    "email": "edo9300@example.com",
                    "date": "2023-05-01T10:00:00Z"
                },
                "message": "Fix build"
            }
        }"#;

        let commit: Commit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.sha, "7edde28d4f8c0c3589934c398a3a441286bb7c22");
        assert_eq!(commit.commit.committer.date, "2023-05-01T10:00:00Z");
    }
}
