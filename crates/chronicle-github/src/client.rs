// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! GitHub REST client
//!
//! A thin, typed wrapper over the handful of endpoints the tools need:
//! commit listing, commit detail, and the contents API for reading and
//! writing the report file. Every request runs under the configured
//! timeout; a timed-out request surfaces as [`GithubError::Timeout`].

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chronicle_history::CommitRecord;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::error::GithubError;
use crate::normalize::{normalize_commit, normalize_detail, RawCommit, RawCommitDetail};

const GITHUB_JSON: &str = "application/vnd.github+json";

/// An existing file read through the contents API.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    /// Blob sha, required when updating the file
    pub sha: String,
    /// Decoded file text
    pub text: String,
    /// Browser URL of the file
    pub html_url: String,
}

/// Result of creating or updating a file through the contents API.
#[derive(Debug, Clone)]
pub struct FileCommit {
    /// Sha of the commit that wrote the file
    pub commit_sha: String,
    /// Browser URL of that commit
    pub commit_url: String,
    /// Browser URL of the file
    pub file_url: String,
}

#[derive(Debug, Deserialize)]
struct RawContents {
    sha: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPutResponse {
    #[serde(default)]
    content: Option<RawContentMeta>,
    commit: RawCommitMeta,
}

#[derive(Debug, Deserialize)]
struct RawContentMeta {
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCommitMeta {
    sha: String,
    #[serde(default)]
    html_url: Option<String>,
}

/// Authenticated GitHub API client.
///
/// Construction requires a token; there is no anonymous mode. A fresh
/// client is cheap to build per tool invocation.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    /// Build a client for the given token, API base URL, and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Api`] if the token is not a valid header
    /// value or the HTTP client cannot be constructed.
    pub fn new(
        token: &str,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| GithubError::Api("token is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let http = reqwest::Client::builder()
            .user_agent(concat!("chronicle-mcp/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| GithubError::Api(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Verify that the repository exists and is visible with this token.
    ///
    /// # Errors
    ///
    /// 404 maps to [`GithubError::RepositoryNotFound`], 403 to
    /// [`GithubError::PermissionDenied`].
    pub async fn resolve_repository(&self, owner: &str, repo: &str) -> Result<(), GithubError> {
        let url = format!("{}/repos/{owner}/{repo}", self.api_url);
        let resp = self.send_get(&url, &[]).await?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(GithubError::RepositoryNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            StatusCode::FORBIDDEN => Err(GithubError::PermissionDenied {
                detail: body_text(resp).await,
            }),
            s => Err(api_error(s, resp).await),
        }
    }

    /// List the most recent commits, optionally from a named branch and
    /// optionally with per-file diff detail.
    ///
    /// # Errors
    ///
    /// Maps GitHub's response codes onto the typed error taxonomy: missing
    /// repository, missing branch, empty repository (409), permission
    /// denied (403), timeout, or a generic API failure.
    pub async fn recent_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
        count: usize,
        detailed: bool,
    ) -> Result<Vec<CommitRecord>, GithubError> {
        self.resolve_repository(owner, repo).await?;

        let url = format!("{}/repos/{owner}/{repo}/commits", self.api_url);
        let per_page = count.to_string();
        let mut query: Vec<(&str, &str)> = vec![("per_page", per_page.as_str())];
        if let Some(b) = branch {
            query.push(("sha", b));
        }

        let resp = self.send_get(&url, &query).await?;
        let mut raw: Vec<RawCommit> = match resp.status() {
            s if s.is_success() => decode_json(resp).await?,
            StatusCode::NOT_FOUND => {
                return Err(match branch {
                    Some(b) => GithubError::BranchNotFound {
                        branch: b.to_string(),
                        owner: owner.to_string(),
                        repo: repo.to_string(),
                    },
                    None => GithubError::RepositoryNotFound {
                        owner: owner.to_string(),
                        repo: repo.to_string(),
                    },
                });
            }
            StatusCode::CONFLICT => {
                return Err(GithubError::EmptyRepository {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                });
            }
            StatusCode::FORBIDDEN => {
                return Err(GithubError::PermissionDenied {
                    detail: body_text(resp).await,
                });
            }
            s => return Err(api_error(s, resp).await),
        };

        // per_page is a hint to the API; the count cap is enforced here
        raw.truncate(count);

        tracing::debug!(owner, repo, count = raw.len(), detailed, "listed commits");

        if !detailed {
            return Ok(raw.iter().map(normalize_commit).collect());
        }

        let mut records = Vec::with_capacity(raw.len());
        for item in &raw {
            records.push(self.commit_detail(owner, repo, &item.sha).await?);
        }
        Ok(records)
    }

    /// Fetch one commit with its per-file diff detail.
    ///
    /// # Errors
    ///
    /// 403 maps to [`GithubError::PermissionDenied`]; any other failure is
    /// [`GithubError::Api`] or [`GithubError::Timeout`].
    pub async fn commit_detail(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CommitRecord, GithubError> {
        let url = format!("{}/repos/{owner}/{repo}/commits/{sha}", self.api_url);
        let resp = self.send_get(&url, &[]).await?;

        match resp.status() {
            s if s.is_success() => {
                let raw: RawCommitDetail = decode_json(resp).await?;
                Ok(normalize_detail(&raw))
            }
            StatusCode::FORBIDDEN => Err(GithubError::PermissionDenied {
                detail: body_text(resp).await,
            }),
            s => Err(api_error(s, resp).await),
        }
    }

    /// Read a file through the contents API.
    ///
    /// Returns `Ok(None)` when the file does not exist on the branch.
    ///
    /// # Errors
    ///
    /// 403 maps to [`GithubError::PermissionDenied`]; any other failure is
    /// [`GithubError::Api`] or [`GithubError::Timeout`].
    pub async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<RemoteFile>, GithubError> {
        let url = format!("{}/repos/{owner}/{repo}/contents/{path}", self.api_url);
        let resp = self.send_get(&url, &[("ref", branch)]).await?;

        match resp.status() {
            s if s.is_success() => {
                let raw: RawContents = decode_json(resp).await?;
                Ok(Some(RemoteFile {
                    sha: raw.sha,
                    text: decode_content(raw.content.as_deref().unwrap_or_default()),
                    html_url: raw.html_url.unwrap_or_default(),
                }))
            }
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::FORBIDDEN => Err(GithubError::PermissionDenied {
                detail: body_text(resp).await,
            }),
            s => Err(api_error(s, resp).await),
        }
    }

    /// Create or update a file through the contents API.
    ///
    /// `existing_sha` must be the current blob sha when updating; `None`
    /// creates the file.
    ///
    /// # Errors
    ///
    /// 403 maps to [`GithubError::PermissionDenied`], 404 to
    /// [`GithubError::BranchNotFound`]; anything else is
    /// [`GithubError::Api`] or [`GithubError::Timeout`].
    #[allow(clippy::too_many_arguments)]
    pub async fn put_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
        message: &str,
        text: &str,
        existing_sha: Option<&str>,
    ) -> Result<FileCommit, GithubError> {
        let url = format!("{}/repos/{owner}/{repo}/contents/{path}", self.api_url);

        let mut body = json!({
            "message": message,
            "content": BASE64.encode(text),
            "branch": branch,
        });
        if let Some(sha) = existing_sha {
            body["sha"] = json!(sha);
        }

        let resp = self
            .http
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        match resp.status() {
            s if s.is_success() => {
                let raw: RawPutResponse = decode_json(resp).await?;
                Ok(FileCommit {
                    commit_sha: raw.commit.sha,
                    commit_url: raw.commit.html_url.unwrap_or_default(),
                    file_url: raw
                        .content
                        .and_then(|c| c.html_url)
                        .unwrap_or_default(),
                })
            }
            StatusCode::FORBIDDEN => Err(GithubError::PermissionDenied {
                detail: body_text(resp).await,
            }),
            StatusCode::NOT_FOUND => Err(GithubError::BranchNotFound {
                branch: branch.to_string(),
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            s => Err(api_error(s, resp).await),
        }
    }

    async fn send_get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, GithubError> {
        self.http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(url, e))
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> GithubError {
    if e.is_timeout() {
        GithubError::Timeout {
            url: url.to_string(),
        }
    } else {
        GithubError::Api(e.to_string())
    }
}

async fn body_text(resp: reqwest::Response) -> String {
    resp.text().await.unwrap_or_default()
}

async fn api_error(status: StatusCode, resp: reqwest::Response) -> GithubError {
    GithubError::Api(format!("{status}: {}", body_text(resp).await))
}

async fn decode_json<T: for<'de> Deserialize<'de>>(
    resp: reqwest::Response,
) -> Result<T, GithubError> {
    resp.json()
        .await
        .map_err(|e| GithubError::Api(format!("invalid response body: {e}")))
}

/// Decode a base64 contents payload into text.
///
/// GitHub wraps the base64 across lines; whitespace is stripped before
/// decoding. Undecodable content yields an empty string, which the report
/// merger treats as an absent document.
fn decode_content(content: &str) -> String {
    let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    match BASE64.decode(cleaned.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_decode_content_plain() {
        assert_eq!(decode_content("aGVsbG8="), "hello");
    }

    #[test]
    fn test_decode_content_line_wrapped() {
        // GitHub inserts newlines every 60 characters
        assert_eq!(decode_content("aGVs\nbG8=\n"), "hello");
    }

    #[test]
    fn test_decode_content_invalid_is_empty() {
        assert_eq!(decode_content("!!! not base64 !!!"), "");
    }

    #[test]
    fn test_client_rejects_invalid_token() {
        let result = GithubClient::new(
            "token\nwith newline",
            "https://api.github.com",
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(GithubError::Api(_))));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GithubClient::new(
            "ghp_testtoken",
            "https://api.github.com/",
            Duration::from_secs(5),
        )
        .expect("build client");
        assert_eq!(client.api_url, "https://api.github.com");
    }
}
