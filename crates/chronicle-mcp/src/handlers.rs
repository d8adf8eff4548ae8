// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! Tool handlers for the MCP server
//!
//! This module implements the handlers for each MCP tool, bridging MCP
//! requests to the Git and GitHub backends and returning canonical records
//! or a publish receipt. Handlers hold no state beyond the immutable
//! [`ToolContext`]; every GitHub call builds a fresh client.

use std::time::Duration;

use chronicle_git::LocalRepo;
use chronicle_github::normalize::short_sha;
use chronicle_github::{GithubClient, GithubError};
use chronicle_history::{markdown, CommitRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::Config;

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid input - missing or malformed field
    #[error("Invalid input: {0}. Check the tool's required parameters.")]
    InvalidInput(String),

    /// No GitHub credential configured
    #[error("GitHub token not configured. Set GITHUB_TOKEN or pass --github-token.")]
    MissingCredentials,

    /// Local Git backend failure
    #[error(transparent)]
    Git(#[from] chronicle_git::GitError),

    /// GitHub backend failure
    #[error(transparent)]
    Github(#[from] GithubError),

    /// JSON serialization error
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Context
// ============================================================================

/// Immutable per-server settings shared by all tool invocations.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// GitHub token, if configured
    pub github_token: Option<String>,
    /// Base URL of the GitHub REST API
    pub api_url: String,
    /// Per-request timeout for GitHub calls
    pub timeout: Duration,
}

impl ToolContext {
    /// Build the context from the parsed configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            github_token: config.github_token.clone(),
            api_url: config.api_url.clone(),
            timeout: config.timeout(),
        }
    }

    /// Build an authenticated GitHub client.
    ///
    /// Fails with [`HandlerError::MissingCredentials`] before any network
    /// I/O when no token is configured.
    fn github_client(&self) -> Result<GithubClient, HandlerError> {
        let token = self
            .github_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(HandlerError::MissingCredentials)?;
        Ok(GithubClient::new(token, &self.api_url, self.timeout)?)
    }
}

// ============================================================================
// Input Types
// ============================================================================

fn default_count() -> usize {
    5
}

fn default_publish_branch() -> String {
    "main".to_string()
}

fn default_file_path() -> String {
    "history.md".to_string()
}

/// Input for the list_local_commits tool
#[derive(Debug, Clone, Deserialize)]
pub struct LocalCommitsInput {
    /// Path of the repository on the local filesystem
    pub repo_path: String,
    /// Branch to walk; all local branches when absent
    pub branch: Option<String>,
    /// Maximum commits to return
    #[serde(default = "default_count")]
    pub count: usize,
}

/// Input for the list_github_commits tool
#[derive(Debug, Clone, Deserialize)]
pub struct GithubCommitsInput {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch to list; the repository default when absent
    pub branch: Option<String>,
    /// Maximum commits to return
    #[serde(default = "default_count")]
    pub count: usize,
    /// Include per-file diff detail (stats and files)
    #[serde(default)]
    pub detailed: bool,
}

/// How publish treats an existing report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishMode {
    /// Append new rows to a conforming existing report
    #[default]
    Append,
    /// Rewrite the report from the given records only
    Regenerate,
}

/// Input for the publish_commit_history tool
#[derive(Debug, Clone, Deserialize)]
pub struct PublishInput {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Records to publish
    pub commits: Vec<CommitRecord>,
    /// Branch to commit to
    #[serde(default = "default_publish_branch")]
    pub branch: String,
    /// Path of the report file within the repository
    #[serde(default = "default_file_path")]
    pub file_path: String,
    /// Append to or regenerate an existing report
    #[serde(default)]
    pub mode: PublishMode,
}

// ============================================================================
// Output Types
// ============================================================================

/// Response from the publish_commit_history tool
#[derive(Debug, Clone, Serialize)]
pub struct PublishResponse {
    /// Always true on the success path; failures surface as errors
    pub success: bool,
    /// Number of records written
    pub commits_processed: usize,
    /// Path of the report file
    pub file_path: String,
    /// Abbreviated sha of the commit that wrote the file
    pub commit_sha: String,
    /// Browser URL of that commit
    pub commit_url: String,
    /// Browser URL of the report file
    pub file_url: String,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Parse input from MCP arguments into a typed struct
pub(crate) fn parse_input<T: for<'de> Deserialize<'de>>(
    args: Option<Map<String, Value>>,
) -> Result<T, HandlerError> {
    let value = args.map(Value::Object).unwrap_or(Value::Object(Map::new()));
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidInput(e.to_string()))
}

/// Handle the list_local_commits tool
///
/// Walks a filesystem repository and returns lightweight records with
/// full-length shas, newest first.
pub fn handle_local_commits(
    args: Option<Map<String, Value>>,
) -> Result<Vec<CommitRecord>, HandlerError> {
    let input: LocalCommitsInput = parse_input(args)?;

    if input.repo_path.trim().is_empty() {
        return Err(HandlerError::InvalidInput(
            "repo_path must not be empty. Provide a path like '/home/user/project'.".to_string(),
        ));
    }

    let repo = LocalRepo::open(&input.repo_path)?;
    let records = repo.recent_commits(input.branch.as_deref(), input.count)?;
    Ok(records)
}

/// Handle the list_github_commits tool
///
/// Returns lightweight records (7-character shas), or detailed records with
/// stats and per-file diffs when `detailed` is set.
pub async fn handle_github_commits(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<Vec<CommitRecord>, HandlerError> {
    let input: GithubCommitsInput = parse_input(args)?;
    validate_repo_ident(&input.owner, &input.repo)?;

    // Credential check happens here, before any network call
    let client = ctx.github_client()?;

    let records = client
        .recent_commits(
            &input.owner,
            &input.repo,
            input.branch.as_deref(),
            input.count,
            input.detailed,
        )
        .await?;
    Ok(records)
}

/// Handle the publish_commit_history tool
///
/// Renders the given records as a Markdown report and commits it to the
/// repository: appending to a conforming existing report (default) or
/// regenerating it, depending on `mode`.
pub async fn handle_publish_history(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<PublishResponse, HandlerError> {
    let input: PublishInput = parse_input(args)?;
    validate_repo_ident(&input.owner, &input.repo)?;

    let client = ctx.github_client()?;

    // The contents API needs the current blob sha for updates, so the
    // existing file is read in both modes.
    let existing = client
        .get_file(&input.owner, &input.repo, &input.file_path, &input.branch)
        .await?;

    let text = match (&existing, input.mode) {
        (Some(file), PublishMode::Append) => markdown::merge(&file.text, &input.commits),
        _ => markdown::generate(&input.commits),
    };
    let existing_sha = existing.as_ref().map(|f| f.sha.as_str());

    let message = format!(
        "docs: update {} with {} commits",
        input.file_path,
        input.commits.len()
    );
    let committed = client
        .put_file(
            &input.owner,
            &input.repo,
            &input.file_path,
            &input.branch,
            &message,
            &text,
            existing_sha,
        )
        .await?;

    tracing::info!(
        owner = %input.owner,
        repo = %input.repo,
        file = %input.file_path,
        commits = input.commits.len(),
        created = existing.is_none(),
        "published commit history"
    );

    Ok(PublishResponse {
        success: true,
        commits_processed: input.commits.len(),
        file_path: input.file_path,
        commit_sha: short_sha(&committed.commit_sha),
        commit_url: committed.commit_url,
        file_url: committed.file_url,
    })
}

fn validate_repo_ident(owner: &str, repo: &str) -> Result<(), HandlerError> {
    if owner.trim().is_empty() || repo.trim().is_empty() {
        return Err(HandlerError::InvalidInput(
            "owner and repo must not be empty. Provide them like 'octocat' / 'hello-world'."
                .to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
