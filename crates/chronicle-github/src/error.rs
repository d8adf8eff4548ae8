// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! Error types for chronicle-github

use thiserror::Error;

/// Errors that can occur while talking to the GitHub API
#[derive(Debug, Error)]
pub enum GithubError {
    /// Repository does not exist or is not visible with the given token
    #[error("Repository '{owner}/{repo}' not found or private")]
    RepositoryNotFound {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
    },

    /// The named branch does not exist in the repository
    #[error("Branch '{branch}' not found in {owner}/{repo}")]
    BranchNotFound {
        /// The branch name that 404ed
        branch: String,
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
    },

    /// The repository has no commits (GitHub answers 409)
    #[error("Repository '{owner}/{repo}' is empty")]
    EmptyRepository {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
    },

    /// The token is not allowed to perform the operation (403)
    #[error("Permission denied: {detail}")]
    PermissionDenied {
        /// Response detail from the API
        detail: String,
    },

    /// The request exceeded the configured timeout
    #[error("GitHub request timed out: {url}")]
    Timeout {
        /// The request URL that timed out
        url: String,
    },

    /// Any other API failure
    #[error("GitHub API error: {0}")]
    Api(String),
}
