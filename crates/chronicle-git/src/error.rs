// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! Error types for chronicle-git

use thiserror::Error;

/// Errors that can occur while reading local Git history
#[derive(Debug, Error)]
pub enum GitError {
    /// Underlying git command failure from libgit2
    #[error("Git command error: {0}")]
    Command(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Invalid Git repository path: {path}")]
    RepositoryNotFound {
        /// The path that was opened as a repository
        path: String,
    },

    /// The named branch does not exist in the repository
    #[error("Branch '{branch}' not found. Available branches: {}", .available.join(", "))]
    BranchNotFound {
        /// The branch name that could not be resolved
        branch: String,
        /// Local branch names that do exist
        available: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_not_found_lists_available() {
        let err = GitError::BranchNotFound {
            branch: "missing".to_string(),
            available: vec!["main".to_string(), "develop".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("'missing'"));
        assert!(message.contains("main, develop"));
    }

    #[test]
    fn test_repository_not_found_names_path() {
        let err = GitError::RepositoryNotFound {
            path: "/tmp/nope".to_string(),
        };
        assert!(err.to_string().contains("/tmp/nope"));
    }
}
