// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! Local repository access
//!
//! Wraps a `git2::Repository` and produces canonical [`CommitRecord`]s from
//! its history. Local records keep the full 40-character sha.

use std::path::Path;

use chrono::{FixedOffset, TimeZone, Utc};
use chronicle_history::CommitRecord;
use git2::{BranchType, Repository, Sort};

use crate::error::GitError;

/// A local Git repository opened for history reads
pub struct LocalRepo {
    repo: Repository,
}

impl LocalRepo {
    /// Open a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RepositoryNotFound`] if the path is not a Git
    /// repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Names of the local branches in this repository.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Command`] if branch enumeration fails.
    pub fn branch_names(&self) -> Result<Vec<String>, GitError> {
        let mut names = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Walk the most recent commits, newest first.
    ///
    /// With a branch name the walk starts at that branch's head; without one
    /// it covers all local branch heads. At most `count` records are
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::BranchNotFound`] (listing the branches that do
    /// exist) when the named branch cannot be resolved, or
    /// [`GitError::Command`] for any other repository failure.
    pub fn recent_commits(
        &self,
        branch: Option<&str>,
        count: usize,
    ) -> Result<Vec<CommitRecord>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;

        match branch {
            Some(name) => {
                let branch_ref = self
                    .repo
                    .find_branch(name, BranchType::Local)
                    .map_err(|_| self.branch_not_found(name))?;
                let oid = branch_ref
                    .get()
                    .target()
                    .ok_or_else(|| self.branch_not_found(name))?;
                revwalk.push(oid)?;
            }
            None => {
                revwalk.push_glob("refs/heads/*")?;
            }
        }

        let mut records = Vec::new();
        for oid_result in revwalk {
            if records.len() >= count {
                break;
            }
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            records.push(normalize_commit(&commit));
        }

        tracing::debug!(
            count = records.len(),
            branch = branch.unwrap_or("<all>"),
            "walked local commits"
        );
        Ok(records)
    }

    fn branch_not_found(&self, name: &str) -> GitError {
        GitError::BranchNotFound {
            branch: name.to_string(),
            available: self.branch_names().unwrap_or_default(),
        }
    }
}

/// Normalize one libgit2 commit into the canonical record shape.
fn normalize_commit(commit: &git2::Commit<'_>) -> CommitRecord {
    let author = commit.author();
    CommitRecord::new(
        commit.id().to_string(),
        author.name().unwrap_or(""),
        format_time(author.when()),
        commit.message().unwrap_or(""),
    )
}

/// Render a git2 timestamp as ISO-8601, preserving the author's UTC offset.
fn format_time(when: git2::Time) -> String {
    let secs = when.seconds();
    FixedOffset::east_opt(when.offset_minutes() * 60)
        .and_then(|tz| tz.timestamp_opt(secs, 0).single())
        .map(|dt| dt.to_rfc3339())
        .or_else(|| Utc.timestamp_opt(secs, 0).single().map(|dt| dt.to_rfc3339()))
        .unwrap_or_default()
}
