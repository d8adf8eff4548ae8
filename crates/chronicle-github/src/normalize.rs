// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! Normalization of GitHub wire JSON into canonical records
//!
//! GitHub-sourced records abbreviate the sha to 7 characters; everything
//! else follows the shared record rules (summary-line message, ISO date
//! with 10-character salvage, top-10 files by change volume, patch
//! truncation with the "no patch" sentinel).

use chronicle_history::record::{normalize_date, top_files, truncate_patch};
use chronicle_history::{CommitRecord, CommitStats, FileDiff};
use serde::Deserialize;

/// Length of the abbreviated sha used for GitHub records.
pub const SHORT_SHA_LEN: usize = 7;

/// One entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    /// Full commit sha
    pub sha: String,
    /// Nested git commit payload
    pub commit: RawCommitPayload,
}

/// The `commit` object nested inside list and detail responses.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitPayload {
    /// Full commit message
    #[serde(default)]
    pub message: String,
    /// Author identity, absent for some imported commits
    pub author: Option<RawCommitAuthor>,
}

/// Author identity inside the commit payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommitAuthor {
    /// Display name
    pub name: Option<String>,
    /// ISO-8601 author date
    pub date: Option<String>,
}

/// Response of `GET /repos/{owner}/{repo}/commits/{sha}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitDetail {
    /// Full commit sha
    pub sha: String,
    /// Nested git commit payload
    pub commit: RawCommitPayload,
    /// Aggregate additions/deletions
    pub stats: Option<RawStats>,
    /// Per-file changes
    #[serde(default)]
    pub files: Vec<RawFile>,
}

/// Aggregate stats of a commit detail response.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawStats {
    /// Total lines added
    #[serde(default)]
    pub additions: usize,
    /// Total lines deleted
    #[serde(default)]
    pub deletions: usize,
}

/// One file entry of a commit detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    /// File path
    pub filename: String,
    /// Change status reported by GitHub
    #[serde(default)]
    pub status: String,
    /// Lines added
    #[serde(default)]
    pub additions: usize,
    /// Lines deleted
    #[serde(default)]
    pub deletions: usize,
    /// Unified diff text, absent for binary or oversized files
    pub patch: Option<String>,
    /// Blob URL for the file at this commit
    pub blob_url: Option<String>,
}

/// Abbreviate a sha to [`SHORT_SHA_LEN`] characters.
#[must_use]
pub fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

/// Normalize a commit list entry into a lightweight record.
#[must_use]
pub fn normalize_commit(raw: &RawCommit) -> CommitRecord {
    let author = raw.commit.author.clone().unwrap_or_default();
    CommitRecord::new(
        short_sha(&raw.sha),
        author.name.unwrap_or_default(),
        author.date.as_deref().map(normalize_date).unwrap_or_default(),
        &raw.commit.message,
    )
}

/// Normalize a commit detail response into a detailed record.
#[must_use]
pub fn normalize_detail(raw: &RawCommitDetail) -> CommitRecord {
    let author = raw.commit.author.clone().unwrap_or_default();
    let stats = raw.stats.unwrap_or_default();

    let files: Vec<FileDiff> = raw
        .files
        .iter()
        .map(|f| FileDiff {
            name: f.filename.clone(),
            status: f.status.clone(),
            additions: f.additions,
            deletions: f.deletions,
            patch: truncate_patch(f.patch.as_deref()),
            url: f.blob_url.clone().unwrap_or_default(),
        })
        .collect();

    let mut record = CommitRecord::new(
        short_sha(&raw.sha),
        author.name.unwrap_or_default(),
        author.date.as_deref().map(normalize_date).unwrap_or_default(),
        &raw.commit.message,
    );
    record.stats = Some(CommitStats {
        total_files: raw.files.len(),
        additions: stats.additions,
        deletions: stats.deletions,
    });
    record.files = Some(top_files(files));
    record
}
