//! Canonical commit record types
//!
//! Every backend (local Git, GitHub) normalizes its native commit and diff
//! data into these shapes before anything else looks at it.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Maximum number of file diffs kept per commit.
pub const MAX_FILES: usize = 10;

/// Maximum number of characters of patch text kept per file.
pub const MAX_PATCH_CHARS: usize = 2000;

/// Sentinel used when a backend provides no patch text for a file.
///
/// Distinct from an empty string so that "backend sent nothing" and
/// "the diff is empty" remain distinguishable.
pub const NO_PATCH: &str = "no patch";

/// Aggregate change statistics for a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    /// Number of files changed
    pub total_files: usize,
    /// Total lines added
    pub additions: usize,
    /// Total lines deleted
    pub deletions: usize,
}

/// A single file change within a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path of the changed file
    pub name: String,
    /// Change status: "added", "modified", "removed", "renamed"
    pub status: String,
    /// Lines added in this file
    pub additions: usize,
    /// Lines deleted in this file
    pub deletions: usize,
    /// Patch text, truncated to [`MAX_PATCH_CHARS`]; [`NO_PATCH`] when absent
    pub patch: String,
    /// URL of the file blob, if the backend provides one
    pub url: String,
}

impl FileDiff {
    /// Total change volume (additions + deletions) for ranking.
    #[must_use]
    pub fn change_volume(&self) -> usize {
        self.additions + self.deletions
    }
}

/// Canonical unit of commit history, backend-independent.
///
/// A record without `stats`/`files` is a lightweight listing; one with both
/// is a detailed listing. The two shapes come from distinct operations and
/// are never mixed in one result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit identifier: full hash for local records, 7 characters for
    /// GitHub records
    pub sha: String,
    /// Author display name (empty when the backend provides none)
    pub author: String,
    /// ISO-8601 timestamp, or a 10-character salvage of an unparsable one
    pub date: String,
    /// Summary line of the commit message (never contains newlines)
    pub message: String,
    /// Aggregate stats, present only on detailed listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CommitStats>,
    /// Per-file diffs, present only on detailed listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileDiff>>,
}

impl CommitRecord {
    /// Create a lightweight record, reducing the message to its summary line.
    #[must_use]
    pub fn new(
        sha: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
        message: &str,
    ) -> Self {
        Self {
            sha: sha.into(),
            author: author.into(),
            date: date.into(),
            message: summary_line(message),
            stats: None,
            files: None,
        }
    }

    /// Whether this is a detailed listing (stats and files present).
    #[must_use]
    pub fn is_detailed(&self) -> bool {
        self.stats.is_some() && self.files.is_some()
    }
}

/// First line of a commit message, trimmed.
#[must_use]
pub fn summary_line(message: &str) -> String {
    message.lines().next().unwrap_or("").trim().to_string()
}

/// Normalize a raw backend date into the canonical form.
///
/// Valid ISO-8601 input is kept as RFC 3339; anything unparsable degrades
/// to its first 10 characters (approximating `YYYY-MM-DD`) instead of
/// failing the batch.
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.to_rfc3339(),
        Err(_) => raw.chars().take(10).collect(),
    }
}

/// Keep the most-changed files, at most [`MAX_FILES`] of them.
///
/// Sorted descending by change volume; the sort is stable so ties keep the
/// backend's original ordering.
#[must_use]
pub fn top_files(mut files: Vec<FileDiff>) -> Vec<FileDiff> {
    files.sort_by(|a, b| b.change_volume().cmp(&a.change_volume()));
    files.truncate(MAX_FILES);
    files
}

/// Truncate patch text to [`MAX_PATCH_CHARS`], mapping absent or empty
/// patches to the [`NO_PATCH`] sentinel.
#[must_use]
pub fn truncate_patch(patch: Option<&str>) -> String {
    match patch {
        None => NO_PATCH.to_string(),
        Some(p) if p.is_empty() => NO_PATCH.to_string(),
        Some(p) => p.chars().take(MAX_PATCH_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn file(name: &str, additions: usize, deletions: usize) -> FileDiff {
        FileDiff {
            name: name.to_string(),
            status: "modified".to_string(),
            additions,
            deletions,
            patch: NO_PATCH.to_string(),
            url: String::new(),
        }
    }

    #[test]
    fn test_summary_line_multiline() {
        assert_eq!(
            summary_line("feat: add widget\n\nLonger description."),
            "feat: add widget"
        );
    }

    #[test]
    fn test_summary_line_single_line() {
        assert_eq!(summary_line("fix typo"), "fix typo");
    }

    #[test]
    fn test_summary_line_empty() {
        assert_eq!(summary_line(""), "");
    }

    #[test]
    fn test_record_message_has_no_newlines() {
        let record = CommitRecord::new("abc1234", "Author", "2026-01-01T00:00:00Z", "a\nb\nc");
        assert!(!record.message.contains('\n'));
        assert_eq!(record.message, "a");
    }

    #[test]
    fn test_normalize_date_valid() {
        let normalized = normalize_date("2026-03-02T10:30:00Z");
        assert!(normalized.starts_with("2026-03-02T10:30:00"));
    }

    #[test]
    fn test_normalize_date_salvages_garbage() {
        assert_eq!(normalize_date("2026-03-02 not a timestamp"), "2026-03-02");
        assert_eq!(normalize_date("short"), "short");
    }

    #[test]
    fn test_top_files_truncates_to_ten() {
        let files: Vec<FileDiff> = (0..15).map(|i| file(&format!("f{i}"), i, 0)).collect();
        let top = top_files(files);

        assert_eq!(top.len(), MAX_FILES);
        // Most-changed first: f14 down to f5
        assert_eq!(top[0].name, "f14");
        assert_eq!(top[9].name, "f5");
        for pair in top.windows(2) {
            assert!(pair[0].change_volume() >= pair[1].change_volume());
        }
    }

    #[test]
    fn test_top_files_stable_on_ties() {
        let files = vec![file("first", 3, 0), file("second", 0, 3), file("third", 2, 1)];
        let top = top_files(files);
        assert_eq!(top[0].name, "first");
        assert_eq!(top[1].name, "second");
        assert_eq!(top[2].name, "third");
    }

    #[test]
    fn test_truncate_patch_sentinel() {
        assert_eq!(truncate_patch(None), NO_PATCH);
        assert_eq!(truncate_patch(Some("")), NO_PATCH);
    }

    #[test]
    fn test_truncate_patch_limits_length() {
        let long = "x".repeat(5000);
        let truncated = truncate_patch(Some(&long));
        assert_eq!(truncated.chars().count(), MAX_PATCH_CHARS);
    }

    #[test]
    fn test_truncate_patch_short_passthrough() {
        assert_eq!(truncate_patch(Some("@@ -1 +1 @@")), "@@ -1 +1 @@");
    }

    #[test]
    fn test_record_serialization_skips_absent_detail() {
        let record = CommitRecord::new("abc1234", "Author", "2026-01-01T00:00:00Z", "msg");
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(!json.contains("stats"));
        assert!(!json.contains("files"));
    }

    #[test]
    fn test_record_roundtrip_with_detail() {
        let record = CommitRecord {
            sha: "abc1234".to_string(),
            author: "Author".to_string(),
            date: "2026-01-01T00:00:00+00:00".to_string(),
            message: "msg".to_string(),
            stats: Some(CommitStats {
                total_files: 2,
                additions: 10,
                deletions: 3,
            }),
            files: Some(vec![file("a.rs", 7, 2), file("b.rs", 3, 1)]),
        };

        let json = serde_json::to_string(&record).expect("serialize");
        let back: CommitRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(record, back);
        assert!(back.is_detailed());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn file_strategy() -> impl Strategy<Value = FileDiff> {
        ("[a-z]{1,12}", 0usize..500, 0usize..500).prop_map(|(name, additions, deletions)| {
            FileDiff {
                name,
                status: "modified".to_string(),
                additions,
                deletions,
                patch: NO_PATCH.to_string(),
                url: String::new(),
            }
        })
    }

    proptest! {
        /// top_files never returns more than MAX_FILES entries
        #[test]
        fn prop_top_files_bounded(files in proptest::collection::vec(file_strategy(), 0..30)) {
            prop_assert!(top_files(files).len() <= MAX_FILES);
        }

        /// top_files output is sorted descending by change volume
        #[test]
        fn prop_top_files_sorted(files in proptest::collection::vec(file_strategy(), 0..30)) {
            let top = top_files(files);
            for pair in top.windows(2) {
                prop_assert!(pair[0].change_volume() >= pair[1].change_volume());
            }
        }

        /// Truncated patches never exceed the character budget
        #[test]
        fn prop_patch_bounded(patch in ".*") {
            let truncated = truncate_patch(Some(&patch));
            prop_assert!(truncated.chars().count() <= MAX_PATCH_CHARS.max(NO_PATCH.len()));
        }

        /// Summary lines never contain newlines
        #[test]
        fn prop_summary_single_line(message in ".*") {
            prop_assert!(!summary_line(&message).contains('\n'));
        }

        /// Unparsable dates degrade to at most 10 characters
        #[test]
        fn prop_date_salvage_bounded(raw in "[^0-9].*") {
            if DateTime::parse_from_rfc3339(&raw).is_err() {
                prop_assert!(normalize_date(&raw).chars().count() <= 10);
            }
        }
    }
}
