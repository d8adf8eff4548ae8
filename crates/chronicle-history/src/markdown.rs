// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! Markdown history report generation and merging
//!
//! Both entry points are pure functions over [`CommitRecord`] slices. They
//! never fail on malformed input; bad fields render as placeholders rather
//! than aborting the whole document.

use chrono::DateTime;

use crate::record::CommitRecord;

/// Heading marker that identifies a conforming report document.
pub const HISTORY_HEADING: &str = "# Commit History";

/// Placeholder rendered for missing values.
const PLACEHOLDER: &str = "N/A";

/// Render a complete report document for the given records.
///
/// Records are emitted in input order; the caller controls sorting. An empty
/// input produces the header block with zero data rows, which is still a
/// well-formed document.
#[must_use]
pub fn generate(records: &[CommitRecord]) -> String {
    let mut doc = String::from(header());
    for record in records {
        doc.push_str(&format_row(record));
        doc.push('\n');
    }
    doc
}

/// Merge new records into an existing report document.
///
/// If `existing` is empty or does not contain [`HISTORY_HEADING`], the
/// document is regenerated from scratch and any unrecognized content is
/// discarded. Otherwise new rows are appended after trimming trailing
/// whitespace. This is a pure append: merging the same records twice
/// produces duplicate rows.
#[must_use]
pub fn merge(existing: &str, records: &[CommitRecord]) -> String {
    if existing.is_empty() || !existing.contains(HISTORY_HEADING) {
        return generate(records);
    }

    let mut doc = existing.trim_end().to_string();
    doc.push('\n');
    for record in records {
        doc.push_str(&format_row(record));
        doc.push('\n');
    }
    doc
}

fn header() -> &'static str {
    "# Commit History\n\n\
     | Date | SHA | Author | Message | Files |\n\
     | --- | --- | --- | --- | --- |\n"
}

/// Format one table row for a record.
fn format_row(record: &CommitRecord) -> String {
    let date = format_date(&record.date);
    let author = if record.author.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        record.author.clone()
    };
    let message = if record.message.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        record.message.replace('|', "\\|")
    };
    let file_count = record.stats.map_or(0, |s| s.total_files);

    format!(
        "| {date} | {sha} | {author} | {message} | {file_count} |",
        sha = record.sha
    )
}

/// Reduce an ISO-8601 date to `YYYY-MM-DD`.
///
/// A date that fails to parse renders as its first 10 characters verbatim
/// (the salvage form produced at normalization time); an empty date renders
/// as the placeholder.
fn format_date(date: &str) -> String {
    if date.is_empty() {
        return PLACEHOLDER.to_string();
    }
    match DateTime::parse_from_rfc3339(date) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => date.chars().take(10).collect(),
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = CommitRecord> {
        ("[0-9a-f]{7}", "[A-Za-z ]{1,20}", "[ -~]{0,60}").prop_map(|(sha, author, message)| {
            CommitRecord::new(sha, author, "2026-03-02T10:30:00Z", &message)
        })
    }

    proptest! {
        /// One data row per input record, in order
        #[test]
        fn prop_row_count_matches_input(
            records in proptest::collection::vec(record_strategy(), 0..20)
        ) {
            let doc = generate(&records);
            let rows: Vec<&str> = doc.lines().skip(4).collect();
            prop_assert_eq!(rows.len(), records.len());
            for (row, record) in rows.iter().zip(&records) {
                prop_assert!(row.contains(&record.sha));
            }
        }

        /// Escaped rows always split into exactly 5 columns
        #[test]
        fn prop_pipe_escaping_keeps_columns(record in record_strategy()) {
            let doc = generate(std::slice::from_ref(&record));
            let row = doc.lines().nth(4).expect("one data row");
            let unescaped = row.replace("\\|", "");
            prop_assert_eq!(unescaped.matches('|').count(), 6);
        }

        /// Merging appends exactly the new rows
        #[test]
        fn prop_merge_appends_rows(
            existing in proptest::collection::vec(record_strategy(), 0..10),
            new in proptest::collection::vec(record_strategy(), 0..10)
        ) {
            let doc = generate(&existing);
            let merged = merge(&doc, &new);
            let rows: Vec<&str> = merged.lines().skip(4).collect();
            prop_assert_eq!(rows.len(), existing.len() + new.len());
        }
    }
}
