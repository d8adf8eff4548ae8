// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! chronicle-history: canonical commit records and Markdown reports
//!
//! This library crate defines the backend-independent [`CommitRecord`]
//! shape that both the local Git and GitHub backends normalize into, and
//! the pure functions that render and incrementally update the Markdown
//! history report built from those records.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use chronicle_history::{markdown, CommitRecord};
//!
//! let records = vec![CommitRecord::new(
//!     "abc1234",
//!     "Ada",
//!     "2026-03-02T10:30:00Z",
//!     "feat: add parser\n\nDetails.",
//! )];
//! let report = markdown::generate(&records);
//! assert!(report.starts_with("# Commit History"));
//! ```

pub mod markdown;
pub mod record;

pub use markdown::HISTORY_HEADING;
pub use record::{CommitRecord, CommitStats, FileDiff, MAX_FILES, MAX_PATCH_CHARS, NO_PATCH};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::markdown::{generate, merge};
    pub use crate::record::{CommitRecord, CommitStats, FileDiff};
}
