// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! chronicle-git: local Git history backend for chronicle-mcp
//!
//! This library crate reads commit history from a filesystem repository via
//! libgit2 and normalizes it into the canonical record shape shared with
//! the GitHub backend.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use chronicle_git::LocalRepo;
//!
//! let repo = LocalRepo::open(".").expect("open repo");
//! let commits = repo.recent_commits(None, 5).expect("walk commits");
//!
//! for c in commits {
//!     println!("{} - {}", c.sha, c.message);
//! }
//! ```

pub mod error;
pub mod repo;

pub use error::GitError;
pub use repo::LocalRepo;
