// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! chronicle-github: GitHub REST history backend for chronicle-mcp
//!
//! This library crate talks to the GitHub REST API (commit listing and the
//! contents API for the published report) and normalizes responses into the
//! canonical record shape shared with the local backend.

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod normalize;

pub use client::{FileCommit, GithubClient, RemoteFile};
pub use error::GithubError;
