// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! chronicle-mcp library
//!
//! This module exports the core functionality of chronicle-mcp for use in
//! integration tests and as a library.

pub mod config;
pub mod handlers;
pub mod server;
