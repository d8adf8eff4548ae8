// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! Configuration for the chronicle-mcp server
//!
//! All settings come from the command line with environment fallbacks; the
//! server holds no other state between tool invocations.

use std::time::Duration;

use clap::Parser;

/// Chronicle MCP Server - Git and GitHub commit history tools
#[derive(Parser, Debug, Clone)]
#[command(name = "chronicle-mcp")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// GitHub token used by the GitHub-backed tools
    ///
    /// Required for `list_github_commits` and `publish_commit_history`.
    /// Calls without a token fail before any network request; there is no
    /// anonymous fallback.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    ///
    /// Override for GitHub Enterprise or for tests.
    #[arg(long, env = "CHRONICLE_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Per-request timeout for GitHub calls, in seconds
    #[arg(long, env = "CHRONICLE_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr to avoid interfering with the MCP stdio
    /// transport.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// The request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is empty or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The API base URL is empty
    #[error("API base URL must not be empty")]
    EmptyApiUrl,

    /// The request timeout is zero
    #[error("Request timeout must be at least one second")]
    ZeroTimeout,
}
