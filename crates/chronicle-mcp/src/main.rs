// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! chronicle-mcp: MCP server for Git and GitHub commit history
//!
//! This binary crate runs an MCP server over stdio exposing tools that
//! list commits from local and GitHub repositories and publish the
//! history as a Markdown report.

use anyhow::Context;
use clap::Parser;
use rust_mcp_sdk::mcp_server::{server_runtime, McpServerOptions, ToMcpServerHandler};
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ServerCapabilities, ServerCapabilitiesTools,
    LATEST_PROTOCOL_VERSION,
};
use rust_mcp_sdk::{McpServer, StdioTransport, TransportOptions};
use tracing::info;

use chronicle_mcp::config::Config;
use chronicle_mcp::handlers::ToolContext;
use chronicle_mcp::server::ChronicleServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate().context("invalid configuration")?;

    // Logs go to stderr; stdout belongs to the MCP stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting chronicle-mcp server...");

    let server_details = InitializeResult {
        server_info: Implementation {
            name: "chronicle-mcp".to_string(),
            title: Some("Chronicle MCP Server".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: None,
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some(
            "Tools for reading Git commit history (local repositories and GitHub) \
             and publishing it as a Markdown report."
                .to_string(),
        ),
        protocol_version: LATEST_PROTOCOL_VERSION.to_string(),
    };

    let transport = StdioTransport::new(TransportOptions::default())
        .map_err(|e| anyhow::anyhow!("failed to create stdio transport: {e}"))?;

    let handler = ChronicleServer::new(ToolContext::from_config(&config));
    let server = server_runtime::create_server(McpServerOptions {
        server_details,
        transport,
        handler: handler.to_mcp_server_handler(),
        task_store: None,
        client_task_store: None,
    });

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))?;

    Ok(())
}
