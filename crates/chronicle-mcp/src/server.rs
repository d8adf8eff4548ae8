// Copyright (c) 2026 - present Chronicle contributors
// SPDX-License-Identifier: MIT

//! MCP server implementation for chronicle-mcp
//!
//! This module provides the core MCP server that exposes commit history
//! from local Git repositories and GitHub to LLMs via MCP tool calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::mcp_server::ServerHandler;
use rust_mcp_sdk::schema::{
    schema_utils::CallToolError, CallToolRequestParams, CallToolResult, ListToolsResult,
    PaginatedRequestParams, RpcError, TextContent, Tool, ToolInputSchema,
};
use rust_mcp_sdk::McpServer;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::handlers::{self, ToolContext};

/// Convert a JSON object into the properties format expected by ToolInputSchema.
///
/// ToolInputSchema expects `HashMap<String, Map<String, Value>>` for properties,
/// where each key maps to a JSON object describing that property's schema.
fn make_properties(json_obj: Value) -> HashMap<String, Map<String, Value>> {
    let mut properties = HashMap::new();
    if let Value::Object(obj) = json_obj {
        for (key, value) in obj {
            if let Value::Object(inner) = value {
                properties.insert(key, inner);
            }
        }
    }
    properties
}

/// The main chronicle MCP server handler
///
/// Exposes commit-history tools for LLM consumption. Invocations are
/// stateless; the handler only carries the immutable tool context.
pub struct ChronicleServer {
    ctx: ToolContext,
}

impl ChronicleServer {
    /// Create a new chronicle server with the given tool context
    #[must_use]
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Build the list of available tools
    pub fn build_tools() -> Vec<Tool> {
        vec![
            Self::local_commits_tool(),
            Self::github_commits_tool(),
            Self::publish_history_tool(),
        ]
    }

    fn local_commits_tool() -> Tool {
        Tool {
            name: "list_local_commits".into(),
            description: Some(
                "Get recent commits from a Git repository on the local filesystem. \
                 Returns one record per commit with full sha, author, ISO date, and \
                 the commit message summary line."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(
                vec!["repo_path".into()],
                Some(make_properties(json!({
                    "repo_path": {
                        "type": "string",
                        "description": "Path of the repository on the local filesystem"
                    },
                    "branch": {
                        "type": "string",
                        "description": "Branch to walk; all local branches when omitted"
                    },
                    "count": {
                        "type": "integer",
                        "default": 5,
                        "description": "Maximum commits to return"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Local Commit History".into()),
        }
    }

    fn github_commits_tool() -> Tool {
        Tool {
            name: "list_github_commits".into(),
            description: Some(
                "Get recent commits from a GitHub repository. Records carry a \
                 7-character sha; set 'detailed' to include per-file diffs and \
                 aggregate stats. Requires a GitHub token."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(
                vec!["owner".into(), "repo".into()],
                Some(make_properties(json!({
                    "owner": {
                        "type": "string",
                        "description": "Repository owner"
                    },
                    "repo": {
                        "type": "string",
                        "description": "Repository name"
                    },
                    "branch": {
                        "type": "string",
                        "description": "Branch to list; the repository default when omitted"
                    },
                    "count": {
                        "type": "integer",
                        "default": 5,
                        "description": "Maximum commits to return"
                    },
                    "detailed": {
                        "type": "boolean",
                        "default": false,
                        "description": "Include per-file diffs and aggregate stats"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("GitHub Commit History".into()),
        }
    }

    fn publish_history_tool() -> Tool {
        Tool {
            name: "publish_commit_history".into(),
            description: Some(
                "Render commit records as a Markdown history table and commit it to \
                 a GitHub repository. Appends to an existing report by default; set \
                 mode to 'regenerate' to rewrite it. Requires a GitHub token."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(
                vec!["owner".into(), "repo".into(), "commits".into()],
                Some(make_properties(json!({
                    "owner": {
                        "type": "string",
                        "description": "Repository owner"
                    },
                    "repo": {
                        "type": "string",
                        "description": "Repository name"
                    },
                    "commits": {
                        "type": "array",
                        "description": "Commit records to publish (as returned by the list tools)",
                        "items": { "type": "object" }
                    },
                    "branch": {
                        "type": "string",
                        "default": "main",
                        "description": "Branch to commit to"
                    },
                    "file_path": {
                        "type": "string",
                        "default": "history.md",
                        "description": "Path of the report file within the repository"
                    },
                    "mode": {
                        "type": "string",
                        "enum": ["append", "regenerate"],
                        "default": "append",
                        "description": "Append to or regenerate an existing report"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Publish Commit History".into()),
        }
    }
}

/// Serialize a handler result as a pretty-printed JSON text response.
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, CallToolError> {
    let text = serde_json::to_string_pretty(value).map_err(CallToolError::new)?;
    Ok(CallToolResult::text_content(vec![TextContent::new(
        text, None, None,
    )]))
}

/// ServerHandler implementation for the MCP protocol
#[async_trait]
impl ServerHandler for ChronicleServer {
    /// Handle requests to list available tools
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: Self::build_tools(),
            meta: None,
            next_cursor: None,
        })
    }

    /// Handle requests to call a specific tool
    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        tracing::debug!(tool = %params.name, "Calling tool");

        match params.name.as_str() {
            "list_local_commits" => {
                let records = handlers::handle_local_commits(params.arguments)
                    .map_err(CallToolError::new)?;
                json_result(&records)
            }
            "list_github_commits" => {
                let records = handlers::handle_github_commits(&self.ctx, params.arguments)
                    .await
                    .map_err(CallToolError::new)?;
                json_result(&records)
            }
            "publish_commit_history" => {
                let response = handlers::handle_publish_history(&self.ctx, params.arguments)
                    .await
                    .map_err(CallToolError::new)?;
                json_result(&response)
            }
            _ => Err(CallToolError::unknown_tool(&params.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tools() {
        let tools = ChronicleServer::build_tools();
        assert_eq!(tools.len(), 3);

        let tool_names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(tool_names.contains(&"list_local_commits"));
        assert!(tool_names.contains(&"list_github_commits"));
        assert!(tool_names.contains(&"publish_commit_history"));
    }

    #[test]
    fn test_tool_schemas_have_properties() {
        for tool in ChronicleServer::build_tools() {
            assert!(
                tool.input_schema.properties.is_some(),
                "Tool {} should have properties",
                tool.name
            );
        }
    }

    #[test]
    fn test_tool_schemas_describe_inputs() {
        let tools = ChronicleServer::build_tools();

        let local = tools.iter().find(|t| t.name == "list_local_commits").unwrap();
        let props = local.input_schema.properties.as_ref().unwrap();
        assert!(props.contains_key("repo_path"));
        assert!(props.contains_key("branch"));
        assert!(props.contains_key("count"));

        let publish = tools
            .iter()
            .find(|t| t.name == "publish_commit_history")
            .unwrap();
        let props = publish.input_schema.properties.as_ref().unwrap();
        assert!(props.contains_key("commits"));
        assert!(props.contains_key("mode"));
    }
}
