//! MCP tool implementations for SVC administration.
//!
//! Two tools, mirroring the controller's CLI surface:
//!
//! - `check_system_status`: run `lssystem` and return the system summary
//! - `execute_svc_command`: run an arbitrary SVC CLI command
//!
//! This layer only validates that the command is non-empty and wraps the
//! gateway outcome for the MCP protocol; command construction and output
//! interpretation belong to the caller.

use std::sync::Arc;

use poem_mcpserver::{Tools, tool::StructuredContent};
use tracing::error;

use super::client::SvcClient;
use super::config::SvcConfig;
use super::types::SvcCommandResponse;

/// MCP tool implementation backed by one configured controller.
pub struct SvcCommands {
    client: SvcClient,
}

impl SvcCommands {
    pub fn new(config: Arc<SvcConfig>) -> Self {
        Self {
            client: SvcClient::new(config),
        }
    }

    async fn run_command(
        &self,
        command: &str,
    ) -> Result<StructuredContent<SvcCommandResponse>, String> {
        match self.client.execute_command(command).await {
            Ok(output) => Ok(StructuredContent(SvcCommandResponse {
                command: command.to_string(),
                output,
                executed_at: chrono::Utc::now().to_rfc3339(),
            })),
            Err(e) => {
                error!("Tool call failed: {}", e);
                Err(e.to_string())
            }
        }
    }
}

#[Tools]
impl SvcCommands {
    /// Check SVC system status. Runs `lssystem` on the storage controller
    /// and returns the system summary.
    async fn check_system_status(
        &self,
    ) -> Result<StructuredContent<SvcCommandResponse>, String> {
        self.run_command("lssystem").await
    }

    /// Execute any SVC CLI command directly on the storage controller
    /// (e.g., "lsvdisk", "lshost", "mkvdisk -mdiskgrp pool0 -size 10
    /// -unit gb -name vol1").
    async fn execute_svc_command(
        &self,
        /// The SVC CLI command to execute
        command: String,
    ) -> Result<StructuredContent<SvcCommandResponse>, String> {
        if command.trim().is_empty() {
            return Err("command must not be empty".to_string());
        }
        self.run_command(&command).await
    }
}
