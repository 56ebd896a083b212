#![deny(warnings)]
#![deny(clippy::unwrap_used)]

use std::sync::Arc;

use dotenv::dotenv;
use poem_mcpserver::McpServer;
use svc_mcp::mcp::SvcCommands;
use svc_mcp::mcp::config::SvcConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Arc::new(SvcConfig::from_env()?);

    poem_mcpserver::stdio::stdio(McpServer::new().tools(SvcCommands::new(config))).await?;
    Ok(())
}
