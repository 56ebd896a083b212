#![deny(warnings)]
#![deny(clippy::unwrap_used)]

use std::sync::Arc;

use dotenv::dotenv;
use poem::{EndpointExt, Route, Server, listener::TcpListener, middleware::Tracing};
use poem_mcpserver::{McpServer, streamable_http};
use svc_mcp::mcp::SvcCommands;
use svc_mcp::mcp::config::SvcConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Initialize logging with proper tracing default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().expect("valid directive")),
        )
        .init();

    // Read and validate the gateway configuration once; every tool call
    // borrows this struct.
    let config = Arc::new(SvcConfig::from_env()?);
    info!(
        "Gateway configured for {}@{}:{}",
        config.username, config.host, config.port
    );

    // Setup MCP server
    let mcp_port: u16 = std::env::var("MCP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let mcp_addr = format!("0.0.0.0:{}", mcp_port);
    info!("Starting MCP server on {}", mcp_addr);

    // Setup the poem-mcpserver endpoint with the SVC tools
    let app = Route::new()
        .at(
            "/",
            streamable_http::endpoint(move |_| {
                McpServer::new().tools(SvcCommands::new(config.clone()))
            }),
        )
        .with(Tracing);

    info!("MCP Server with SVC gateway support is ready");
    info!("Use check_system_status or execute_svc_command to administer the controller");

    // Run the MCP server
    Server::new(TcpListener::bind(mcp_addr))
        .name("SVC MCP Server")
        .run(app)
        .await?;

    Ok(())
}
