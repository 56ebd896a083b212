//! MCP SVC module providing the SSH command gateway and its tool surface.
//!
//! This module is organized into the following submodules:
//!
//! - `types`: Serializable response types for MCP tools
//! - `config`: Explicit configuration struct loaded once from the environment
//! - `error`: Gateway error taxonomy
//! - `session`: russh client handler and connection settings
//! - `auth`: Authentication strategies (password, key, chain)
//! - `tunnel`: Tunnel establishment (direct, jump host, CONNECT proxy)
//! - `executor`: Single-command session execution
//! - `client`: Per-call orchestration
//! - `commands`: MCP tool implementations

pub mod auth;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod session;
pub mod tunnel;
pub mod types;

pub use commands::SvcCommands;
