//! Per-call orchestration of the tunnel establisher and command executor.
//!
//! One tool call maps to exactly one pass through the lifecycle:
//!
//! ```text
//! Idle -> TunnelPending -> Authenticating -> Executing -> (Succeeded | Failed) -> Closed
//! ```
//!
//! `TunnelPending` collapses into `Authenticating` when no proxy is
//! configured. `Closed` follows every terminal state: the session (and any
//! tunnel behind it) is torn down before the outcome is returned, so
//! concurrent calls never share a transport and error paths never leak
//! sockets. There is no connection cache and no retry; each call is a
//! single attempt over a fresh connection.

use std::sync::Arc;

use tracing::{error, info};

use crate::mcp::config::SvcConfig;
use crate::mcp::error::GatewayError;
use crate::mcp::executor::Session;
use crate::mcp::tunnel;

/// Gateway client for one configured target controller.
///
/// Cheap to share: holds only the immutable configuration. Every call to
/// [`SvcClient::execute_command`] builds its own transport and session.
#[derive(Clone)]
pub struct SvcClient {
    config: Arc<SvcConfig>,
}

impl SvcClient {
    pub fn new(config: Arc<SvcConfig>) -> Self {
        Self { config }
    }

    /// Run one administrative command on the controller and return its
    /// trimmed stdout.
    ///
    /// The command string is passed to the remote side verbatim; callers
    /// are responsible for constructing a well-formed CLI invocation.
    pub async fn execute_command(&self, command: &str) -> Result<String, GatewayError> {
        info!("Executing command on {}: {}", self.config.host, command);

        let transport = tunnel::establish(&self.config).await?;
        let mut session = Session::open(transport, &self.config).await?;

        let outcome = session.run(command).await;

        // One command per connection: close on success and failure alike.
        session.close().await;

        match &outcome {
            Ok(output) => info!(
                "Command succeeded on {} ({} bytes of output)",
                self.config.host,
                output.len()
            ),
            Err(e) => error!("Command failed on {}: {}", self.config.host, e),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_is_send_sync_and_clone() {
        fn assert_send_sync_clone<T: Send + Sync + Clone>() {}
        assert_send_sync_clone::<SvcClient>();
    }
}
