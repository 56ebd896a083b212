//! SSH client handler shared by the target and jump-host connections.
//!
//! Both the tunnel establisher (for the jump host) and the command executor
//! (for the target) use the same russh handler: host keys are accepted
//! without verification, similar to `StrictHostKeyChecking=no` in OpenSSH.
//! Storage controllers are typically reached over a management network where
//! known_hosts distribution is impractical; production deployments that need
//! it should extend `check_server_key` to verify fingerprints.

use std::sync::Arc;
use std::time::Duration;

use russh::{client, keys};

/// Client handler that accepts all host keys.
pub struct SvcClientHandler;

impl client::Handler for SvcClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        // Accept all host keys (similar to StrictHostKeyChecking=no)
        Ok(true)
    }
}

/// Build the russh client configuration used for every connection.
///
/// Both the jump-host control connection and the target connection pass
/// `None`: a connection must stay open for as long as the command runs, and
/// keepalives cover liveness. The parameter exists so a caller-side command
/// timeout could be layered on later without touching this module.
pub(crate) fn build_client_config(inactivity_timeout: Option<Duration>) -> Arc<client::Config> {
    Arc::new(client::Config {
        inactivity_timeout,
        keepalive_interval: Some(Duration::from_secs(30)),
        keepalive_max: 3,
        ..Default::default()
    })
}
