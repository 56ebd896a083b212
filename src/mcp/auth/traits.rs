//! Authentication strategy trait definition.

use async_trait::async_trait;
use russh::client;

use crate::mcp::error::GatewayError;
use crate::mcp::session::SvcClientHandler;

/// Trait for SSH authentication strategies.
///
/// Implementations must be thread-safe (`Send + Sync`) for use across
/// async tasks.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Attempt to authenticate with the SSH server.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Authentication succeeded
    /// * `Ok(false)` - Authentication failed (credentials rejected)
    /// * `Err(err)` - Error during the authentication attempt
    async fn authenticate(
        &self,
        handle: &mut client::Handle<SvcClientHandler>,
        username: &str,
    ) -> Result<bool, GatewayError>;

    /// Name of this strategy, used for logging.
    fn name(&self) -> &'static str;
}
