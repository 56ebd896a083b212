//! Password-based SSH authentication.

use async_trait::async_trait;
use russh::client;

use crate::mcp::error::GatewayError;
use crate::mcp::session::SvcClientHandler;

use super::traits::AuthStrategy;

/// Password authentication strategy.
pub struct PasswordAuth {
    password: String,
}

impl PasswordAuth {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

#[async_trait]
impl AuthStrategy for PasswordAuth {
    async fn authenticate(
        &self,
        handle: &mut client::Handle<SvcClientHandler>,
        username: &str,
    ) -> Result<bool, GatewayError> {
        let result = handle
            .authenticate_password(username, &self.password)
            .await
            .map_err(|e| {
                GatewayError::ConnectionFailed(format!("password authentication failed: {}", e))
            })?;

        Ok(result.success())
    }

    fn name(&self) -> &'static str {
        "password"
    }
}
