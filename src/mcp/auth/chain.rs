//! Authentication chain for trying multiple strategies.

use std::path::Path;

use async_trait::async_trait;
use russh::client;
use tracing::debug;

use crate::mcp::error::GatewayError;
use crate::mcp::session::SvcClientHandler;

use super::traits::AuthStrategy;
use super::{KeyAuth, PasswordAuth};

/// Authentication chain that tries strategies in the order they were added.
/// The first successful authentication stops the chain.
///
/// A validated config carries exactly one credential, so the chain usually
/// has a single entry. A key read failure aborts the chain immediately
/// rather than falling through to later strategies.
pub struct AuthChain {
    strategies: Vec<Box<dyn AuthStrategy>>,
}

impl AuthChain {
    /// Create a new empty authentication chain.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Build a chain from optional credentials. A configured key is used on
    /// its own; the password is only consulted when no key is present, so a
    /// failing key never silently degrades to password authentication.
    pub fn for_credentials(key_path: Option<&Path>, password: Option<&str>) -> Self {
        match (key_path, password) {
            (Some(path), _) => Self::new().with_key(path),
            (None, Some(password)) => Self::new().with_password(password),
            (None, None) => Self::new(),
        }
    }

    /// Add key-based authentication to the chain.
    pub fn with_key(mut self, key_path: impl Into<std::path::PathBuf>) -> Self {
        self.strategies.push(Box::new(KeyAuth::new(key_path)));
        self
    }

    /// Add password authentication to the chain.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.strategies.push(Box::new(PasswordAuth::new(password)));
        self
    }

    /// Check if the chain has any authentication strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }
}

impl Default for AuthChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthStrategy for AuthChain {
    async fn authenticate(
        &self,
        handle: &mut client::Handle<SvcClientHandler>,
        username: &str,
    ) -> Result<bool, GatewayError> {
        if self.strategies.is_empty() {
            return Err(GatewayError::ConnectionFailed(
                "no authentication strategies configured".to_string(),
            ));
        }

        let mut last_error = None;

        for strategy in &self.strategies {
            debug!("Trying authentication strategy: {}", strategy.name());

            match strategy.authenticate(handle, username).await {
                Ok(true) => {
                    debug!("Authentication succeeded with strategy: {}", strategy.name());
                    return Ok(true);
                }
                Ok(false) => {
                    debug!("Authentication rejected with strategy: {}", strategy.name());
                    last_error = Some(GatewayError::ConnectionFailed(format!(
                        "{} authentication rejected",
                        strategy.name()
                    )));
                }
                Err(e @ GatewayError::KeyReadFailed { .. }) => {
                    // An unreadable key file never falls through to other
                    // strategies.
                    return Err(e);
                }
                Err(e) => {
                    debug!(
                        "Authentication error with strategy {}: {}",
                        strategy.name(),
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            GatewayError::ConnectionFailed("all authentication methods failed".to_string())
        }))
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_auth_chain_empty() {
        let chain = AuthChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_auth_chain_with_password() {
        let chain = AuthChain::new().with_password("secret");
        assert!(!chain.is_empty());
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_auth_chain_with_key() {
        let chain = AuthChain::new().with_key("/path/to/key");
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_for_credentials_key_excludes_password() {
        let key = PathBuf::from("/path/to/key");
        let chain = AuthChain::for_credentials(Some(&key), Some("secret"));

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.strategies[0].name(), "key");
    }

    #[test]
    fn test_for_credentials_password_only() {
        let chain = AuthChain::for_credentials(None, Some("secret"));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.strategies[0].name(), "password");
    }

    #[test]
    fn test_for_credentials_neither_is_empty() {
        let chain = AuthChain::for_credentials(None, None);
        assert!(chain.is_empty());
    }

    #[test]
    fn test_auth_chain_name() {
        let chain = AuthChain::new();
        assert_eq!(chain.name(), "chain");
    }

    #[test]
    fn test_auth_chain_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthChain>();
    }

    #[test]
    fn test_auth_chain_implements_auth_strategy() {
        let chain = AuthChain::new().with_password("secret");
        fn requires_auth_strategy(_: &dyn AuthStrategy) {}
        requires_auth_strategy(&chain);
    }
}
