//! Private key file SSH authentication.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use russh::{client, keys};
use tracing::debug;

use crate::mcp::error::GatewayError;
use crate::mcp::session::SvcClientHandler;

use super::traits::AuthStrategy;

/// Private key file authentication strategy.
///
/// Loads a private key from a file and uses it for public key
/// authentication. Supports passphrase-less keys.
pub struct KeyAuth {
    key_path: PathBuf,
}

impl KeyAuth {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
        }
    }
}

#[async_trait]
impl AuthStrategy for KeyAuth {
    async fn authenticate(
        &self,
        handle: &mut client::Handle<SvcClientHandler>,
        username: &str,
    ) -> Result<bool, GatewayError> {
        let key_pair =
            keys::load_secret_key(&self.key_path, None).map_err(|e| GatewayError::KeyReadFailed {
                path: self.key_path.display().to_string(),
                detail: e.to_string(),
            })?;

        // For RSA keys, use the best hash algorithm the server supports
        let hash_alg = handle
            .best_supported_rsa_hash()
            .await
            .ok()
            .flatten()
            .flatten();
        debug!("Using RSA hash algorithm for key auth: {:?}", hash_alg);

        let key_with_hash = keys::PrivateKeyWithHashAlg::new(Arc::new(key_pair), hash_alg);

        let result = handle
            .authenticate_publickey(username, key_with_hash)
            .await
            .map_err(|e| {
                GatewayError::ConnectionFailed(format!("key authentication failed: {}", e))
            })?;

        Ok(result.success())
    }

    fn name(&self) -> &'static str {
        "key"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_auth_name() {
        let auth = KeyAuth::new("/path/to/key");
        assert_eq!(auth.name(), "key");
    }

    #[test]
    fn test_key_auth_creation() {
        let auth = KeyAuth::new("/home/user/.ssh/id_rsa");
        assert_eq!(auth.key_path, PathBuf::from("/home/user/.ssh/id_rsa"));
    }
}
