//! Authentication strategies for SSH connections.
//!
//! A trait-based strategy system used for both the target controller and the
//! jump host. Strategies are assembled into an [`AuthChain`] at call time
//! from whichever credentials the configuration carries; a configured
//! private key is used on its own and a password only when no key is set.
//!
//! # Example
//!
//! ```ignore
//! use svc_mcp::mcp::auth::AuthChain;
//!
//! let chain = AuthChain::new()
//!     .with_key("/path/to/key")
//!     .with_password("secret");
//!
//! let result = chain.authenticate(&mut handle, "superuser").await?;
//! ```

mod chain;
mod key;
mod password;
mod traits;

pub use chain::AuthChain;
pub use key::KeyAuth;
pub use password::PasswordAuth;
pub use traits::AuthStrategy;
