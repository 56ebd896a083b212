//! Configuration for the SVC gateway.
//!
//! All values are read from the environment exactly once at startup into an
//! explicit [`SvcConfig`] that is passed by reference into the tunnel
//! establisher and command executor. There is no ambient global state.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SVC_HOST` | (required) | Target storage controller host |
//! | `SVC_PORT` | 22 | Target SSH port |
//! | `SVC_USERNAME` | `superuser` | Target SSH username |
//! | `SVC_PASSWORD` | — | Target password (exactly one of password/key) |
//! | `SVC_PRIVATE_KEY_PATH` | — | Target private key file |
//! | `SVC_PROXY_HOST` | — | Jump host for SSH-forwarded tunneling |
//! | `SVC_PROXY_PORT` | 22 | Jump host SSH port |
//! | `SVC_PROXY_USERNAME` | `root` | Jump host username |
//! | `SVC_PROXY_PASSWORD` | — | Jump host password |
//! | `SVC_PROXY_PRIVATE_KEY_PATH` | — | Jump host private key file |
//! | `SVC_HTTP_PROXY_HOST` | — | CONNECT-style proxy host |
//! | `SVC_HTTP_PROXY_PORT` | — | CONNECT-style proxy port |
//! | `SVC_CONNECT_TIMEOUT_SECS` | 20 | Connect/auth timeout in seconds |
//! | `SVC_MAX_OUTPUT_BYTES` | unbounded | Cap on captured command output |
//!
//! Configuring both `SVC_PROXY_HOST` and `SVC_HTTP_PROXY_HOST` is rejected:
//! the two tunneling strategies are mutually exclusive per deployment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::mcp::error::GatewayError;

/// Default SSH port for the target controller
pub(crate) const DEFAULT_PORT: u16 = 22;

/// Default username on the target controller
pub(crate) const DEFAULT_USERNAME: &str = "superuser";

/// Default SSH port for the jump host
pub(crate) const DEFAULT_PROXY_PORT: u16 = 22;

/// Default username on the jump host
pub(crate) const DEFAULT_PROXY_USERNAME: &str = "root";

/// Default connect/auth timeout in seconds
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 20;

/// Target authentication credential. Exactly one method per config;
/// validation rejects both-or-neither at load time.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    Password(String),
    KeyFile(PathBuf),
}

/// Tunneling strategy, fixed at configuration-load time.
///
/// The strategy is a tagged variant rather than a bundle of optional fields
/// so that no call-time guessing is needed about which fields govern
/// behavior when several are set.
#[derive(Debug, Clone)]
pub enum ProxyStrategy {
    /// No proxy configured; connect to the target over the network directly.
    Direct,
    /// Reach the target through an SSH jump host that forwards a
    /// `direct-tcpip` stream to the target's host:port.
    JumpHost {
        host: String,
        port: u16,
        username: String,
        /// Jump-host password; ignored when a key is also configured.
        password: Option<String>,
        /// Jump-host private key; takes precedence over the password.
        key_path: Option<PathBuf>,
    },
    /// Reach the target through an HTTP proxy via a CONNECT handshake.
    /// No proxy authentication is modeled for this strategy.
    ConnectTunnel { host: String, port: u16 },
}

/// Connection settings for one target controller, built once at startup.
#[derive(Debug, Clone)]
pub struct SvcConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub auth: AuthMethod,
    pub proxy: ProxyStrategy,
    /// Window for the combined connect + authenticate step.
    pub connect_timeout: Duration,
    /// Optional cap on combined captured output; `None` means unbounded.
    pub max_output_bytes: Option<usize>,
}

impl SvcConfig {
    /// Load and validate configuration from process environment variables.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Build a config from an arbitrary key lookup. Split out from
    /// [`SvcConfig::from_env`] so validation can be tested without touching
    /// the process environment.
    pub(crate) fn from_lookup(
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, GatewayError> {
        let host = get("SVC_HOST")
            .ok_or_else(|| GatewayError::ConfigInvalid("SVC_HOST is not set".to_string()))?;

        let port = parse_port(get("SVC_PORT"), "SVC_PORT")?.unwrap_or(DEFAULT_PORT);
        let username = get("SVC_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let auth = match (get("SVC_PASSWORD"), get("SVC_PRIVATE_KEY_PATH")) {
            (Some(_), Some(_)) => {
                return Err(GatewayError::ConfigInvalid(
                    "both SVC_PASSWORD and SVC_PRIVATE_KEY_PATH are set; configure exactly one"
                        .to_string(),
                ));
            }
            (Some(password), None) => AuthMethod::Password(password),
            (None, Some(path)) => AuthMethod::KeyFile(PathBuf::from(path)),
            (None, None) => {
                return Err(GatewayError::ConfigInvalid(
                    "no authentication method: set SVC_PASSWORD or SVC_PRIVATE_KEY_PATH"
                        .to_string(),
                ));
            }
        };

        let proxy = resolve_proxy_strategy(&get)?;

        let connect_timeout = Duration::from_secs(
            get("SVC_CONNECT_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        );

        let max_output_bytes =
            get("SVC_MAX_OUTPUT_BYTES").and_then(|v| v.parse::<usize>().ok());

        Ok(Self {
            host,
            port,
            username,
            auth,
            proxy,
            connect_timeout,
            max_output_bytes,
        })
    }
}

/// Pick the tunneling strategy from whichever proxy field group is populated.
/// Populating both groups is a hard error rather than a silent precedence.
fn resolve_proxy_strategy(
    get: &impl Fn(&str) -> Option<String>,
) -> Result<ProxyStrategy, GatewayError> {
    let jump_host = get("SVC_PROXY_HOST");
    let http_host = get("SVC_HTTP_PROXY_HOST");

    match (jump_host, http_host) {
        (Some(_), Some(_)) => Err(GatewayError::ConfigInvalid(
            "both SVC_PROXY_HOST and SVC_HTTP_PROXY_HOST are set; the tunneling strategies \
             are mutually exclusive"
                .to_string(),
        )),
        (Some(host), None) => Ok(ProxyStrategy::JumpHost {
            host,
            port: parse_port(get("SVC_PROXY_PORT"), "SVC_PROXY_PORT")?
                .unwrap_or(DEFAULT_PROXY_PORT),
            username: get("SVC_PROXY_USERNAME")
                .unwrap_or_else(|| DEFAULT_PROXY_USERNAME.to_string()),
            password: get("SVC_PROXY_PASSWORD"),
            key_path: get("SVC_PROXY_PRIVATE_KEY_PATH").map(PathBuf::from),
        }),
        (None, Some(host)) => {
            let port = parse_port(get("SVC_HTTP_PROXY_PORT"), "SVC_HTTP_PROXY_PORT")?
                .ok_or_else(|| {
                    GatewayError::ConfigInvalid(
                        "SVC_HTTP_PROXY_HOST is set but SVC_HTTP_PROXY_PORT is not".to_string(),
                    )
                })?;
            Ok(ProxyStrategy::ConnectTunnel { host, port })
        }
        (None, None) => Ok(ProxyStrategy::Direct),
    }
}

fn parse_port(value: Option<String>, var: &str) -> Result<Option<u16>, GatewayError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u16>()
            .map(Some)
            .map_err(|e| GatewayError::ConfigInvalid(format!("invalid {}: {}", var, e))),
    }
}
