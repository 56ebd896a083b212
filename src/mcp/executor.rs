//! Command execution over an established transport.
//!
//! Turns a command string and a transport into a resolved outcome:
//!
//! 1. **Authenticate**: connect over the transport (dialing the target
//!    directly, or speaking SSH over a tunnel stream via
//!    `russh::client::connect_stream`) and authenticate with the target
//!    credentials. The combined connect + auth step runs under the
//!    configured timeout (20 seconds by default).
//! 2. **Execute**: open one session channel, request execution of the
//!    literal command string, and collect stdout and stderr from channel
//!    messages as they arrive, in arrival order per stream.
//! 3. **Resolve**: exit status 0 yields the trimmed stdout text; anything
//!    else (non-zero status, signal termination, closure without a status)
//!    fails with `CommandFailed` carrying stderr if non-empty, else stdout.
//!
//! One command per connection: [`Session::close`] must run on every path
//! once the outcome is resolved, and `SvcClient` guarantees it does. The
//! session type is public so a future caller could hold authenticated
//! sessions longer and layer pooling on top without changing `run`.
//!
//! No shell quoting or escaping happens here. The command string is opaque
//! and the tool dispatch layer is responsible for its shape.

use russh::{ChannelMsg, Disconnect, client};
use tracing::{debug, info, warn};

use crate::mcp::auth::{AuthChain, AuthStrategy};
use crate::mcp::config::{AuthMethod, SvcConfig};
use crate::mcp::error::{ExitReason, GatewayError};
use crate::mcp::session::{SvcClientHandler, build_client_config};
use crate::mcp::tunnel::{Transport, TunnelHandle};

/// One authenticated connection to the target, scoped to one command.
pub struct Session {
    handle: client::Handle<SvcClientHandler>,
    /// Jump-host control connection backing the tunnel stream. Held only to
    /// keep the forwarded channel alive; dropped on close.
    control: Option<client::Handle<SvcClientHandler>>,
    max_output_bytes: Option<usize>,
}

impl Session {
    /// Connect over `transport` and authenticate with the target
    /// credentials from `config`.
    ///
    /// Exceeding the configured connect/auth window fails with
    /// [`GatewayError::AuthTimeout`]; rejection or transport errors fail
    /// with [`GatewayError::ConnectionFailed`]. The tunnel control
    /// connection is closed on every failure path.
    pub async fn open(transport: Transport, config: &SvcConfig) -> Result<Self, GatewayError> {
        let (tunnel_stream, control) = match transport {
            Transport::Direct => (None, None),
            Transport::Tunneled(TunnelHandle { stream, control }) => (Some(stream), control),
        };

        let connect_and_auth = async {
            let client_config = build_client_config(None);

            let mut handle = match tunnel_stream {
                None => {
                    debug!("Connecting directly to {}:{}", config.host, config.port);
                    client::connect(
                        client_config,
                        (config.host.as_str(), config.port),
                        SvcClientHandler,
                    )
                    .await
                    .map_err(|e| {
                        GatewayError::ConnectionFailed(format!(
                            "failed to connect to {}:{}: {}",
                            config.host, config.port, e
                        ))
                    })?
                }
                Some(stream) => {
                    debug!(
                        "Starting SSH handshake with {}:{} over tunnel",
                        config.host, config.port
                    );
                    client::connect_stream(client_config, stream, SvcClientHandler)
                        .await
                        .map_err(|e| {
                            GatewayError::ConnectionFailed(format!(
                                "failed to connect to {}:{} over tunnel: {}",
                                config.host, config.port, e
                            ))
                        })?
                }
            };

            let chain = match &config.auth {
                AuthMethod::Password(password) => AuthChain::new().with_password(password),
                AuthMethod::KeyFile(path) => AuthChain::new().with_key(path),
            };

            match chain.authenticate(&mut handle, &config.username).await {
                Ok(true) => Ok(handle),
                Ok(false) => {
                    let _ = handle.disconnect(Disconnect::ByApplication, "", "english").await;
                    Err(GatewayError::ConnectionFailed(format!(
                        "authentication to {}@{} rejected",
                        config.username, config.host
                    )))
                }
                Err(e) => {
                    let _ = handle.disconnect(Disconnect::ByApplication, "", "english").await;
                    Err(e)
                }
            }
        };

        match tokio::time::timeout(config.connect_timeout, connect_and_auth).await {
            Ok(Ok(handle)) => {
                info!("Authenticated to {}@{}:{}", config.username, config.host, config.port);
                Ok(Self {
                    handle,
                    control,
                    max_output_bytes: config.max_output_bytes,
                })
            }
            Ok(Err(e)) => {
                close_quietly(control).await;
                Err(e)
            }
            Err(_) => {
                // The pending connection is dropped with the timed-out
                // future; only the tunnel control needs explicit closing.
                close_quietly(control).await;
                Err(GatewayError::AuthTimeout {
                    host: config.host.clone(),
                    port: config.port,
                    secs: config.connect_timeout.as_secs(),
                })
            }
        }
    }

    /// Execute one command and resolve its outcome.
    ///
    /// Success is the trimmed stdout text; stderr is discarded on success.
    /// The session stays open afterwards; callers close it via
    /// [`Session::close`] regardless of the result.
    pub async fn run(&mut self, command: &str) -> Result<String, GatewayError> {
        let mut channel = self.handle.channel_open_session().await.map_err(|e| {
            GatewayError::ConnectionFailed(format!("failed to open channel: {}", e))
        })?;

        channel.exec(true, command).await.map_err(|e| {
            GatewayError::ConnectionFailed(format!("failed to execute command: {}", e))
        })?;

        let mut stdout = Vec::with_capacity(4096);
        let mut stderr = Vec::with_capacity(1024);
        let mut exit: Option<ExitReason> = None;

        loop {
            match channel.wait().await {
                Some(ChannelMsg::Data { data }) => {
                    stdout.extend_from_slice(&data);
                }
                Some(ChannelMsg::ExtendedData { data, ext }) => {
                    // ext == 1 is stderr in SSH protocol
                    if ext == 1 {
                        stderr.extend_from_slice(&data);
                    }
                }
                Some(ChannelMsg::ExitStatus { exit_status }) => {
                    exit = Some(ExitReason::Status(exit_status));
                }
                Some(ChannelMsg::ExitSignal { signal_name, .. }) => {
                    // Remote process killed; resolved like a non-zero exit.
                    exit = Some(ExitReason::Signal(format!("{:?}", signal_name)));
                }
                Some(ChannelMsg::Eof) => {
                    // Continue to wait for exit status if not received yet
                    if exit.is_some() {
                        break;
                    }
                }
                Some(ChannelMsg::Close) => {
                    break;
                }
                Some(_) => {
                    // Ignore other message types
                }
                None => {
                    // Channel closed
                    break;
                }
            }

            if let Some(limit) = self.max_output_bytes
                && stdout.len() + stderr.len() > limit
            {
                warn!(
                    "Command output exceeded {} bytes ({} stdout, {} stderr), abandoning",
                    limit,
                    stdout.len(),
                    stderr.len()
                );
                let _ = channel.close().await;
                return Err(GatewayError::OutputTooLarge { limit });
            }
        }

        let _ = channel.close().await;

        resolve_outcome(&stdout, &stderr, exit.unwrap_or(ExitReason::Unknown))
    }

    /// Close the authenticated connection and, when tunneled, the jump-host
    /// control connection behind it.
    pub async fn close(self) {
        if let Err(e) = self
            .handle
            .disconnect(Disconnect::ByApplication, "", "english")
            .await
        {
            debug!("Error closing target connection: {}", e);
        }
        close_quietly(self.control).await;
    }
}

async fn close_quietly(control: Option<client::Handle<SvcClientHandler>>) {
    if let Some(handle) = control
        && let Err(e) = handle.disconnect(Disconnect::ByApplication, "", "english").await
    {
        debug!("Error closing tunnel control connection: {}", e);
    }
}

/// Map a finished channel's buffers and exit information to the single
/// outcome value the caller sees.
///
/// Status 0 resolves with the trimmed stdout (leading/trailing whitespace
/// removed, internal whitespace preserved). Everything else fails with
/// `CommandFailed` carrying stderr if non-empty, else stdout, annotated
/// with the status or signal.
pub(crate) fn resolve_outcome(
    stdout: &[u8],
    stderr: &[u8],
    exit: ExitReason,
) -> Result<String, GatewayError> {
    if exit == ExitReason::Status(0) {
        return Ok(String::from_utf8_lossy(stdout).trim().to_string());
    }

    let detail = if stderr.is_empty() { stdout } else { stderr };
    Err(GatewayError::CommandFailed {
        status: exit,
        detail: String::from_utf8_lossy(detail).trim().to_string(),
    })
}
