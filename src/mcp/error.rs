//! Error taxonomy for the SSH command gateway.
//!
//! Every failure a tool call can hit maps to exactly one variant here, so the
//! MCP layer can surface a single textual error with no ambiguity about which
//! stage failed. No variant is retried; each call is a single attempt, and
//! the only local recovery performed anywhere is resource cleanup (closing
//! sockets and sessions) before the error propagates.

use thiserror::Error;

/// Failures surfaced by the tunnel establisher and command executor.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required target configuration is missing or contradictory.
    /// Raised at config load, before any network activity.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// A jump host is configured but neither a proxy password nor a proxy
    /// private key is resolvable.
    #[error("proxy authentication required: provide either SVC_PROXY_PASSWORD or SVC_PROXY_PRIVATE_KEY_PATH")]
    ProxyAuthMissing,

    /// A configured private-key file could not be read or parsed.
    #[error("failed to read private key {path}: {detail}")]
    KeyReadFailed { path: String, detail: String },

    /// The proxy control connection or tunneling handshake failed before a
    /// transport to the target could be handed over.
    #[error("tunnel establishment failed: {0}")]
    TunnelEstablishFailed(String),

    /// Target connect/auth did not complete within the allotted window.
    #[error("authentication to {host}:{port} timed out after {secs}s")]
    AuthTimeout { host: String, port: u16, secs: u64 },

    /// The target rejected our credentials, or the transport errored before
    /// a command could run.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The remote process exited non-zero or was killed by a signal.
    /// `detail` carries stderr if non-empty, else stdout.
    #[error("command failed with {status}: {detail}")]
    CommandFailed { status: ExitReason, detail: String },

    /// Combined stdout/stderr exceeded the configured cap. Only raised when
    /// `SVC_MAX_OUTPUT_BYTES` is set; the default is unbounded.
    #[error("command output exceeded {limit} bytes")]
    OutputTooLarge { limit: usize },
}

/// How the remote process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// Numeric exit status reported by the remote process.
    Status(u32),
    /// The remote process was terminated by a signal; carries the signal
    /// name as reported by the server.
    Signal(String),
    /// The channel closed without reporting any exit information.
    Unknown,
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitReason::Status(code) => write!(f, "exit status {}", code),
            ExitReason::Signal(name) => write!(f, "signal {}", name),
            ExitReason::Unknown => write!(f, "no exit status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message_carries_status_and_detail() {
        let err = GatewayError::CommandFailed {
            status: ExitReason::Status(1),
            detail: "bad arg".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit status 1"));
        assert!(msg.contains("bad arg"));
    }

    #[test]
    fn test_command_failed_with_empty_detail_still_reports_status() {
        let err = GatewayError::CommandFailed {
            status: ExitReason::Status(1),
            detail: String::new(),
        };
        assert!(err.to_string().contains("exit status 1"));
    }

    #[test]
    fn test_signal_exit_reason_display() {
        let reason = ExitReason::Signal("KILL".to_string());
        assert_eq!(reason.to_string(), "signal KILL");
    }

    #[test]
    fn test_tunnel_establish_failed_carries_status_line() {
        let err = GatewayError::TunnelEstablishFailed(
            "proxy returned HTTP/1.1 407 Proxy Authentication Required".to_string(),
        );
        assert!(err.to_string().contains("407"));
    }

    #[test]
    fn test_auth_timeout_mentions_window() {
        let err = GatewayError::AuthTimeout {
            host: "10.0.0.1".to_string(),
            port: 22,
            secs: 20,
        };
        assert!(err.to_string().contains("20s"));
        assert!(err.to_string().contains("10.0.0.1:22"));
    }

    #[test]
    fn test_output_too_large_mentions_limit() {
        let err = GatewayError::OutputTooLarge { limit: 4096 };
        assert!(err.to_string().contains("4096"));
    }
}
