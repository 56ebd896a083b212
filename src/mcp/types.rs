//! Serializable response types for the MCP tool surface.
//!
//! All types implement `Serialize`, `Deserialize`, and `JsonSchema` for
//! MCP protocol compatibility.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response from a successfully executed controller command.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SvcCommandResponse {
    /// The CLI command that was executed
    pub command: String,
    /// Trimmed standard output of the remote command
    pub output: String,
    /// When the command completed (RFC3339 format)
    pub executed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_round_trips_through_json() {
        let response = SvcCommandResponse {
            command: "lssystem".to_string(),
            output: "id 0000020061C04E2C".to_string(),
            executed_at: "2024-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        let parsed: SvcCommandResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.command, "lssystem");
        assert_eq!(parsed.output, "id 0000020061C04E2C");
    }
}
