//! Maps validated host requests onto the assistant.

use std::sync::Arc;

use crate::assistant::Assistant;
use crate::tools::ToolRegistry;

use super::contract::{CommandName, HostRequest, ResponseEnvelope};

/// Synchronous request handler shared by the bridge's worker threads.
#[derive(Clone)]
pub struct HostHandler {
    registry: Arc<ToolRegistry>,
    instructions: Arc<str>,
}

impl HostHandler {
    /// Create a handler over a wired assistant.
    pub fn new(assistant: &Assistant) -> Self {
        Self::from_parts(assistant.registry(), assistant.instructions())
    }

    /// Create a handler from a registry and instructions text.
    pub fn from_parts(registry: Arc<ToolRegistry>, instructions: String) -> Self {
        Self {
            registry,
            instructions: instructions.into(),
        }
    }

    /// Handle one request.
    ///
    /// A tool that runs and reports a failed [`crate::tools::ToolResult`]
    /// still produces an `ok` envelope; only routing faults (unknown or
    /// blocked tool) produce an error envelope.
    pub fn handle(&self, request_id: &str, request: HostRequest) -> ResponseEnvelope {
        match request {
            HostRequest::Command(command) => self.handle_command(request_id, command),
            HostRequest::ToolCall { name, args } => {
                match self.registry.dispatch(&name, args) {
                    Ok(result) => match serde_json::to_value(&result) {
                        Ok(payload) => ResponseEnvelope::ok(request_id, payload),
                        Err(e) => ResponseEnvelope::error(
                            request_id,
                            format!("failed to serialize tool result: {e}"),
                        ),
                    },
                    Err(e) => {
                        tracing::warn!(tool = %name, code = e.code(), "tool call rejected");
                        ResponseEnvelope::error(request_id, e.to_string())
                    }
                }
            }
        }
    }

    fn handle_command(&self, request_id: &str, command: CommandName) -> ResponseEnvelope {
        tracing::debug!(command = command.as_str(), "host command");
        let payload = match command {
            CommandName::HostPing => serde_json::json!({
                "pong": true,
                "version": env!("CARGO_PKG_VERSION"),
            }),
            CommandName::HostListTools => serde_json::json!({
                "mode": self.registry.mode(),
                "tools": self.registry.schemas_for_api(),
            }),
            CommandName::HostInstructions => serde_json::json!({
                "instructions": &*self.instructions,
            }),
            CommandName::HostShutdown => serde_json::json!({ "shutting_down": true }),
        };
        ResponseEnvelope::ok(request_id, payload)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::config::ZephyrConfig;
    use crate::tools::{NOT_FOUND_MESSAGE, ToolMode};

    fn handler(mode: ToolMode) -> HostHandler {
        let mut config = ZephyrConfig::default();
        config.assistant.tool_mode = mode;
        HostHandler::new(&Assistant::from_config(config).unwrap())
    }

    fn call(h: &HostHandler, tool: &str, args: serde_json::Value) -> ResponseEnvelope {
        h.handle(
            "r1",
            HostRequest::ToolCall {
                name: tool.to_owned(),
                args,
            },
        )
    }

    #[test]
    fn ping_reports_version() {
        let resp =
            handler(ToolMode::Full).handle("p", HostRequest::Command(CommandName::HostPing));
        assert!(resp.ok);
        assert_eq!(resp.payload["pong"], true);
        assert_eq!(resp.request_id, "p");
    }

    #[test]
    fn list_tools_follows_mode() {
        let resp = handler(ToolMode::ReadOnly)
            .handle("l", HostRequest::Command(CommandName::HostListTools));
        assert_eq!(resp.payload["mode"], "read_only");
        let names: Vec<&str> = resp.payload["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert!(names.contains(&"list_nicknames"));
        assert!(!names.contains(&"send_mail"));
    }

    #[test]
    fn instructions_are_returned() {
        let resp = handler(ToolMode::Full)
            .handle("i", HostRequest::Command(CommandName::HostInstructions));
        assert!(resp.payload["instructions"].as_str().unwrap().contains("Zephyr"));
    }

    #[test]
    fn tool_call_returns_result_payload() {
        let h = handler(ToolMode::Full);
        let args = serde_json::json!({"nickname": "seb"});
        let resp = call(&h, "get_contact_info_by_nickname", args);
        assert!(resp.ok);
        assert_eq!(resp.payload["success"], true);
        let contact: serde_json::Value =
            serde_json::from_str(resp.payload["content"].as_str().unwrap()).unwrap();
        assert_eq!(contact["id"], "003");
    }

    #[test]
    fn not_found_is_ok_envelope() {
        let h = handler(ToolMode::Full);
        let args = serde_json::json!({"nickname": "xyz123"});
        let resp = call(&h, "get_contact_info_by_nickname", args);
        assert!(resp.ok);
        assert_eq!(resp.payload["content"], NOT_FOUND_MESSAGE);
    }

    #[test]
    fn unconfigured_mail_is_failed_result_not_error() {
        let h = handler(ToolMode::Full);
        let resp = call(&h, "list_unread_mail", serde_json::json!({}));
        assert!(resp.ok);
        assert_eq!(resp.payload["success"], false);
    }

    #[test]
    fn unknown_tool_is_error_envelope() {
        let h = handler(ToolMode::Full);
        let resp = call(&h, "lookup_weather", serde_json::json!({}));
        assert!(!resp.ok);
        assert!(resp.error.unwrap().starts_with("[TOOL_UNKNOWN]"));
    }

    #[test]
    fn blocked_tool_is_error_envelope() {
        let h = handler(ToolMode::ReadOnly);
        let resp = call(&h, "send_mail", serde_json::json!({}));
        assert!(!resp.ok);
        assert!(resp.error.unwrap().starts_with("[TOOL_BLOCKED]"));
    }
}
