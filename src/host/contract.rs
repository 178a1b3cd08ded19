//! Versioned request/response envelopes for the host bridge.
//!
//! A request carries either a control `command` or a `tool` name with
//! `args`, never both.

use serde::{Deserialize, Serialize};

/// Contract version for host envelopes.
pub const EVENT_VERSION: u32 = 1;

/// Control commands understood by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandName {
    #[serde(rename = "host.ping")]
    HostPing,
    #[serde(rename = "host.list_tools")]
    HostListTools,
    #[serde(rename = "host.instructions")]
    HostInstructions,
    #[serde(rename = "host.shutdown")]
    HostShutdown,
}

impl CommandName {
    /// Render command name to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HostPing => "host.ping",
            Self::HostListTools => "host.list_tools",
            Self::HostInstructions => "host.instructions",
            Self::HostShutdown => "host.shutdown",
        }
    }

    /// Parse a command name from wire format.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "host.ping" => Some(Self::HostPing),
            "host.list_tools" => Some(Self::HostListTools),
            "host.instructions" => Some(Self::HostInstructions),
            "host.shutdown" => Some(Self::HostShutdown),
            _ => None,
        }
    }
}

/// A validated request.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    /// A control command.
    Command(CommandName),
    /// A tool invocation.
    ToolCall {
        /// Registered tool name.
        name: String,
        /// JSON arguments, `{}` when omitted.
        args: serde_json::Value,
    },
}

/// A versioned request envelope from the agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub v: u32,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub args: serde_json::Value,
}

impl RequestEnvelope {
    /// Build a v1 control-command envelope.
    #[must_use]
    pub fn command(request_id: impl Into<String>, command: CommandName) -> Self {
        Self {
            v: EVENT_VERSION,
            request_id: request_id.into(),
            command: Some(command.as_str().to_owned()),
            tool: None,
            args: serde_json::Value::Null,
        }
    }

    /// Build a v1 tool-call envelope.
    #[must_use]
    pub fn tool_call(
        request_id: impl Into<String>,
        tool: impl Into<String>,
        args: serde_json::Value,
    ) -> Self {
        Self {
            v: EVENT_VERSION,
            request_id: request_id.into(),
            command: None,
            tool: Some(tool.into()),
            args,
        }
    }

    /// Validate the envelope and classify it.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractError`] for a wrong version, a blank request id,
    /// an unknown command, or an envelope naming both or neither of
    /// `command` and `tool`.
    pub fn validate(&self) -> Result<HostRequest, ContractError> {
        if self.v != EVENT_VERSION {
            return Err(ContractError::new(
                ContractErrorKind::UnsupportedVersion,
                format!(
                    "unsupported contract version {}; expected {}",
                    self.v, EVENT_VERSION
                ),
            ));
        }
        if self.request_id.trim().is_empty() {
            return Err(ContractError::new(
                ContractErrorKind::InvalidEnvelope,
                "request_id cannot be empty".to_owned(),
            ));
        }

        match (self.command.as_deref(), self.tool.as_deref()) {
            (Some(raw), None) => CommandName::parse(raw).map(HostRequest::Command).ok_or_else(|| {
                ContractError::new(
                    ContractErrorKind::UnknownCommand,
                    format!("unknown command \"{raw}\""),
                )
            }),
            (None, Some(name)) if !name.trim().is_empty() => Ok(HostRequest::ToolCall {
                name: name.to_owned(),
                args: match &self.args {
                    serde_json::Value::Null => serde_json::json!({}),
                    args => args.clone(),
                },
            }),
            (None, Some(_)) => Err(ContractError::new(
                ContractErrorKind::InvalidEnvelope,
                "tool cannot be empty".to_owned(),
            )),
            (Some(_), Some(_)) => Err(ContractError::new(
                ContractErrorKind::InvalidEnvelope,
                "envelope must carry either command or tool, not both".to_owned(),
            )),
            (None, None) => Err(ContractError::new(
                ContractErrorKind::InvalidEnvelope,
                "envelope must carry a command or a tool".to_owned(),
            )),
        }
    }
}

/// A versioned response envelope from the bridge to the agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub v: u32,
    pub request_id: String,
    pub ok: bool,
    pub payload: serde_json::Value,
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Build a successful response envelope.
    #[must_use]
    pub fn ok(request_id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            v: EVENT_VERSION,
            request_id: request_id.into(),
            ok: true,
            payload,
            error: None,
        }
    }

    /// Build an error response envelope.
    #[must_use]
    pub fn error(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            v: EVENT_VERSION,
            request_id: request_id.into(),
            ok: false,
            payload: serde_json::Value::Null,
            error: Some(message.into()),
        }
    }
}

/// Contract validation error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractErrorKind {
    UnsupportedVersion,
    InvalidEnvelope,
    UnknownCommand,
}

/// Contract validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct ContractError {
    pub kind: ContractErrorKind,
    pub message: String,
}

impl ContractError {
    #[must_use]
    pub fn new(kind: ContractErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}
