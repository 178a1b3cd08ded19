//! Next-train lookup through a remote MCP server.
//!
//! [`NextTrainTool`] delegates to a [`TrainService`]. The production
//! implementation, [`McpTrainService`], speaks JSON-RPC 2.0 over the MCP
//! streamable-HTTP transport: `initialize`, `notifications/initialized`, then
//! one `tools/call`. Responses may come back as plain JSON or as an SSE
//! stream of `data:` lines; both are accepted.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;

use super::error::ToolError;
use super::service::ServiceError;
use super::types::{DEFAULT_MAX_BYTES, Tool, ToolMode, ToolResult, required_str};

/// Default MCP endpoint of the train-lookup server.
pub const DEFAULT_TRAIN_ENDPOINT: &str = "http://localhost:8000/mcp";

/// Name of the remote tool invoked on the MCP server.
const REMOTE_TOOL: &str = "get_next_train_time";

const PROTOCOL_VERSION: &str = "2025-03-26";
const SESSION_HEADER: &str = "Mcp-Session-Id";

/// Train timetable abstraction.
pub trait TrainService: Send + Sync {
    /// Describe the next departure from `origin` to `destination`.
    fn next_train(&self, origin: &str, destination: &str) -> Result<String, ServiceError>;
}

// ─── McpTrainService ─────────────────────────────────────────────────────────

/// [`TrainService`] backed by an MCP server over HTTP.
pub struct McpTrainService {
    endpoint: String,
    agent: ureq::Agent,
    next_id: AtomicU64,
}

impl McpTrainService {
    /// Create a client for `endpoint` with the given request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            endpoint: endpoint.into(),
            agent,
            next_id: AtomicU64::new(1),
        }
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(&self, session: Option<&str>, body: &Value) -> Result<ureq::Response, ServiceError> {
        let body_str = serde_json::to_string(body)
            .map_err(|e| ServiceError::Backend(format!("failed to encode request: {e}")))?;
        let mut request = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json, text/event-stream");
        if let Some(id) = session {
            request = request.set(SESSION_HEADER, id);
        }
        request
            .send_string(&body_str)
            .map_err(|e| ServiceError::Backend(format!("train server request failed: {e}")))
    }

    fn rpc(
        &self,
        session: Option<&str>,
        method: &str,
        params: Value,
    ) -> Result<(Value, Option<String>), ServiceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response = self.post(session, &body)?;
        let session_id = response.header(SESSION_HEADER).map(str::to_owned);
        let content_type = response.content_type().to_owned();
        let text = response
            .into_string()
            .map_err(|e| ServiceError::Backend(format!("failed to read train server reply: {e}")))?;
        let message = parse_rpc_message(&content_type, &text)?;
        Ok((message, session_id))
    }
}

impl TrainService for McpTrainService {
    fn next_train(&self, origin: &str, destination: &str) -> Result<String, ServiceError> {
        let (_, session) = self.rpc(
            None,
            "initialize",
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": { "name": "zephyr", "version": env!("CARGO_PKG_VERSION") }
            }),
        )?;

        self.post(
            session.as_deref(),
            &serde_json::json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        )?;

        let (message, _) = self.rpc(
            session.as_deref(),
            "tools/call",
            serde_json::json!({
                "name": REMOTE_TOOL,
                "arguments": { "origin": origin, "destination": destination }
            }),
        )?;
        tool_call_text(&message)
    }
}

/// Extract the JSON-RPC message from a response body.
///
/// `text/event-stream` bodies are scanned for the last `data:` line holding a
/// JSON object; anything else is parsed as JSON directly.
pub fn parse_rpc_message(content_type: &str, body: &str) -> Result<Value, ServiceError> {
    let raw = if content_type.starts_with("text/event-stream") {
        body.lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(str::trim)
            .filter(|data| data.starts_with('{'))
            .last()
            .ok_or_else(|| ServiceError::Backend("train server sent no data event".to_owned()))?
    } else {
        body.trim()
    };
    let message: Value = serde_json::from_str(raw)
        .map_err(|e| ServiceError::Backend(format!("invalid train server reply: {e}")))?;

    if let Some(err) = message.get("error") {
        let msg = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(ServiceError::Backend(format!("train server error: {msg}")));
    }
    Ok(message)
}

/// Join the text content items of a `tools/call` result.
pub fn tool_call_text(message: &Value) -> Result<String, ServiceError> {
    let result = message
        .get("result")
        .ok_or_else(|| ServiceError::Backend("train server reply has no result".to_owned()))?;

    let text: Vec<&str> = result
        .get("content")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|item| item.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if result.get("isError").and_then(Value::as_bool) == Some(true) {
        return Err(ServiceError::Backend(text.join("\n")));
    }
    if text.is_empty() {
        return Err(ServiceError::Backend(
            "train server returned no text content".to_owned(),
        ));
    }
    Ok(text.join("\n"))
}

// ─── NextTrainTool ───────────────────────────────────────────────────────────

/// Read-only tool returning the next train between two stations.
///
/// # Arguments (JSON)
///
/// - `origin` (string, required)
/// - `destination` (string, required)
pub struct NextTrainTool {
    service: Arc<dyn TrainService>,
}

impl NextTrainTool {
    /// Create a new `NextTrainTool` backed by `service`.
    pub fn new(service: Arc<dyn TrainService>) -> Self {
        Self { service }
    }
}

impl Tool for NextTrainTool {
    fn name(&self) -> &str {
        "get_next_train_time"
    }

    fn description(&self) -> &str {
        "Use this tool to get the next train departure between two stations."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["origin", "destination"],
            "properties": {
                "origin": { "type": "string", "description": "Departure station" },
                "destination": { "type": "string", "description": "Arrival station" }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let (origin, destination) = match (
            required_str(&args, "origin"),
            required_str(&args, "destination"),
        ) {
            (Ok(o), Ok(d)) => (o, d),
            (Err(failure), _) | (_, Err(failure)) => return Ok(failure),
        };

        tracing::info!(%origin, %destination, "looking up next train");
        match self.service.next_train(&origin, &destination) {
            Ok(text) => Ok(ToolResult::bounded(text, DEFAULT_MAX_BYTES)),
            Err(e) => {
                tracing::warn!(error = %e, "train lookup failed");
                Ok(ToolResult::failure(format!("failed to get train time: {e}")))
            }
        }
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::tools::mock_services::MockTrainService;

    #[test]
    fn parses_plain_json_reply() {
        let body = r#"{"jsonrpc":"2.0","id":2,"result":{"content":[{"type":"text","text":"18:04 from Lyon"}]}}"#;
        let message = parse_rpc_message("application/json", body).unwrap();
        assert_eq!(tool_call_text(&message).unwrap(), "18:04 from Lyon");
    }

    #[test]
    fn parses_sse_reply() {
        let body = "event: message\n\
                    data: {\"jsonrpc\":\"2.0\",\"id\":2,\"result\":{\"content\":[\
                    {\"type\":\"text\",\"text\":\"line one\"},\
                    {\"type\":\"image\",\"data\":\"...\"},\
                    {\"type\":\"text\",\"text\":\"line two\"}]}}\n\n";
        let message = parse_rpc_message("text/event-stream; charset=utf-8", body).unwrap();
        assert_eq!(tool_call_text(&message).unwrap(), "line one\nline two");
    }

    #[test]
    fn sse_without_data_is_error() {
        let err = parse_rpc_message("text/event-stream", "event: ping\n\n").unwrap_err();
        assert!(matches!(err, ServiceError::Backend(_)));
    }

    #[test]
    fn rpc_error_is_surfaced() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"no such tool"}}"#;
        let err = parse_rpc_message("application/json", body).unwrap_err();
        assert!(err.to_string().contains("no such tool"));
    }

    #[test]
    fn tool_level_error_is_surfaced() {
        let message = serde_json::json!({
            "result": {"isError": true, "content": [{"type": "text", "text": "unknown station"}]}
        });
        let err = tool_call_text(&message).unwrap_err();
        assert!(err.to_string().contains("unknown station"));
    }

    #[test]
    fn tool_forwards_stations() {
        let service = Arc::new(MockTrainService::new("Next train at 18:04"));
        let tool = NextTrainTool::new(service.clone());
        let result = tool
            .execute(serde_json::json!({"origin": "Paris", "destination": "Lyon"}))
            .unwrap();
        assert!(result.success);
        assert_eq!(result.content, "Next train at 18:04");
        assert_eq!(
            service.queries(),
            vec![("Paris".to_owned(), "Lyon".to_owned())]
        );
    }

    #[test]
    fn tool_requires_destination() {
        let tool = NextTrainTool::new(Arc::new(MockTrainService::new("x")));
        let result = tool.execute(serde_json::json!({"origin": "Paris"})).unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("destination"));
    }

    #[test]
    fn default_endpoint_is_local() {
        let service = McpTrainService::new(DEFAULT_TRAIN_ENDPOINT, Duration::from_secs(1));
        assert_eq!(service.endpoint(), "http://localhost:8000/mcp");
    }
}
