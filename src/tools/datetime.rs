//! Current date and time for relative scheduling ("tomorrow at 7").

use chrono::{DateTime, Local, SecondsFormat};

use super::error::ToolError;
use super::types::{Tool, ToolMode, ToolResult};

/// Read-only tool returning the local time as an ISO-8601 timestamp.
pub struct CurrentDateTimeTool {
    fixed: Option<DateTime<Local>>,
}

impl CurrentDateTimeTool {
    /// Create a tool that reads the system clock.
    pub fn new() -> Self {
        Self { fixed: None }
    }

    /// Create a tool that always reports `now`.
    pub fn fixed(now: DateTime<Local>) -> Self {
        Self { fixed: Some(now) }
    }
}

impl Default for CurrentDateTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for CurrentDateTimeTool {
    fn name(&self) -> &str {
        "get_current_datetime"
    }

    fn description(&self) -> &str {
        "Use this tool to get the current date and time, e.g. before scheduling \
         an event relative to today."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let now = self.fixed.unwrap_or_else(Local::now);
        Ok(ToolResult::success(
            now.to_rfc3339_opts(SecondsFormat::Secs, false),
        ))
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}
