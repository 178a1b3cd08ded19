//! Core tool types for the dispatch surface.
//!
//! Defines the [`Tool`] trait that every action exposed to the agent
//! runtime implements, [`ToolResult`] for bounded output and [`ToolMode`]
//! for read-only versus mutating access.

use serde::{Deserialize, Serialize};

use super::error::ToolError;

/// Default maximum output size (100 KB).
pub const DEFAULT_MAX_BYTES: usize = 100 * 1024;

/// Which class of tools may run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    /// Lookups only: contacts, listings, date/time, train times.
    ReadOnly,
    /// Lookups plus actions with side effects (mail, events, tasks).
    #[default]
    Full,
}

/// Result of a tool execution.
///
/// A failed result (`success == false`) is a normal answer for the agent to
/// relay, not a fault: bad arguments and collaborator outages end up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Output content (bounded).
    pub content: String,
    /// Error message if the tool execution failed.
    pub error: Option<String>,
    /// Whether the output was truncated to fit within max_bytes.
    pub truncated: bool,
}

impl ToolResult {
    /// Create a successful tool result.
    pub fn success(content: String) -> Self {
        Self {
            success: true,
            content,
            error: None,
            truncated: false,
        }
    }

    /// Create a failed tool result with an error message.
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error),
            truncated: false,
        }
    }

    /// Create a successful result, truncating `content` to `max_bytes`.
    pub fn bounded(content: String, max_bytes: usize) -> Self {
        let (content, truncated) = truncate_output(&content, max_bytes);
        Self {
            success: true,
            content,
            error: None,
            truncated,
        }
    }
}

/// Truncate a string to at most `max_bytes`, respecting UTF-8 boundaries.
///
/// Returns `(truncated_string, was_truncated)`.
pub fn truncate_output(s: &str, max_bytes: usize) -> (String, bool) {
    if s.len() <= max_bytes {
        return (s.to_string(), false);
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    let truncated = &s[..end];
    (
        format!("{truncated}\n\n[output truncated at {max_bytes} bytes]"),
        true,
    )
}

/// A named action the agent runtime can invoke.
///
/// All tools must be `Send + Sync`; the host bridge runs them on blocking
/// worker threads.
pub trait Tool: Send + Sync {
    /// Returns the tool name (e.g. "get_contact_info_by_nickname").
    fn name(&self) -> &str;

    /// Returns a description the language model reads to decide when to
    /// call the tool.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's arguments.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] only for faults the caller cannot relay as a
    /// normal answer (e.g. output serialization failures).
    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError>;

    /// Whether this tool is allowed in the given mode.
    fn allowed_in_mode(&self, mode: ToolMode) -> bool;
}

/// Read a required, non-blank string argument.
///
/// Returns the trimmed value, or a failed [`ToolResult`] naming the
/// argument so the model can retry with a proper value.
pub(crate) fn required_str(args: &serde_json::Value, key: &str) -> Result<String, ToolResult> {
    match args.get(key).and_then(|v| v.as_str()) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        _ => Err(ToolResult::failure(format!(
            "{key} is required and cannot be empty"
        ))),
    }
}

/// Read an optional string argument, treating blank values as absent.
pub(crate) fn optional_str(args: &serde_json::Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// Read an optional count argument clamped to `1..=max`.
pub(crate) fn count_arg(args: &serde_json::Value, key: &str, default: usize, max: usize) -> usize {
    args.get(key)
        .and_then(|v| v.as_u64())
        .map(|n| (n as usize).clamp(1, max))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_result_success() {
        let result = ToolResult::success("hello world".to_string());
        assert!(result.success);
        assert_eq!(result.content, "hello world");
        assert!(result.error.is_none());
        assert!(!result.truncated);
    }

    #[test]
    fn tool_result_failure() {
        let result = ToolResult::failure("nickname is required".to_string());
        assert!(!result.success);
        assert!(result.content.is_empty());
        assert_eq!(result.error, Some("nickname is required".to_string()));
    }

    #[test]
    fn bounded_truncates_when_needed() {
        let result = ToolResult::bounded("a".repeat(50), 10);
        assert!(result.success);
        assert!(result.truncated);
        assert!(result.content.starts_with(&"a".repeat(10)));

        let result = ToolResult::bounded("short".to_owned(), 10);
        assert!(!result.truncated);
        assert_eq!(result.content, "short");
    }

    #[test]
    fn truncate_output_respects_utf8_boundary() {
        // 'é' is 2 bytes in UTF-8
        let (output, truncated) = truncate_output("ééééé", 5);
        assert!(truncated);
        assert!(output.starts_with("éé"));
        assert!(output.contains("[output truncated at 5 bytes]"));
    }

    #[test]
    fn truncate_output_exact_boundary() {
        let (output, truncated) = truncate_output("hello", 5);
        assert_eq!(output, "hello");
        assert!(!truncated);
    }

    #[test]
    fn tool_mode_serde_names() {
        let json = serde_json::to_string(&ToolMode::ReadOnly).unwrap_or_default();
        assert_eq!(json, "\"read_only\"");
        assert_eq!(ToolMode::default(), ToolMode::Full);
    }

    #[test]
    fn required_str_trims_and_rejects_blank() {
        let args = serde_json::json!({"nickname": "  seb ", "blank": "  ", "num": 3});
        assert_eq!(required_str(&args, "nickname"), Ok("seb".to_owned()));
        for key in ["blank", "num", "missing"] {
            let err = match required_str(&args, key) {
                Err(r) => r,
                Ok(_) => unreachable!("{key} should be rejected"),
            };
            assert!(!err.success);
            assert!(err.error.as_deref().unwrap_or("").contains(key));
        }
    }

    #[test]
    fn count_arg_clamps() {
        let args = serde_json::json!({"count": 500, "zero": 0});
        assert_eq!(count_arg(&args, "count", 5, 50), 50);
        assert_eq!(count_arg(&args, "zero", 5, 50), 1);
        assert_eq!(count_arg(&args, "missing", 5, 50), 5);
    }

    #[test]
    fn optional_str_drops_blank() {
        let args = serde_json::json!({"notes": " ", "title": "milk"});
        assert_eq!(optional_str(&args, "notes"), None);
        assert_eq!(optional_str(&args, "title"), Some("milk".to_owned()));
    }
}
