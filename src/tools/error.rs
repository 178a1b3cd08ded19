//! Error types for the tool dispatch surface.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) that is
//! included in the Display output and accessible via [`ToolError::code()`].

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// The tool ran but could not produce a result.
    pub const TOOL_FAILED: &str = "TOOL_FAILED";

    /// No tool is registered under the requested name.
    pub const TOOL_UNKNOWN: &str = "TOOL_UNKNOWN";

    /// The tool exists but the current mode does not allow it.
    pub const TOOL_BLOCKED: &str = "TOOL_BLOCKED";
}

/// Faults raised while routing or running a tool.
///
/// The Display impl formats as `[CODE] message`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// The tool ran but could not produce a result.
    #[error("[{}] {}", error_codes::TOOL_FAILED, .0)]
    Execution(String),

    /// No tool is registered under the requested name.
    #[error("[{}] {}", error_codes::TOOL_UNKNOWN, .0)]
    Unknown(String),

    /// The tool exists but the current mode does not allow it.
    #[error("[{}] {}", error_codes::TOOL_BLOCKED, .0)]
    BlockedByMode(String),
}

impl ToolError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Execution(_) => error_codes::TOOL_FAILED,
            Self::Unknown(_) => error_codes::TOOL_UNKNOWN,
            Self::BlockedByMode(_) => error_codes::TOOL_BLOCKED,
        }
    }
}
