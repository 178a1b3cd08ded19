//! Error types for the Zephyr assistant.

use crate::contacts::{DirectoryError, ResolveError};
use crate::tools::ToolError;

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum ZephyrError {
    /// Configuration could not be parsed, serialized or validated.
    #[error("config error: {0}")]
    Config(String),

    /// The contact directory violates its invariants.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// A resolution request broke the resolver's contract.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// A tool call could not be routed or validated.
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    /// Host bridge protocol or channel error.
    #[error("host error: {0}")]
    Host(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ZephyrError>;
