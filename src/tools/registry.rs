//! Tool registry with mode-based gating.
//!
//! The [`ToolRegistry`] holds registered tools, provides lookup by name,
//! enforces mode permissions, dispatches calls and exports JSON schemas
//! for the agent runtime.

use std::collections::HashMap;
use std::sync::Arc;

use super::error::ToolError;
use super::types::{Tool, ToolMode, ToolResult};

/// Registry of available tools with mode-based access control.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    mode: ToolMode,
}

impl ToolRegistry {
    /// Create a new empty registry with the given mode.
    pub fn new(mode: ToolMode) -> Self {
        Self {
            tools: HashMap::new(),
            mode,
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name, respecting mode gating.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .get(name)
            .filter(|t| t.allowed_in_mode(self.mode))
            .cloned()
    }

    /// Run the named tool with `args`.
    ///
    /// # Errors
    ///
    /// - [`ToolError::Unknown`] when nothing is registered under `name`
    /// - [`ToolError::BlockedByMode`] when the current mode forbids it
    /// - whatever the tool itself returns
    pub fn dispatch(&self, name: &str, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let Some(tool) = self.tools.get(name) else {
            return Err(ToolError::Unknown(format!("no tool named \"{name}\"")));
        };
        if !tool.allowed_in_mode(self.mode) {
            return Err(ToolError::BlockedByMode(format!(
                "{name} is not allowed in {:?} mode",
                self.mode
            )));
        }
        tracing::debug!(tool = name, "dispatching tool call");
        tool.execute(args)
    }

    /// List names of all tools available in the current mode.
    pub fn list_available(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tools
            .values()
            .filter(|t| t.allowed_in_mode(self.mode))
            .map(|t| t.name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Export JSON schemas for all available tools.
    ///
    /// Each entry contains `name`, `description`, and `parameters`.
    pub fn schemas_for_api(&self) -> Vec<serde_json::Value> {
        let mut schemas: Vec<(String, serde_json::Value)> = self
            .tools
            .values()
            .filter(|t| t.allowed_in_mode(self.mode))
            .map(|t| {
                let entry = serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "parameters": t.schema(),
                });
                (t.name().to_string(), entry)
            })
            .collect();
        schemas.sort_by(|a, b| a.0.cmp(&b.0));
        schemas.into_iter().map(|(_, v)| v).collect()
    }

    /// Change the active tool mode.
    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    /// Returns the current tool mode.
    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Check if a tool exists in the registry (regardless of mode).
    pub fn exists(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Check if a tool is registered but blocked by the current mode.
    pub fn is_blocked_by_mode(&self, name: &str) -> bool {
        self.tools
            .get(name)
            .map(|t| !t.allowed_in_mode(self.mode))
            .unwrap_or(false)
    }
}
