//! Task-list tools backed by a [`TaskService`].
//!
//! - [`ListTaskListsTool`] — every task list (read-only)
//! - [`ListTasksTool`] — tasks in one list (read-only)
//! - [`CreateTaskTool`] — add a task (write)
//! - [`UpdateTaskTool`] — rename or re-note a task (write)
//! - [`DeleteTaskTool`] — remove a task (write)
//!
//! Write tools require `ToolMode::Full`.

use std::sync::Arc;

use super::error::ToolError;
use super::service::ServiceError;
use super::types::{Tool, ToolMode, ToolResult, optional_str, required_str};

/// Page size used when listing lists or tasks.
pub const MAX_TASK_RESULTS: usize = 10;

/// A named task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    /// Provider identifier.
    pub id: String,
    /// Display title.
    pub title: String,
}

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Provider identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Whether the task is completed.
    pub completed: bool,
}

impl Task {
    /// Format the task as one line for the model.
    pub fn format_summary(&self) -> String {
        let status = if self.completed { "x" } else { " " };
        match &self.notes {
            Some(notes) => format!("[{status}] {} ({notes}) [id: {}]", self.title, self.id),
            None => format!("[{status}] {} [id: {}]", self.title, self.id),
        }
    }
}

/// Title and notes for a created or updated task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Optional notes.
    pub notes: Option<String>,
}

/// Task provider abstraction.
pub trait TaskService: Send + Sync {
    /// Return up to `limit` task lists.
    fn lists(&self, limit: usize) -> Result<Vec<TaskList>, ServiceError>;

    /// Return up to `limit` tasks in `list_id`.
    fn tasks(&self, list_id: &str, limit: usize) -> Result<Vec<Task>, ServiceError>;

    /// Create a task in `list_id`.
    fn create(&self, list_id: &str, draft: &TaskDraft) -> Result<Task, ServiceError>;

    /// Replace title and notes of `task_id`.
    fn update(&self, list_id: &str, task_id: &str, draft: &TaskDraft) -> Result<Task, ServiceError>;

    /// Delete `task_id`.
    fn delete(&self, list_id: &str, task_id: &str) -> Result<(), ServiceError>;
}

fn service_failure(action: &str, err: ServiceError) -> ToolResult {
    tracing::warn!(error = %err, action, "task service call failed");
    ToolResult::failure(format!("failed to {action}: {err}"))
}

fn draft_from(args: &serde_json::Value) -> Result<TaskDraft, ToolResult> {
    Ok(TaskDraft {
        title: required_str(args, "title")?,
        notes: optional_str(args, "notes"),
    })
}

fn list_id_property() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": "Identifier of the task list (see list_task_lists)"
    })
}

// ─── ListTaskListsTool ───────────────────────────────────────────────────────

/// Read-only tool listing task lists.
pub struct ListTaskListsTool {
    service: Arc<dyn TaskService>,
}

impl ListTaskListsTool {
    /// Create a new `ListTaskListsTool` backed by `service`.
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self { service }
    }
}

impl Tool for ListTaskListsTool {
    fn name(&self) -> &str {
        "list_task_lists"
    }

    fn description(&self) -> &str {
        "Use this tool to list all task lists and their identifiers."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let lists = match self.service.lists(MAX_TASK_RESULTS) {
            Ok(l) => l,
            Err(e) => return Ok(service_failure("list task lists", e)),
        };
        if lists.is_empty() {
            return Ok(ToolResult::success("No task lists found.".to_owned()));
        }
        let lines: Vec<String> = lists
            .iter()
            .map(|l| format!("{} [id: {}]", l.title, l.id))
            .collect();
        Ok(ToolResult::success(lines.join("\n")))
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}

// ─── ListTasksTool ───────────────────────────────────────────────────────────

/// Read-only tool listing tasks of one list.
///
/// # Arguments (JSON)
///
/// - `task_list_id` (string, required)
pub struct ListTasksTool {
    service: Arc<dyn TaskService>,
}

impl ListTasksTool {
    /// Create a new `ListTasksTool` backed by `service`.
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self { service }
    }
}

impl Tool for ListTasksTool {
    fn name(&self) -> &str {
        "list_tasks"
    }

    fn description(&self) -> &str {
        "Use this tool to list the tasks of a task list."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["task_list_id"],
            "properties": { "task_list_id": list_id_property() }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let list_id = match required_str(&args, "task_list_id") {
            Ok(id) => id,
            Err(failure) => return Ok(failure),
        };
        let tasks = match self.service.tasks(&list_id, MAX_TASK_RESULTS) {
            Ok(t) => t,
            Err(e) => return Ok(service_failure("list tasks", e)),
        };
        if tasks.is_empty() {
            return Ok(ToolResult::success("No tasks in this list.".to_owned()));
        }
        let lines: Vec<String> = tasks.iter().map(Task::format_summary).collect();
        Ok(ToolResult::success(lines.join("\n")))
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}

// ─── CreateTaskTool ──────────────────────────────────────────────────────────

/// Write tool adding a task.
///
/// # Arguments (JSON)
///
/// - `task_list_id` (string, required)
/// - `title` (string, required)
/// - `notes` (string, optional)
pub struct CreateTaskTool {
    service: Arc<dyn TaskService>,
}

impl CreateTaskTool {
    /// Create a new `CreateTaskTool` backed by `service`.
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self { service }
    }
}

impl Tool for CreateTaskTool {
    fn name(&self) -> &str {
        "create_task"
    }

    fn description(&self) -> &str {
        "Use this tool to create a new task in a task list."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["task_list_id", "title"],
            "properties": {
                "task_list_id": list_id_property(),
                "title": { "type": "string", "description": "Title of the task" },
                "notes": { "type": "string", "description": "Optional notes" }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let (list_id, draft) = match (required_str(&args, "task_list_id"), draft_from(&args)) {
            (Ok(id), Ok(d)) => (id, d),
            (Err(failure), _) | (_, Err(failure)) => return Ok(failure),
        };
        match self.service.create(&list_id, &draft) {
            Ok(task) => Ok(ToolResult::success(format!(
                "Task created: {}",
                task.format_summary()
            ))),
            Err(e) => Ok(service_failure("create task", e)),
        }
    }

    fn allowed_in_mode(&self, mode: ToolMode) -> bool {
        matches!(mode, ToolMode::Full)
    }
}

// ─── UpdateTaskTool ──────────────────────────────────────────────────────────

/// Write tool replacing a task's title and notes.
///
/// # Arguments (JSON)
///
/// - `task_list_id`, `task_id`, `title` (string, required)
/// - `notes` (string, optional)
pub struct UpdateTaskTool {
    service: Arc<dyn TaskService>,
}

impl UpdateTaskTool {
    /// Create a new `UpdateTaskTool` backed by `service`.
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self { service }
    }
}

impl Tool for UpdateTaskTool {
    fn name(&self) -> &str {
        "update_task"
    }

    fn description(&self) -> &str {
        "Use this tool to update the title or notes of an existing task."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["task_list_id", "task_id", "title"],
            "properties": {
                "task_list_id": list_id_property(),
                "task_id": { "type": "string", "description": "Identifier of the task" },
                "title": { "type": "string", "description": "New title" },
                "notes": { "type": "string", "description": "New notes" }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let (list_id, task_id, draft) = match (
            required_str(&args, "task_list_id"),
            required_str(&args, "task_id"),
            draft_from(&args),
        ) {
            (Ok(l), Ok(t), Ok(d)) => (l, t, d),
            (Err(failure), _, _) | (_, Err(failure), _) | (_, _, Err(failure)) => {
                return Ok(failure);
            }
        };
        match self.service.update(&list_id, &task_id, &draft) {
            Ok(task) => Ok(ToolResult::success(format!(
                "Task updated: {}",
                task.format_summary()
            ))),
            Err(e) => Ok(service_failure("update task", e)),
        }
    }

    fn allowed_in_mode(&self, mode: ToolMode) -> bool {
        matches!(mode, ToolMode::Full)
    }
}

// ─── DeleteTaskTool ──────────────────────────────────────────────────────────

/// Write tool removing a task.
///
/// # Arguments (JSON)
///
/// - `task_list_id`, `task_id` (string, required)
pub struct DeleteTaskTool {
    service: Arc<dyn TaskService>,
}

impl DeleteTaskTool {
    /// Create a new `DeleteTaskTool` backed by `service`.
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self { service }
    }
}

impl Tool for DeleteTaskTool {
    fn name(&self) -> &str {
        "delete_task"
    }

    fn description(&self) -> &str {
        "Use this tool to delete a task from a task list."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["task_list_id", "task_id"],
            "properties": {
                "task_list_id": list_id_property(),
                "task_id": { "type": "string", "description": "Identifier of the task" }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let (list_id, task_id) = match (
            required_str(&args, "task_list_id"),
            required_str(&args, "task_id"),
        ) {
            (Ok(l), Ok(t)) => (l, t),
            (Err(failure), _) | (_, Err(failure)) => return Ok(failure),
        };
        match self.service.delete(&list_id, &task_id) {
            Ok(()) => Ok(ToolResult::success(format!("Task {task_id} deleted."))),
            Err(e) => Ok(service_failure("delete task", e)),
        }
    }

    fn allowed_in_mode(&self, mode: ToolMode) -> bool {
        matches!(mode, ToolMode::Full)
    }
}
