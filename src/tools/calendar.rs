//! Calendar tools backed by a [`CalendarService`].
//!
//! - [`ScheduleEventTool`] — create an event (write, requires `ToolMode::Full`)
//! - [`UpcomingEventsTool`] — next N events from now (read-only)

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::error::ToolError;
use super::service::ServiceError;
use super::types::{Tool, ToolMode, ToolResult, count_arg, optional_str, required_str};

/// Format accepted for `start_time` / `end_time`.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Timezone used when the caller does not name one.
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";

const DEFAULT_UPCOMING_COUNT: usize = 2;
const MAX_UPCOMING_COUNT: usize = 10;

/// An event to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Event title.
    pub summary: String,
    /// Free-form description (may be empty).
    pub description: String,
    /// Wall-clock start in `timezone`.
    pub start: NaiveDateTime,
    /// Wall-clock end in `timezone`; always after `start`.
    pub end: NaiveDateTime,
    /// IANA timezone name.
    pub timezone: String,
}

/// A scheduled event as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Provider event identifier.
    pub id: String,
    /// Event title.
    pub summary: String,
    /// Start time as the provider reports it.
    pub start: String,
    /// Optional link to the event.
    pub link: Option<String>,
}

impl CalendarEvent {
    /// Format the event as one line for the model.
    pub fn format_summary(&self) -> String {
        match &self.link {
            Some(link) => format!("{} at {} ({link})", self.summary, self.start),
            None => format!("{} at {}", self.summary, self.start),
        }
    }
}

/// Calendar provider abstraction.
pub trait CalendarService: Send + Sync {
    /// Create `event` and return the created record.
    fn schedule(&self, event: &NewEvent) -> Result<CalendarEvent, ServiceError>;

    /// Return up to `count` events starting from now, soonest first.
    fn upcoming(&self, count: usize) -> Result<Vec<CalendarEvent>, ServiceError>;
}

fn parse_event_time(key: &str, raw: &str) -> Result<NaiveDateTime, ToolResult> {
    NaiveDateTime::parse_from_str(raw, EVENT_TIME_FORMAT).map_err(|_| {
        ToolResult::failure(format!(
            "{key} must be formatted as YYYY-MM-DDTHH:MM:SS, got \"{raw}\""
        ))
    })
}

fn parse_new_event(args: &serde_json::Value) -> Result<NewEvent, ToolResult> {
    let summary = required_str(args, "summary")?;
    let start = parse_event_time("start_time", &required_str(args, "start_time")?)?;
    let end = parse_event_time("end_time", &required_str(args, "end_time")?)?;
    if end <= start {
        return Err(ToolResult::failure(
            "end_time must be after start_time".to_owned(),
        ));
    }
    Ok(NewEvent {
        summary,
        description: optional_str(args, "description").unwrap_or_default(),
        start,
        end,
        timezone: optional_str(args, "timezone").unwrap_or_else(|| DEFAULT_TIMEZONE.to_owned()),
    })
}

// ─── ScheduleEventTool ───────────────────────────────────────────────────────

/// Write tool that schedules a calendar event.
///
/// # Arguments (JSON)
///
/// - `summary` (string, required)
/// - `description` (string, optional)
/// - `start_time` / `end_time` (string, required) — `YYYY-MM-DDTHH:MM:SS`
/// - `timezone` (string, optional) — defaults to `Europe/Paris`
pub struct ScheduleEventTool {
    service: Arc<dyn CalendarService>,
}

impl ScheduleEventTool {
    /// Create a new `ScheduleEventTool` backed by `service`.
    pub fn new(service: Arc<dyn CalendarService>) -> Self {
        Self { service }
    }
}

impl Tool for ScheduleEventTool {
    fn name(&self) -> &str {
        "schedule_calendar_event"
    }

    fn description(&self) -> &str {
        "Use this tool to schedule an event in the calendar. Use \
         get_current_datetime first if the user gives a relative date."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["summary", "start_time", "end_time"],
            "properties": {
                "summary": { "type": "string", "description": "Title of the event" },
                "description": { "type": "string", "description": "Details of the event" },
                "start_time": {
                    "type": "string",
                    "description": "Start time formatted as YYYY-MM-DDTHH:MM:SS"
                },
                "end_time": {
                    "type": "string",
                    "description": "End time formatted as YYYY-MM-DDTHH:MM:SS"
                },
                "timezone": {
                    "type": "string",
                    "description": "IANA timezone name (default Europe/Paris)"
                }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let event = match parse_new_event(&args) {
            Ok(e) => e,
            Err(failure) => return Ok(failure),
        };

        tracing::info!(start = %event.start, timezone = %event.timezone, "scheduling event");
        match self.service.schedule(&event) {
            Ok(created) => Ok(ToolResult::success(format!(
                "Event created: {}",
                created.format_summary()
            ))),
            Err(e) => {
                tracing::warn!(error = %e, "scheduling event failed");
                Ok(ToolResult::failure(format!("failed to schedule event: {e}")))
            }
        }
    }

    fn allowed_in_mode(&self, mode: ToolMode) -> bool {
        matches!(mode, ToolMode::Full)
    }
}

// ─── UpcomingEventsTool ──────────────────────────────────────────────────────

/// Read-only tool listing the next scheduled events.
///
/// # Arguments (JSON)
///
/// - `count` (integer, optional) — default 2, max 10
pub struct UpcomingEventsTool {
    service: Arc<dyn CalendarService>,
}

impl UpcomingEventsTool {
    /// Create a new `UpcomingEventsTool` backed by `service`.
    pub fn new(service: Arc<dyn CalendarService>) -> Self {
        Self { service }
    }
}

impl Tool for UpcomingEventsTool {
    fn name(&self) -> &str {
        "list_upcoming_events"
    }

    fn description(&self) -> &str {
        "Use this tool to get the next scheduled events in the calendar."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "count": {
                    "type": "integer",
                    "description": "Number of events to retrieve (default 2, max 10)",
                    "minimum": 1,
                    "maximum": 10
                }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let count = count_arg(&args, "count", DEFAULT_UPCOMING_COUNT, MAX_UPCOMING_COUNT);
        let events = match self.service.upcoming(count) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "listing events failed");
                return Ok(ToolResult::failure(format!("failed to list events: {e}")));
            }
        };

        if events.is_empty() {
            return Ok(ToolResult::success("No upcoming events found.".to_owned()));
        }
        let lines: Vec<String> = events.iter().map(CalendarEvent::format_summary).collect();
        Ok(ToolResult::success(lines.join("\n")))
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}
