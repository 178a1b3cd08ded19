//! Tool dispatch surface exposed to the agent runtime.
//!
//! Every action the voice agent can take is a [`Tool`] registered in a
//! [`ToolRegistry`]. Contact tools sit on the nickname resolver; mail,
//! calendar, task and train tools are thin adapters over collaborator
//! service traits so tests can swap in [`mock_services`].

pub mod calendar;
pub mod contacts;
pub mod datetime;
pub mod error;
pub mod mail;
pub mod mock_services;
pub mod registry;
pub mod service;
pub mod tasks;
pub mod trains;
pub mod types;
pub mod unconfigured;

pub use calendar::{
    CalendarEvent, CalendarService, DEFAULT_TIMEZONE, NewEvent, ScheduleEventTool,
    UpcomingEventsTool,
};
pub use contacts::{
    GetContactByIdTool, GetContactByNicknameTool, ListNicknamesTool, NOT_FOUND_MESSAGE,
};
pub use datetime::CurrentDateTimeTool;
pub use error::ToolError;
pub use mail::{ListUnreadMailTool, MailService, MailSummary, OutgoingMail, SendMailTool};
pub use registry::ToolRegistry;
pub use service::ServiceError;
pub use tasks::{
    CreateTaskTool, DeleteTaskTool, ListTaskListsTool, ListTasksTool, Task, TaskDraft, TaskList,
    TaskService, UpdateTaskTool,
};
pub use trains::{DEFAULT_TRAIN_ENDPOINT, McpTrainService, NextTrainTool, TrainService};
pub use types::{Tool, ToolMode, ToolResult, truncate_output};
pub use unconfigured::UnconfiguredService;
