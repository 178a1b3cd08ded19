//! Placeholder backend for deployments with no mail, calendar or task provider.
//!
//! The tools stay registered so the model can tell the user the service is
//! missing, instead of inventing an answer.

use super::calendar::{CalendarEvent, CalendarService, NewEvent};
use super::mail::{MailService, MailSummary, OutgoingMail};
use super::service::ServiceError;
use super::tasks::{Task, TaskDraft, TaskList, TaskService};

/// Service that fails every call with [`ServiceError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredService;

impl UnconfiguredService {
    fn unavailable<T>(service: &str) -> Result<T, ServiceError> {
        Err(ServiceError::Unavailable(service.to_owned()))
    }
}

impl MailService for UnconfiguredService {
    fn send(&self, _mail: &OutgoingMail) -> Result<String, ServiceError> {
        Self::unavailable("mail")
    }

    fn list_unread(&self, _count: usize) -> Result<Vec<MailSummary>, ServiceError> {
        Self::unavailable("mail")
    }
}

impl CalendarService for UnconfiguredService {
    fn schedule(&self, _event: &NewEvent) -> Result<CalendarEvent, ServiceError> {
        Self::unavailable("calendar")
    }

    fn upcoming(&self, _count: usize) -> Result<Vec<CalendarEvent>, ServiceError> {
        Self::unavailable("calendar")
    }
}

impl TaskService for UnconfiguredService {
    fn lists(&self, _limit: usize) -> Result<Vec<TaskList>, ServiceError> {
        Self::unavailable("tasks")
    }

    fn tasks(&self, _list_id: &str, _limit: usize) -> Result<Vec<Task>, ServiceError> {
        Self::unavailable("tasks")
    }

    fn create(&self, _list_id: &str, _draft: &TaskDraft) -> Result<Task, ServiceError> {
        Self::unavailable("tasks")
    }

    fn update(&self, _list_id: &str, _task_id: &str, _draft: &TaskDraft) -> Result<Task, ServiceError> {
        Self::unavailable("tasks")
    }

    fn delete(&self, _list_id: &str, _task_id: &str) -> Result<(), ServiceError> {
        Self::unavailable("tasks")
    }
}
