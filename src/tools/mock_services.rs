//! In-memory mock implementations of the collaborator service traits.
//!
//! Used by unit and integration tests to exercise the tool layer without a
//! mail provider, calendar, task backend or train server.

use std::sync::Mutex;

use super::calendar::{CalendarEvent, CalendarService, NewEvent};
use super::mail::{MailService, MailSummary, OutgoingMail};
use super::service::ServiceError;
use super::tasks::{Task, TaskDraft, TaskList, TaskService};
use super::trains::TrainService;

fn poisoned() -> ServiceError {
    ServiceError::Backend("mock lock poisoned".to_owned())
}

// ─── MockMailService ──────────────────────────────────────────────────────────

/// Mail service recording sent messages and serving a fixed inbox.
pub struct MockMailService {
    inbox: Vec<MailSummary>,
    sent: Mutex<Vec<OutgoingMail>>,
    failure: Option<String>,
}

impl MockMailService {
    /// Create a mock whose unread inbox is `inbox`, newest first.
    pub fn new(inbox: Vec<MailSummary>) -> Self {
        Self {
            inbox,
            sent: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Create a mock that fails every call with a backend error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
            ..Self::new(Vec::new())
        }
    }

    /// Messages sent so far.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<(), ServiceError> {
        match &self.failure {
            Some(msg) => Err(ServiceError::Backend(msg.clone())),
            None => Ok(()),
        }
    }
}

impl MailService for MockMailService {
    fn send(&self, mail: &OutgoingMail) -> Result<String, ServiceError> {
        self.check()?;
        let mut sent = self.sent.lock().map_err(|_| poisoned())?;
        sent.push(mail.clone());
        Ok(format!("mock-mail-{}", sent.len()))
    }

    fn list_unread(&self, count: usize) -> Result<Vec<MailSummary>, ServiceError> {
        self.check()?;
        Ok(self.inbox.iter().take(count).cloned().collect())
    }
}

// ─── MockCalendarService ──────────────────────────────────────────────────────

/// Calendar service recording scheduled events and serving fixed upcoming ones.
pub struct MockCalendarService {
    upcoming: Vec<CalendarEvent>,
    scheduled: Mutex<Vec<NewEvent>>,
}

impl MockCalendarService {
    /// Create a mock whose upcoming events are `upcoming`, soonest first.
    pub fn new(upcoming: Vec<CalendarEvent>) -> Self {
        Self {
            upcoming,
            scheduled: Mutex::new(Vec::new()),
        }
    }

    /// Events scheduled so far.
    pub fn scheduled(&self) -> Vec<NewEvent> {
        self.scheduled.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl CalendarService for MockCalendarService {
    fn schedule(&self, event: &NewEvent) -> Result<CalendarEvent, ServiceError> {
        let mut scheduled = self.scheduled.lock().map_err(|_| poisoned())?;
        scheduled.push(event.clone());
        Ok(CalendarEvent {
            id: format!("mock-event-{}", scheduled.len()),
            summary: event.summary.clone(),
            start: event.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            link: None,
        })
    }

    fn upcoming(&self, count: usize) -> Result<Vec<CalendarEvent>, ServiceError> {
        Ok(self.upcoming.iter().take(count).cloned().collect())
    }
}

// ─── MockTaskService ──────────────────────────────────────────────────────────

/// Task service keeping lists and tasks in memory.
pub struct MockTaskService {
    lists: Vec<TaskList>,
    tasks: Mutex<Vec<(String, Task)>>,
    next_id: Mutex<u64>,
}

impl MockTaskService {
    /// Create a mock with empty task lists `lists`.
    pub fn new(lists: Vec<TaskList>) -> Self {
        Self {
            lists,
            tasks: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    fn require_list(&self, list_id: &str) -> Result<(), ServiceError> {
        if self.lists.iter().any(|l| l.id == list_id) {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("task list {list_id}")))
        }
    }
}

impl TaskService for MockTaskService {
    fn lists(&self, limit: usize) -> Result<Vec<TaskList>, ServiceError> {
        Ok(self.lists.iter().take(limit).cloned().collect())
    }

    fn tasks(&self, list_id: &str, limit: usize) -> Result<Vec<Task>, ServiceError> {
        self.require_list(list_id)?;
        let tasks = self.tasks.lock().map_err(|_| poisoned())?;
        Ok(tasks
            .iter()
            .filter(|(l, _)| l == list_id)
            .map(|(_, t)| t.clone())
            .take(limit)
            .collect())
    }

    fn create(&self, list_id: &str, draft: &TaskDraft) -> Result<Task, ServiceError> {
        self.require_list(list_id)?;
        let mut next_id = self.next_id.lock().map_err(|_| poisoned())?;
        let task = Task {
            id: format!("mock-task-{}", *next_id),
            title: draft.title.clone(),
            notes: draft.notes.clone(),
            completed: false,
        };
        *next_id += 1;
        self.tasks
            .lock()
            .map_err(|_| poisoned())?
            .push((list_id.to_owned(), task.clone()));
        Ok(task)
    }

    fn update(&self, list_id: &str, task_id: &str, draft: &TaskDraft) -> Result<Task, ServiceError> {
        self.require_list(list_id)?;
        let mut tasks = self.tasks.lock().map_err(|_| poisoned())?;
        let (_, task) = tasks
            .iter_mut()
            .find(|(l, t)| l == list_id && t.id == task_id)
            .ok_or_else(|| ServiceError::NotFound(format!("task {task_id}")))?;
        task.title = draft.title.clone();
        task.notes = draft.notes.clone();
        Ok(task.clone())
    }

    fn delete(&self, list_id: &str, task_id: &str) -> Result<(), ServiceError> {
        self.require_list(list_id)?;
        let mut tasks = self.tasks.lock().map_err(|_| poisoned())?;
        let before = tasks.len();
        tasks.retain(|(l, t)| !(l == list_id && t.id == task_id));
        if tasks.len() == before {
            return Err(ServiceError::NotFound(format!("task {task_id}")));
        }
        Ok(())
    }
}

// ─── MockTrainService ─────────────────────────────────────────────────────────

/// Train service answering every query with the same text.
pub struct MockTrainService {
    answer: String,
    queries: Mutex<Vec<(String, String)>>,
}

impl MockTrainService {
    /// Create a mock answering `answer`.
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_owned(),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// `(origin, destination)` pairs received so far.
    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

impl TrainService for MockTrainService {
    fn next_train(&self, origin: &str, destination: &str) -> Result<String, ServiceError> {
        self.queries
            .lock()
            .map_err(|_| poisoned())?
            .push((origin.to_owned(), destination.to_owned()));
        Ok(self.answer.clone())
    }
}
