//! Mail tools backed by a [`MailService`].
//!
//! - [`SendMailTool`] — send an email (write, requires `ToolMode::Full`)
//! - [`ListUnreadMailTool`] — list the most recent unread messages (read-only)
//!
//! Recipients are plain addresses. Spoken names must go through
//! `get_contact_info_by_nickname` first; the send tool refuses anything
//! that does not look like an address.

use std::sync::Arc;

use super::error::ToolError;
use super::service::ServiceError;
use super::types::{Tool, ToolMode, ToolResult, count_arg, required_str};

/// Default number of unread messages listed.
const DEFAULT_UNREAD_COUNT: usize = 5;

/// Upper bound on listed unread messages.
const MAX_UNREAD_COUNT: usize = 50;

/// An email to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// A received message, summarised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSummary {
    /// Provider message identifier.
    pub id: String,
    /// Sender.
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Short body preview.
    pub snippet: String,
}

impl MailSummary {
    /// Format the message as one line for the model.
    pub fn format_summary(&self) -> String {
        format!(
            "From: {} | Subject: {} | {} [id: {}]",
            self.from, self.subject, self.snippet, self.id
        )
    }
}

/// Mail provider abstraction.
pub trait MailService: Send + Sync {
    /// Send `mail` and return the provider's message identifier.
    fn send(&self, mail: &OutgoingMail) -> Result<String, ServiceError>;

    /// Return up to `count` unread messages, newest first.
    fn list_unread(&self, count: usize) -> Result<Vec<MailSummary>, ServiceError>;
}

// ─── SendMailTool ─────────────────────────────────────────────────────────────

/// Write tool that sends an email.
///
/// # Arguments (JSON)
///
/// - `to` (string, required) — recipient email address
/// - `subject` (string, required)
/// - `message` (string, required)
pub struct SendMailTool {
    service: Arc<dyn MailService>,
}

impl SendMailTool {
    /// Create a new `SendMailTool` backed by `service`.
    pub fn new(service: Arc<dyn MailService>) -> Self {
        Self { service }
    }
}

impl Tool for SendMailTool {
    fn name(&self) -> &str {
        "send_mail"
    }

    fn description(&self) -> &str {
        "Use this tool to send an email. Use get_contact_info_by_nickname to resolve \
         nicknames to email addresses unless the nickname is unknown or you are \
         provided with a proper email address."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["to", "subject", "message"],
            "properties": {
                "to": {
                    "type": "string",
                    "description": "The recipient's email address"
                },
                "subject": {
                    "type": "string",
                    "description": "The subject of the email"
                },
                "message": {
                    "type": "string",
                    "description": "The content of the email"
                }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let mail = match (
            required_str(&args, "to"),
            required_str(&args, "subject"),
            required_str(&args, "message"),
        ) {
            (Ok(to), Ok(subject), Ok(body)) => OutgoingMail { to, subject, body },
            (Err(failure), _, _) | (_, Err(failure), _) | (_, _, Err(failure)) => {
                return Ok(failure);
            }
        };

        if !mail.to.contains('@') {
            return Ok(ToolResult::failure(format!(
                "\"{}\" is not an email address; resolve it with get_contact_info_by_nickname first",
                mail.to
            )));
        }

        tracing::info!(subject = %mail.subject, "sending email");
        match self.service.send(&mail) {
            Ok(id) => Ok(ToolResult::success(format!(
                "Email sent to {} [id: {id}]",
                mail.to
            ))),
            Err(e) => {
                tracing::warn!(error = %e, "mail send failed");
                Ok(ToolResult::failure(format!("failed to send email: {e}")))
            }
        }
    }

    fn allowed_in_mode(&self, mode: ToolMode) -> bool {
        matches!(mode, ToolMode::Full)
    }
}

// ─── ListUnreadMailTool ───────────────────────────────────────────────────────

/// Read-only tool listing unread messages.
///
/// # Arguments (JSON)
///
/// - `count` (integer, optional) — default 5, max 50
pub struct ListUnreadMailTool {
    service: Arc<dyn MailService>,
}

impl ListUnreadMailTool {
    /// Create a new `ListUnreadMailTool` backed by `service`.
    pub fn new(service: Arc<dyn MailService>) -> Self {
        Self { service }
    }
}

impl Tool for ListUnreadMailTool {
    fn name(&self) -> &str {
        "list_unread_mail"
    }

    fn description(&self) -> &str {
        "Use this tool to list the last N unread emails."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "count": {
                    "type": "integer",
                    "description": "Number of unread emails to retrieve (default 5, max 50)",
                    "minimum": 1,
                    "maximum": 50
                }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let count = count_arg(&args, "count", DEFAULT_UNREAD_COUNT, MAX_UNREAD_COUNT);
        tracing::info!(count, "listing unread emails");

        let messages = match self.service.list_unread(count) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "listing unread mail failed");
                return Ok(ToolResult::failure(format!("failed to list emails: {e}")));
            }
        };

        if messages.is_empty() {
            return Ok(ToolResult::success("No unread emails.".to_owned()));
        }

        let mut lines = vec![format!("{} unread email(s):", messages.len())];
        lines.extend(messages.iter().map(MailSummary::format_summary));
        Ok(ToolResult::success(lines.join("\n")))
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}
