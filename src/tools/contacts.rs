//! Contact lookup tools backed by a [`NicknameResolver`].
//!
//! - [`GetContactByNicknameTool`] — fuzzy lookup by spoken nickname
//! - [`GetContactByIdTool`] — fuzzy lookup by contact identifier
//! - [`ListNicknamesTool`] — every nickname the resolver knows
//!
//! A match is returned as the contact serialized to a JSON object. No match
//! is a *successful* result carrying [`NOT_FOUND_MESSAGE`]: noisy
//! transcription makes it a routine answer. A blank argument is a failed
//! result instead, so the model can tell the two apart.

use crate::contacts::{Contact, ContactField, NicknameResolver, Resolution, ResolveError};

use super::error::ToolError;
use super::types::{Tool, ToolMode, ToolResult, required_str};

/// Content returned when no contact clears the threshold.
pub const NOT_FOUND_MESSAGE: &str = "could not find a contact matching that name";

fn contact_json(contact: &Contact) -> Result<String, ToolError> {
    serde_json::to_string(contact)
        .map_err(|e| ToolError::Execution(format!("failed to serialize contact: {e}")))
}

fn resolve_to_result(
    resolver: &NicknameResolver,
    field: ContactField,
    query: &str,
) -> Result<ToolResult, ToolError> {
    match resolver.resolve_by_field(field, query, None) {
        Ok(Resolution::Found { contact, .. }) => Ok(ToolResult::success(contact_json(&contact)?)),
        Ok(Resolution::NotFound) => Ok(ToolResult::success(NOT_FOUND_MESSAGE.to_owned())),
        Err(ResolveError::InvalidInput(arg)) => Ok(ToolResult::failure(format!(
            "{arg} is required and cannot be empty"
        ))),
        Err(e @ ResolveError::InvalidThreshold(_)) => Err(ToolError::Execution(e.to_string())),
    }
}

// ─── GetContactByNicknameTool ────────────────────────────────────────────────

/// Read-only tool resolving a spoken nickname to a contact.
///
/// # Arguments (JSON)
///
/// - `nickname` (string, required) — the name as heard
pub struct GetContactByNicknameTool {
    resolver: NicknameResolver,
}

impl GetContactByNicknameTool {
    /// Create the tool over `resolver`.
    pub fn new(resolver: NicknameResolver) -> Self {
        Self { resolver }
    }
}

impl Tool for GetContactByNicknameTool {
    fn name(&self) -> &str {
        "get_contact_info_by_nickname"
    }

    fn description(&self) -> &str {
        "Use this tool if you are provided with a nickname and need to find the \
         corresponding contact information (id, nickname, email, full name). \
         Resolve a nickname with this tool before sending an email to it."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["nickname"],
            "properties": {
                "nickname": {
                    "type": "string",
                    "description": "The contact's nickname as spoken by the user"
                }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let nickname = match required_str(&args, "nickname") {
            Ok(n) => n,
            Err(failure) => return Ok(failure),
        };
        tracing::info!("getting contact for nickname");
        resolve_to_result(&self.resolver, ContactField::Nickname, &nickname)
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}

// ─── GetContactByIdTool ──────────────────────────────────────────────────────

/// Read-only tool resolving a contact identifier to a contact.
///
/// # Arguments (JSON)
///
/// - `contact_id` (string, required)
pub struct GetContactByIdTool {
    resolver: NicknameResolver,
}

impl GetContactByIdTool {
    /// Create the tool over `resolver`.
    pub fn new(resolver: NicknameResolver) -> Self {
        Self { resolver }
    }
}

impl Tool for GetContactByIdTool {
    fn name(&self) -> &str {
        "get_contact_info_by_id"
    }

    fn description(&self) -> &str {
        "Use this tool if you are provided with a contact id and need to find the \
         corresponding contact information."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["contact_id"],
            "properties": {
                "contact_id": {
                    "type": "string",
                    "description": "The contact's identifier, e.g. \"004\""
                }
            }
        })
    }

    fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let contact_id = match required_str(&args, "contact_id") {
            Ok(id) => id,
            Err(failure) => return Ok(failure),
        };
        tracing::info!("getting contact for id");
        resolve_to_result(&self.resolver, ContactField::Id, &contact_id)
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}

// ─── ListNicknamesTool ───────────────────────────────────────────────────────

/// Read-only tool listing every known nickname in directory order.
pub struct ListNicknamesTool {
    resolver: NicknameResolver,
}

impl ListNicknamesTool {
    /// Create the tool over `resolver`.
    pub fn new(resolver: NicknameResolver) -> Self {
        Self { resolver }
    }
}

impl Tool for ListNicknamesTool {
    fn name(&self) -> &str {
        "list_nicknames"
    }

    fn description(&self) -> &str {
        "Use this tool to list all known nicknames."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let nicknames = self.resolver.list_known_nicknames();
        let json = serde_json::to_string(&nicknames)
            .map_err(|e| ToolError::Execution(format!("failed to serialize nicknames: {e}")))?;
        Ok(ToolResult::success(json))
    }

    fn allowed_in_mode(&self, _mode: ToolMode) -> bool {
        true // read-only
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::sync::Arc;

    use super::*;
    use crate::contacts::ContactDirectory;

    fn resolver() -> NicknameResolver {
        let dir = ContactDirectory::new(vec![
            Contact::new("001", "lal", "lal@example.com", "Aurelie Nys"),
            Contact::new("002", "basile", "basile@example.com", "Basile Vinchon-Nys"),
            Contact::new("003", "seb", "seb@example.com", "Sebastien Vinchon"),
            Contact::new("004", "gigi", "gigi@example.com", "Guillaume Vinchon"),
        ])
        .unwrap();
        NicknameResolver::new(Arc::new(dir))
    }

    fn run(tool: &dyn Tool, args: serde_json::Value) -> ToolResult {
        match tool.execute(args) {
            Ok(r) => r,
            Err(e) => unreachable!("tool should not fault: {e}"),
        }
    }

    #[test]
    fn nickname_match_returns_contact_json() {
        let tool = GetContactByNicknameTool::new(resolver());
        let result = run(&tool, serde_json::json!({"nickname": "Gigi"}));
        assert!(result.success);
        let contact: Contact = serde_json::from_str(&result.content).unwrap();
        assert_eq!(contact.id, "004");
        assert_eq!(contact.email, "gigi@example.com");
    }

    #[test]
    fn nickname_miss_returns_sentinel_as_success() {
        let tool = GetContactByNicknameTool::new(resolver());
        let result = run(&tool, serde_json::json!({"nickname": "xyz123"}));
        assert!(result.success);
        assert_eq!(result.content, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn blank_nickname_is_failure_not_sentinel() {
        let tool = GetContactByNicknameTool::new(resolver());
        let result = run(&tool, serde_json::json!({"nickname": "  "}));
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap_or("").contains("nickname"));
        assert_ne!(result.content, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn missing_nickname_is_failure() {
        let tool = GetContactByNicknameTool::new(resolver());
        let result = run(&tool, serde_json::json!({}));
        assert!(!result.success);
    }

    #[test]
    fn id_match_returns_contact_json() {
        let tool = GetContactByIdTool::new(resolver());
        let result = run(&tool, serde_json::json!({"contact_id": "002"}));
        let contact: Contact = serde_json::from_str(&result.content).unwrap();
        assert_eq!(contact.nickname, "basile");
    }

    #[test]
    fn id_miss_returns_sentinel() {
        let tool = GetContactByIdTool::new(resolver());
        let result = run(&tool, serde_json::json!({"contact_id": "999"}));
        assert!(result.success);
        assert_eq!(result.content, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn list_nicknames_in_order() {
        let tool = ListNicknamesTool::new(resolver());
        let result = run(&tool, serde_json::json!({}));
        let names: Vec<String> = serde_json::from_str(&result.content).unwrap();
        assert_eq!(names, vec!["lal", "basile", "seb", "gigi"]);
    }

    #[test]
    fn schemas_declare_required_arguments() {
        let by_nick = GetContactByNicknameTool::new(resolver()).schema();
        let by_id = GetContactByIdTool::new(resolver()).schema();
        assert_eq!(by_nick["required"][0], "nickname");
        assert_eq!(by_id["required"][0], "contact_id");
    }

    #[test]
    fn contact_tools_are_read_only() {
        let r = resolver();
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(GetContactByNicknameTool::new(r.clone())),
            Box::new(GetContactByIdTool::new(r.clone())),
            Box::new(ListNicknamesTool::new(r)),
        ];
        for tool in tools {
            assert!(tool.allowed_in_mode(ToolMode::ReadOnly), "{}", tool.name());
            assert!(tool.allowed_in_mode(ToolMode::Full), "{}", tool.name());
        }
    }
}
