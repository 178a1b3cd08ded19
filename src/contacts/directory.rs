//! The contact directory: an ordered, read-only set of known contacts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A known contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Short stable identifier, unique within a directory.
    pub id: String,
    /// Spoken-friendly lookup key. Not required to be unique.
    pub nickname: String,
    /// Address handed to the mail tool.
    pub email: String,
    /// Display name.
    pub full_name: String,
}

impl Contact {
    /// Build a contact from borrowed fields.
    pub fn new(id: &str, nickname: &str, email: &str, full_name: &str) -> Self {
        Self {
            id: id.to_owned(),
            nickname: nickname.to_owned(),
            email: email.to_owned(),
            full_name: full_name.to_owned(),
        }
    }
}

/// Why a set of contacts cannot form a directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Two contacts share the same identifier.
    #[error("duplicate contact id \"{0}\"")]
    DuplicateId(String),

    /// A required field is empty or whitespace-only.
    #[error("contact at position {position} has an empty {field}")]
    EmptyField {
        /// Index of the offending contact in the input order.
        position: usize,
        /// Name of the empty field.
        field: &'static str,
    },
}

/// Ordered, immutable collection of contacts.
///
/// Directory order is part of the resolution contract: when several
/// contacts qualify, the one stored first wins. Share it behind an `Arc`;
/// nothing mutates it after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    /// Build a directory, checking field and identifier invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::EmptyField`] for a blank field and
    /// [`DirectoryError::DuplicateId`] when an identifier repeats.
    pub fn new(contacts: Vec<Contact>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(contacts.len());
        for (position, contact) in contacts.iter().enumerate() {
            for (field, value) in [
                ("id", &contact.id),
                ("nickname", &contact.nickname),
                ("email", &contact.email),
                ("full_name", &contact.full_name),
            ] {
                if value.trim().is_empty() {
                    return Err(DirectoryError::EmptyField { position, field });
                }
            }
            if !seen.insert(contact.id.as_str()) {
                return Err(DirectoryError::DuplicateId(contact.id.clone()));
            }
        }
        tracing::debug!(contacts = contacts.len(), "contact directory loaded");
        Ok(Self { contacts })
    }

    /// Contacts in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the directory holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Exact identifier lookup (no fuzzy matching).
    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }
}

impl<'a> IntoIterator for &'a ContactDirectory {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
