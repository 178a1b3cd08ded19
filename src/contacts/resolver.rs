//! Nickname resolution over a [`ContactDirectory`].
//!
//! The resolver walks the directory in stored order, scores the query
//! against the whitespace tokens of one contact field and returns the first
//! contact whose best token reaches the threshold. It does not look for a
//! better match further down the list.

use std::sync::Arc;

use zephyr_match::{MatchError, Scorer, extract_one, validate_query, validate_threshold};

use super::directory::{Contact, ContactDirectory};

/// Threshold used when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Which contact field a lookup is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    /// The spoken nickname.
    Nickname,
    /// The stable identifier.
    Id,
    /// The display name.
    FullName,
    /// The email address.
    Email,
}

impl ContactField {
    /// Borrow this field's value from `contact`.
    pub fn extract(self, contact: &Contact) -> &str {
        match self {
            Self::Nickname => &contact.nickname,
            Self::Id => &contact.id,
            Self::FullName => &contact.full_name,
            Self::Email => &contact.email,
        }
    }

    /// Field name as used in logs and tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nickname => "nickname",
            Self::Id => "id",
            Self::FullName => "full_name",
            Self::Email => "email",
        }
    }
}

/// Outcome of a resolution that respected the contract.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A contact cleared the threshold.
    Found {
        /// The first qualifying contact in directory order.
        contact: Contact,
        /// Its best token score.
        score: f64,
        /// The field token that produced `score`.
        matched_token: String,
    },
    /// No contact cleared the threshold.
    NotFound,
}

impl Resolution {
    /// The matched contact, if any.
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Self::Found { contact, .. } => Some(contact),
            Self::NotFound => None,
        }
    }

    /// Whether a contact was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Caller contract violations. Not finding anyone is not one of them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The query for the named field was empty or whitespace-only.
    #[error("{0} must not be empty")]
    InvalidInput(String),

    /// The threshold was outside `[0, 100]` or not finite.
    #[error("threshold must be within 0..=100, got {0}")]
    InvalidThreshold(f64),
}

impl ResolveError {
    /// Attribute a matcher contract violation to the field being resolved.
    fn on_field(e: MatchError, field: ContactField) -> Self {
        match e {
            MatchError::EmptyQuery => Self::InvalidInput(field.as_str().to_owned()),
            MatchError::InvalidThreshold(t) => Self::InvalidThreshold(t),
        }
    }
}

/// Resolves spoken names and identifiers to contacts.
///
/// Cheap to clone; every clone shares the same directory.
#[derive(Debug, Clone)]
pub struct NicknameResolver {
    directory: Arc<ContactDirectory>,
    default_threshold: f64,
}

impl NicknameResolver {
    /// Create a resolver over `directory` using [`DEFAULT_THRESHOLD`].
    pub fn new(directory: Arc<ContactDirectory>) -> Self {
        Self {
            directory,
            default_threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Create a resolver with a custom default threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidThreshold`] when `threshold` is not a
    /// finite value in `[0, 100]`.
    pub fn with_threshold(
        directory: Arc<ContactDirectory>,
        threshold: f64,
    ) -> Result<Self, ResolveError> {
        let default_threshold = validate_threshold(threshold)
            .map_err(|_| ResolveError::InvalidThreshold(threshold))?;
        Ok(Self {
            directory,
            default_threshold,
        })
    }

    /// The directory this resolver reads.
    pub fn directory(&self) -> &ContactDirectory {
        &self.directory
    }

    /// The threshold applied when none is passed per call.
    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }

    /// Resolve `query` against `field`, first match at or above the
    /// threshold wins.
    ///
    /// `threshold` overrides the default for this call only.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidInput`] if `query` is blank
    /// - [`ResolveError::InvalidThreshold`] if the override is out of range
    pub fn resolve_by_field(
        &self,
        field: ContactField,
        query: &str,
        threshold: Option<f64>,
    ) -> Result<Resolution, ResolveError> {
        validate_query(query).map_err(|e| ResolveError::on_field(e, field))?;
        let threshold = match threshold {
            Some(t) => validate_threshold(t).map_err(|e| ResolveError::on_field(e, field))?,
            None => self.default_threshold,
        };

        for contact in self.directory.iter() {
            let tokens = field.extract(contact).split_whitespace();
            let Some(best) = extract_one(query, tokens, Scorer::WeightedRatio) else {
                continue;
            };
            if best.score >= threshold {
                tracing::debug!(
                    field = field.as_str(),
                    contact_id = %contact.id,
                    score = best.score,
                    threshold,
                    "contact resolved"
                );
                return Ok(Resolution::Found {
                    contact: contact.clone(),
                    score: best.score,
                    matched_token: best.token,
                });
            }
        }

        tracing::debug!(
            field = field.as_str(),
            query_len = query.chars().count(),
            threshold,
            "no contact cleared the threshold"
        );
        Ok(Resolution::NotFound)
    }

    /// Resolve a spoken nickname with the default threshold.
    ///
    /// # Errors
    ///
    /// See [`resolve_by_field`](Self::resolve_by_field).
    pub fn resolve_nickname(&self, nickname: &str) -> Result<Resolution, ResolveError> {
        self.resolve_by_field(ContactField::Nickname, nickname, None)
    }

    /// Resolve a contact identifier with the default threshold.
    ///
    /// # Errors
    ///
    /// See [`resolve_by_field`](Self::resolve_by_field).
    pub fn resolve_id(&self, id: &str) -> Result<Resolution, ResolveError> {
        self.resolve_by_field(ContactField::Id, id, None)
    }

    /// Every contact's nickname in directory order, duplicates included.
    pub fn list_known_nicknames(&self) -> Vec<&str> {
        self.directory.iter().map(|c| c.nickname.as_str()).collect()
    }
}
