//! Shared error type for external collaborator services.

/// Failure reported by a mail, calendar, task or train backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The backend is not wired up in this process.
    #[error("{0} is not configured")]
    Unavailable(String),

    /// The requested item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other backend failure (network, auth, protocol).
    #[error("service error: {0}")]
    Backend(String),
}
