//! Error types for the zephyr-match crate.

/// Contract violations detected before any scoring happens.
///
/// A low score is never an error; callers compare scores against their own
/// threshold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// The query was empty or contained only whitespace.
    #[error("query must not be empty")]
    EmptyQuery,

    /// A threshold outside `[0, 100]` (or not a finite number).
    #[error("threshold must be within 0..=100, got {0}")]
    InvalidThreshold(f64),
}

/// Convenience type alias for zephyr-match results.
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_query() {
        assert_eq!(MatchError::EmptyQuery.to_string(), "query must not be empty");
    }

    #[test]
    fn display_invalid_threshold() {
        let err = MatchError::InvalidThreshold(150.0);
        assert_eq!(err.to_string(), "threshold must be within 0..=100, got 150");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MatchError>();
    }
}
