//! # zephyr-match
//!
//! Deterministic fuzzy string scoring used by Zephyr to map spoken,
//! possibly mis-transcribed names onto known tokens.
//!
//! ## Design
//!
//! - All scorers are pure functions returning a similarity in `[0, 100]`
//! - [`Scorer::WeightedRatio`] blends substring containment, token overlap
//!   and normalized edit distance, weighted by the length ratio of the inputs
//! - [`extract_one`] picks the best candidate; ties go to the earliest one
//! - No I/O, no shared state: every call is safe to run concurrently

pub mod error;
pub mod extract;
pub mod process;
pub mod scorer;

pub use error::{MatchError, Result};
pub use extract::{MatchResult, extract_one};
pub use process::default_process;
pub use scorer::{
    Scorer, partial_ratio, partial_token_ratio, ratio, token_set_ratio, token_sort_ratio,
    weighted_ratio,
};

/// Lowest accepted score or threshold.
pub const MIN_SCORE: f64 = 0.0;

/// Highest possible score: an exact match after preprocessing.
pub const MAX_SCORE: f64 = 100.0;

/// Check that `threshold` is a finite value in `[0, 100]`.
///
/// # Errors
///
/// Returns [`MatchError::InvalidThreshold`] for NaN, infinities and
/// out-of-range values.
///
/// # Examples
///
/// ```
/// assert!(zephyr_match::validate_threshold(80.0).is_ok());
/// assert!(zephyr_match::validate_threshold(120.0).is_err());
/// ```
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(MatchError::InvalidThreshold(threshold))
    }
}

/// Check that `query` has something to score.
///
/// # Errors
///
/// Returns [`MatchError::EmptyQuery`] when `query` is empty or only
/// whitespace.
///
/// # Examples
///
/// ```
/// assert!(zephyr_match::validate_query("gigi").is_ok());
/// assert!(zephyr_match::validate_query("  ").is_err());
/// ```
pub fn validate_query(query: &str) -> Result<&str> {
    if query.trim().is_empty() {
        Err(MatchError::EmptyQuery)
    } else {
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_queries_are_rejected() {
        assert_eq!(validate_query(""), Err(MatchError::EmptyQuery));
        assert_eq!(validate_query(" \t\n"), Err(MatchError::EmptyQuery));
        assert_eq!(validate_query(" seb "), Ok(" seb "));
    }

    #[test]
    fn punctuation_only_query_is_not_blank() {
        assert!(validate_query("?!").is_ok());
    }

    #[test]
    fn threshold_bounds_are_inclusive() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(100.0).is_ok());
    }

    #[test]
    fn threshold_rejects_out_of_range() {
        assert!(matches!(
            validate_threshold(-0.5),
            Err(MatchError::InvalidThreshold(_))
        ));
        assert!(matches!(
            validate_threshold(100.01),
            Err(MatchError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn threshold_rejects_non_finite() {
        assert!(validate_threshold(f64::NAN).is_err());
        assert!(validate_threshold(f64::INFINITY).is_err());
    }
}
