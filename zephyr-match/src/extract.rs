//! Best-candidate extraction.

use serde::Serialize;

use crate::process::default_process;
use crate::scorer::Scorer;

/// The best-scoring candidate of an [`extract_one`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// The candidate as it was passed in (not normalised).
    pub token: String,
    /// Similarity in `[0, 100]`.
    pub score: f64,
    /// Position of `token` in the candidate sequence.
    pub index: usize,
}

/// Score `query` against every candidate and return the best one.
///
/// Both sides go through [`default_process`] first, so comparison is
/// case-insensitive and ignores punctuation. When several candidates share
/// the maximum score the first one in iteration order wins.
///
/// Returns `None` only when `candidates` is empty.
///
/// # Examples
///
/// ```
/// use zephyr_match::{Scorer, extract_one};
///
/// let best = extract_one("Basil", "basile vinchon".split_whitespace(), Scorer::WeightedRatio);
/// let best = best.expect("two candidates");
/// assert_eq!(best.token, "basile");
/// assert_eq!(best.index, 0);
/// ```
pub fn extract_one<'a, I>(query: &str, candidates: I, scorer: Scorer) -> Option<MatchResult>
where
    I: IntoIterator<Item = &'a str>,
{
    let processed_query = default_process(query);
    let mut best: Option<MatchResult> = None;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let score = scorer.score(&processed_query, &default_process(candidate));
        tracing::trace!(index, score, "scored candidate");

        let improves = best.as_ref().is_none_or(|current| score > current.score);
        if improves {
            best = Some(MatchResult {
                token: candidate.to_owned(),
                score,
                index,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidates_yield_none() {
        let none: [&str; 0] = [];
        assert!(extract_one("lal", none, Scorer::WeightedRatio).is_none());
    }

    #[test]
    fn case_insensitive_exact_is_100() {
        let best = extract_one("Lal", ["lal"], Scorer::WeightedRatio);
        let best = match best {
            Some(b) => b,
            None => unreachable!("one candidate"),
        };
        assert_eq!(best.token, "lal");
        assert!((best.score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn picks_maximum() {
        let best = extract_one("gigi", ["seb", "gigy", "gigi"], Scorer::WeightedRatio);
        let best = match best {
            Some(b) => b,
            None => unreachable!("three candidates"),
        };
        assert_eq!(best.token, "gigi");
        assert_eq!(best.index, 2);
    }

    #[test]
    fn ties_keep_first_candidate() {
        let best = extract_one("sam", ["Sam", "sam", "SAM"], Scorer::WeightedRatio);
        let best = match best {
            Some(b) => b,
            None => unreachable!("three candidates"),
        };
        assert_eq!(best.index, 0);
        assert_eq!(best.token, "Sam");
    }

    #[test]
    fn zero_scores_still_return_first_candidate() {
        let best = extract_one("xyz", ["abc", "def"], Scorer::WeightedRatio);
        let best = match best {
            Some(b) => b,
            None => unreachable!("two candidates"),
        };
        assert_eq!(best.index, 0);
        assert!(best.score.abs() < f64::EPSILON);
    }

    #[test]
    fn result_serializes() {
        let result = MatchResult {
            token: "seb".to_owned(),
            score: 90.0,
            index: 1,
        };
        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["token"], "seb");
        assert_eq!(json["index"], 1);
    }
}
