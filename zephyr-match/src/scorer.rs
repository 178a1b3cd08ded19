//! Similarity scorers.
//!
//! Every scorer takes two already-normalised strings (see
//! [`default_process`](crate::process::default_process)) and returns a
//! similarity in `[0, 100]`. An empty side always scores 0.
//!
//! # Weighted ratio
//!
//! ```text
//! len_ratio = max_len / min_len
//!
//! len_ratio < 1.5:
//!     max(ratio, token_ratio * 0.95)
//!
//! otherwise (partial_scale = 0.9 if len_ratio < 8 else 0.6):
//!     max(ratio,
//!         partial_ratio * partial_scale,
//!         partial_token_ratio * 0.95 * partial_scale)
//! ```
//!
//! Similar-length inputs are judged on whole-string edit distance; a short
//! query against a long target is judged mostly on containment.

use std::collections::BTreeSet;

/// Down-weighting applied to token-based scores.
const UNBASE_SCALE: f64 = 0.95;

/// Length ratio below which whole-string comparison dominates.
const PARTIAL_LEN_RATIO: f64 = 1.5;

/// Length ratio at and above which containment is trusted less.
const LONG_LEN_RATIO: f64 = 8.0;

/// Scale for partial scores when the length ratio is moderate.
const PARTIAL_SCALE: f64 = 0.9;

/// Scale for partial scores when one side is much longer.
const LONG_PARTIAL_SCALE: f64 = 0.6;

/// Selectable scoring strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scorer {
    /// Whole-string normalized edit distance.
    Ratio,
    /// Best window of the longer string against the shorter one.
    PartialRatio,
    /// Ratio over alphabetically sorted tokens.
    TokenSortRatio,
    /// Ratio over token-set intersection and remainders.
    TokenSetRatio,
    /// Composite of the above, weighted by length ratio.
    #[default]
    WeightedRatio,
}

impl Scorer {
    /// Score `a` against `b` with this strategy.
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Self::Ratio => ratio(a, b),
            Self::PartialRatio => partial_ratio(a, b),
            Self::TokenSortRatio => token_sort_ratio(a, b),
            Self::TokenSetRatio => token_set_ratio(a, b),
            Self::WeightedRatio => weighted_ratio(a, b),
        }
    }
}

/// Normalized Levenshtein similarity scaled to `[0, 100]`.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    clamp(strsim::normalized_levenshtein(a, b) * 100.0)
}

/// Best [`ratio`] of the shorter string against every equal-length
/// character window of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a_chars.len() <= b_chars.len() {
        (a, b_chars)
    } else {
        (b, a_chars)
    };
    let width = shorter.chars().count();

    let mut best = 0.0_f64;
    for window in longer.windows(width) {
        let candidate: String = window.iter().collect();
        let score = ratio(shorter, &candidate);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

/// [`ratio`] after sorting whitespace tokens alphabetically.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Token-set comparison.
///
/// Returns 100 when the token sets share at least one token and one set is
/// a subset of the other. Otherwise compares the shared tokens and each
/// side's remainder and keeps the best of the three pairings.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = set_a.intersection(&set_b).copied().collect();
    let diff_ab: Vec<&str> = set_a.difference(&set_b).copied().collect();
    let diff_ba: Vec<&str> = set_b.difference(&set_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = intersection.join(" ");
    let combined_ab = join_non_empty(&sect, &diff_ab.join(" "));
    let combined_ba = join_non_empty(&sect, &diff_ba.join(" "));

    ratio(&sect, &combined_ab)
        .max(ratio(&sect, &combined_ba))
        .max(ratio(&combined_ab, &combined_ba))
}

/// Partial comparison over tokens.
///
/// Any shared token scores 100; otherwise [`partial_ratio`] of the sorted
/// token strings.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    if set_a.intersection(&set_b).next().is_some() {
        return 100.0;
    }
    let joined_a: Vec<&str> = set_a.into_iter().collect();
    let joined_b: Vec<&str> = set_b.into_iter().collect();
    partial_ratio(&joined_a.join(" "), &joined_b.join(" "))
}

/// Composite similarity, see the module documentation for the formula.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let whole = ratio(a, b);
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;

    if len_ratio < PARTIAL_LEN_RATIO {
        let token = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return clamp(whole.max(token * UNBASE_SCALE));
    }

    let partial_scale = if len_ratio < LONG_LEN_RATIO {
        PARTIAL_SCALE
    } else {
        LONG_PARTIAL_SCALE
    };

    let partial = partial_ratio(a, b) * partial_scale;
    let partial_token = partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale;
    clamp(whole.max(partial).max(partial_token))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join_non_empty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_owned(),
        (false, true) => head.to_owned(),
        (false, false) => format!("{head} {tail}"),
    }
}

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}
