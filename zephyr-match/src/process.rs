//! Input normalisation applied before scoring.

/// Normalise a string for comparison.
///
/// Lowercases (Unicode-aware), replaces every non-alphanumeric character
/// with a space and trims both ends. Inner runs of spaces are kept; token
/// scorers split on whitespace anyway.
pub fn default_process(s: &str) -> String {
    let mapped: String = s
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases() {
        assert_eq!(default_process("Lal"), "lal");
        assert_eq!(default_process("GIGI"), "gigi");
    }

    #[test]
    fn punctuation_becomes_space() {
        assert_eq!(default_process("jean-luc"), "jean luc");
        assert_eq!(default_process("seb!"), "seb");
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(default_process("  basile \n"), "basile");
    }

    #[test]
    fn keeps_digits_and_accents() {
        assert_eq!(default_process("004"), "004");
        assert_eq!(default_process("Aurélie"), "aurélie");
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(default_process("?!."), "");
    }
}
