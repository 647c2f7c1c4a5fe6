//! XML name validation and utilities
//!
//! This module provides checks for NCNames and NMTOKENs, used for
//! configured prefixes and for space-delimited token list attributes.

use once_cell::sync::Lazy;
use regex::Regex;

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\-\.0-9\u{B7}]*$")
        .unwrap()
});

static NMTOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\-\.0-9\u{B7}:]+$")
        .unwrap()
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Check if a string is a valid NMTOKEN
pub fn is_valid_nmtoken(token: &str) -> bool {
    NMTOKEN.is_match(token)
}

/// Split a space-delimited token list, dropping empty tokens
pub fn split_tokens(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

/// Join a token list back into its space-delimited lexical form
pub fn join_tokens(tokens: &[String]) -> String {
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("ddms"));
        assert!(is_valid_ncname("my-prefix"));
        assert!(is_valid_ncname("_ism"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("prefix:element"));
        assert!(!is_valid_ncname("1ddms"));
    }

    #[test]
    fn test_is_valid_nmtoken() {
        assert!(is_valid_nmtoken("USA"));
        assert!(is_valid_nmtoken("DoD-Dist-B"));
        assert!(is_valid_nmtoken("123"));
        assert!(!is_valid_nmtoken("two words"));
        assert!(!is_valid_nmtoken(""));
    }

    #[test]
    fn test_split_and_join_tokens() {
        let tokens = split_tokens("  USA   AUS GBR ");
        assert_eq!(tokens, vec!["USA", "AUS", "GBR"]);
        assert_eq!(join_tokens(&tokens), "USA AUS GBR");
        assert!(split_tokens("   ").is_empty());
    }
}
