//! Named formats for `format=` rules
//!
//! The registry is built once, on first use, and never mutated. A `format=` argument that is
//! not a registered name is used as a regular expression as-is.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::errors::{FieldCheckError, FieldCheckResult};

static FORMATS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (
            "email",
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        ),
        (
            "uuid",
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        ),
        ("url", r"^https?://[^\s/$.?#][^\s]*$"),
        ("hex", r"^[0-9a-fA-F]+$"),
        ("alpha", r"^[a-zA-Z]+$"),
        ("alphanumeric", r"^[a-zA-Z0-9]+$"),
        ("numeric", r"^[0-9]+$"),
        ("phone", r"^\+?[0-9]{7,15}$"),
        (
            "ipv4",
            r"^((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$",
        ),
        ("date", r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$"),
    ])
});

/// Returns the pattern registered under `name`
pub fn lookup(name: &str) -> Option<&'static str> {
    FORMATS.get(name).copied()
}

/// Returns the registered format names, sorted
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = FORMATS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Resolves a `format=` argument to the pattern text to compile.
pub fn resolve(arg: &str) -> &str {
    lookup(arg).unwrap_or(arg)
}

/// Resolves and compiles the pattern for a `format=` argument.
///
/// Compilation failure is a structural error attributed to `field`.
pub fn compile(field: &str, arg: &str) -> FieldCheckResult<Regex> {
    let pattern = resolve(arg);
    Regex::new(pattern).map_err(|source| FieldCheckError::InvalidPattern {
        field: field.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_registered_pattern_compiles() {
        for name in names() {
            assert!(compile("f", name).is_ok(), "format '{}' must compile", name);
        }
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(resolve("^[a-z]+$"), "^[a-z]+$");
        assert!(lookup("^[a-z]+$").is_none());
    }

    #[test]
    fn test_email_pattern() {
        let re = compile("email", "email").unwrap();
        assert!(re.is_match("a@b.com"));
        assert!(re.is_match("first.last+tag@example.co.uk"));
        assert!(!re.is_match("not-an-email"));
        assert!(!re.is_match("a@"));
    }

    #[test]
    fn test_date_pattern_is_ascii_only() {
        let re = compile("day", "date").unwrap();
        assert!(re.is_match("2024-01-31"));
        assert!(!re.is_match("٢٠٢٤-01-01"));
        assert!(!re.is_match("2024-13-01"));
    }

    #[test]
    fn test_bad_pattern_is_structural_error() {
        let err = compile("code", "([a-z").unwrap_err();
        assert_eq!(err.code(), "CHECK_INVALID_PATTERN");
        assert!(!err.is_violation());
        assert!(err.to_string().contains("code"));
    }
}
