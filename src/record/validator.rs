//! Positional argument validation
//!
//! Every operation receives a flat, ordered list of strings. Checks run in a fixed
//! order: argument count first, then non-emptiness left to right. The first failure
//! short-circuits.

use super::errors::{RecordError, RecordResult};

/// Requires exactly `expected` arguments
pub fn expect_exactly(args: &[String], expected: usize, expecting: &str) -> RecordResult<()> {
    if args.len() != expected {
        return Err(RecordError::argument_count(expecting));
    }
    Ok(())
}

/// Requires at least `minimum` arguments; extras are ignored by the caller
pub fn expect_at_least(args: &[String], minimum: usize, expecting: &str) -> RecordResult<()> {
    if args.len() < minimum {
        return Err(RecordError::argument_count(expecting));
    }
    Ok(())
}

/// Requires the first `count` arguments to be non-empty
pub fn require_non_empty(args: &[String], count: usize) -> RecordResult<()> {
    match args.iter().take(count).position(|a| a.is_empty()) {
        Some(index) => Err(RecordError::argument_empty(index + 1)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_count() {
        assert!(expect_exactly(&args(&["a"]), 1, "Expecting 1").is_ok());
        let err = expect_exactly(&args(&["a", "b"]), 1, "Expecting 1").unwrap_err();
        assert!(matches!(err, RecordError::ArgumentCount { .. }));
    }

    #[test]
    fn test_at_least_ignores_extras() {
        assert!(expect_at_least(&args(&["a", "b", "c"]), 1, "Expecting 1").is_ok());
        assert!(expect_at_least(&args(&[]), 1, "Expecting 1").is_err());
    }

    #[test]
    fn test_first_empty_argument_reported() {
        let err = require_non_empty(&args(&["a", "", "c", ""]), 4).unwrap_err();
        assert_eq!(err, RecordError::argument_empty(2));
    }

    #[test]
    fn test_only_checks_requested_prefix() {
        assert!(require_non_empty(&args(&["a", ""]), 1).is_ok());
    }
}
