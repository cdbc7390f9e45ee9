//! Assertions available inside koan bodies.
//!
//! Every assertion is `#[track_caller]`, so a failure points at the line in
//! the lesson the learner has to edit rather than at this module.

use std::fmt::{Debug, Display};
use std::panic::Location;

use regex::Regex;

use super::{panic as capture, AssertionFailure, ExecutionError, Interruption, KoanResult};

/// Passes when `expected == actual`.
///
/// Values are compared through `PartialEq`, so two sets built from literals
/// in different orders are equal.
#[track_caller]
pub fn assert_equal<E, A>(expected: E, actual: A) -> KoanResult
where
    E: PartialEq<A> + Debug,
    A: Debug,
{
    if expected == actual {
        return Ok(());
    }
    fail(
        AssertionFailure::new(format!("expected {expected:?}, got {actual:?}"))
            .with_values(format!("{expected:#?}"), format!("{actual:#?}")),
    )
}

/// Passes when `unexpected != actual`.
#[track_caller]
pub fn assert_not_equal<E, A>(unexpected: E, actual: A) -> KoanResult
where
    E: PartialEq<A> + Debug,
    A: Debug,
{
    if unexpected != actual {
        return Ok(());
    }
    fail(AssertionFailure::new(format!(
        "expected anything but {unexpected:?}, got {actual:?}"
    )))
}

/// Passes when `pattern` is found anywhere in the string form of `actual`.
///
/// This is a search, not a full match: `"foo"` is found in `"foobar"`.
#[track_caller]
pub fn assert_match<P, A>(pattern: P, actual: A) -> KoanResult
where
    P: AsRef<str>,
    A: Display,
{
    let location = Location::caller();
    let pattern = pattern.as_ref();
    let regex = Regex::new(pattern).map_err(|err| {
        Interruption::Execution(
            ExecutionError::new(format!("invalid pattern {pattern:?}: {err}")).at(location),
        )
    })?;
    let text = actual.to_string();
    if regex.is_match(&text) {
        return Ok(());
    }
    Err(Interruption::Assertion(
        AssertionFailure::new(format!("pattern {pattern:?} not found in {text:?}"))
            .with_values(pattern, text)
            .at(location),
    ))
}

#[track_caller]
pub fn assert_true(value: bool) -> KoanResult {
    if value {
        return Ok(());
    }
    fail(AssertionFailure::new("expected true, got false").with_values("true", "false"))
}

#[track_caller]
pub fn assert_false(value: bool) -> KoanResult {
    if !value {
        return Ok(());
    }
    fail(AssertionFailure::new("expected false, got true").with_values("false", "true"))
}

/// Passes when `f` panics with a message in which `pattern` is found.
///
/// The panic is contained: it never reaches the engine and is not printed.
#[track_caller]
pub fn assert_panics<P, F, R>(pattern: P, f: F) -> KoanResult
where
    P: AsRef<str>,
    F: FnOnce() -> R,
{
    let location = Location::caller();
    match capture::catch(f) {
        Ok(_) => Err(Interruption::Assertion(
            AssertionFailure::new("expected a panic, but the code finished normally")
                .at(location),
        )),
        Err(panicked) => assert_match(pattern, panicked.message).map_err(|interruption| {
            relocate(interruption, location)
        }),
    }
}

#[track_caller]
fn fail(failure: AssertionFailure) -> KoanResult {
    Err(Interruption::Assertion(failure.at(Location::caller())))
}

fn relocate(interruption: Interruption, location: &Location<'_>) -> Interruption {
    match interruption {
        Interruption::Assertion(failure) => Interruption::Assertion(failure.at(location)),
        Interruption::Execution(error) => Interruption::Execution(error.at(location)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;
    use crate::koan::__;

    fn failure(result: KoanResult) -> AssertionFailure {
        match result {
            Err(Interruption::Assertion(failure)) => failure,
            other => panic!("expected assertion failure, got {other:?}"),
        }
    }

    #[test]
    fn pattern_is_searched_not_fully_matched() {
        assert!(assert_match("foo", "foobar").is_ok());
        let failure = failure(assert_match("foo", "bar"));
        assert_eq!(failure.expected.as_deref(), Some("foo"));
        assert_eq!(failure.actual.as_deref(), Some("bar"));
    }

    #[test]
    fn equal_sets_from_different_literal_orders_pass() {
        let left: HashSet<_> = ["MacLeod", "Ramirez", "Malcolm"].into_iter().collect();
        let right: HashSet<_> = ["Malcolm", "MacLeod", "Ramirez"].into_iter().collect();
        assert!(assert_equal(left, right).is_ok());
    }

    #[test]
    fn unequal_values_name_both_sides() {
        let failure = failure(assert_equal(
            BTreeSet::from([1, 2]),
            BTreeSet::from([2, 3]),
        ));
        assert!(failure.message.contains("{1, 2}"), "{}", failure.message);
        assert!(failure.message.contains("{2, 3}"), "{}", failure.message);
    }

    #[test]
    fn failures_point_at_the_calling_line() {
        let line = line!() + 1;
        let failure = failure(assert_true(false));
        let location = failure.location.expect("location");
        assert_eq!(location.line, line);
        assert!(location.file.ends_with("assertions.rs"));
    }

    #[test]
    fn blanks_fail_every_comparison() {
        let failure = failure(assert_equal(__, 4));
        assert!(failure.message.contains("FILL ME IN"));
        assert!(assert_match(__, "anything").is_err());
    }

    #[test]
    fn blank_pattern_only_finds_its_own_text() {
        assert!(assert_match(__, "the path is long").is_err());
        assert!(assert_match(__, crate::koan::FILL_ME_IN).is_ok());
    }

    #[test]
    fn invalid_patterns_are_execution_errors() {
        match assert_match("(", "x") {
            Err(Interruption::Execution(error)) => {
                assert!(error.message.contains("invalid pattern"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn panics_are_matched_against_their_message() {
        let none: Option<u8> = None;
        assert!(assert_panics("None", move || none.unwrap()).is_ok());
        assert!(assert_panics("borrowed", || 1 + 1).is_err());
        assert!(assert_panics("elsewhere", || -> () { panic!("here") }).is_err());
    }

    #[test]
    fn not_equal_passes_on_different_values() {
        assert!(assert_not_equal(1, 2).is_ok());
        assert!(assert_not_equal("a", "a").is_err());
    }
}
