//! Koans, the lessons that group them, and the ways a koan body can stop.
//!
//! A koan body is a plain function returning [`KoanResult`]. Assertions from
//! [`assertions`] return `Err(Interruption::Assertion(..))` on failure, and
//! any `std::error::Error` raised with `?` becomes an
//! [`Interruption::Execution`]. Panics are not part of this type: the engine
//! catches them separately and reports them as execution errors.

use std::fmt;
use std::panic::Location;

use thiserror::Error;

pub mod assertions;
pub(crate) mod panic;

pub use assertions::{
    assert_equal, assert_false, assert_match, assert_not_equal, assert_panics, assert_true,
};

/// Result of running a koan body.
pub type KoanResult = Result<(), Interruption>;

/// Boxed koan body.
pub type CaseBody = Box<dyn Fn() -> KoanResult>;

/// Text shown wherever the learner still has to fill something in.
pub const FILL_ME_IN: &str = "-=> FILL ME IN! <=-";

/// Placeholder the learner replaces with the right answer.
///
/// It compares unequal to every value and, used as a pattern, matches only
/// its own placeholder text, so a fresh koan compiles and fails.
#[allow(non_upper_case_globals)]
pub const __: Blank = Blank;

/// Type of the [`__`] placeholder.
#[derive(Clone, Copy, Default)]
pub struct Blank;

impl<T: ?Sized> PartialEq<T> for Blank {
    fn eq(&self, _other: &T) -> bool {
        false
    }
}

impl fmt::Debug for Blank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FILL_ME_IN)
    }
}

impl fmt::Display for Blank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FILL_ME_IN)
    }
}

impl AsRef<str> for Blank {
    fn as_ref(&self) -> &str {
        FILL_ME_IN
    }
}

// =====================
// Failure detail
// =====================

/// A `file:line:column` position in lesson source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// An equality or pattern check that did not hold.
///
/// Not a `std::error::Error`, so `?` on an `AssertionFailure` stays an
/// [`Interruption::Assertion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub location: Option<SourceLocation>,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
            location: None,
        }
    }

    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    pub fn at(mut self, location: impl Into<SourceLocation>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A koan body stopped for a reason unrelated to an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: impl Into<SourceLocation>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Describes an error together with its chain of sources.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::new(message)
    }
}

/// Why a koan body returned early.
#[derive(Debug)]
pub enum Interruption {
    Assertion(AssertionFailure),
    Execution(ExecutionError),
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interruption::Assertion(failure) => write!(f, "{failure}"),
            Interruption::Execution(error) => write!(f, "{error}"),
        }
    }
}

// `Interruption` must not implement `std::error::Error`; this blanket
// conversion overlaps the reflexive `From` otherwise.
impl<E> From<E> for Interruption
where
    E: std::error::Error + 'static,
{
    fn from(err: E) -> Self {
        Interruption::Execution(ExecutionError::from_error(&err))
    }
}

impl From<AssertionFailure> for Interruption {
    fn from(failure: AssertionFailure) -> Self {
        Interruption::Assertion(failure)
    }
}

// =====================
// Cases and lessons
// =====================

/// A single koan: a name, its position in the lesson, and its body.
pub struct Case {
    seq: u32,
    name: String,
    body: CaseBody,
}

impl Case {
    /// Creates a koan at sequence number `seq` (1-based declaration order).
    pub fn new<F>(seq: u32, name: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> KoanResult + 'static,
    {
        Self {
            seq,
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn call(&self) -> KoanResult {
        (self.body)()
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("seq", &self.seq)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A named, ordered group of koans covering one topic.
#[derive(Debug)]
pub struct Lesson {
    rank: u32,
    name: String,
    cases: Vec<Case>,
}

impl Lesson {
    /// Builds a lesson whose cases are already in execution order.
    pub fn new(rank: u32, name: impl Into<String>, cases: Vec<Case>) -> Self {
        Self {
            rank,
            name: name.into(),
            cases,
        }
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Collects koan functions into cases numbered in declaration order.
///
/// ```
/// use koans::koan::{assert_true, KoanResult};
///
/// fn first() -> KoanResult { assert_true(true) }
/// fn second() -> KoanResult { assert_true(true) }
///
/// let cases = koans::koans![first, second];
/// assert_eq!(cases[1].seq(), 2);
/// assert_eq!(cases[1].name(), "second");
/// ```
#[macro_export]
macro_rules! koans {
    ($($name:ident),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut cases: ::std::vec::Vec<$crate::koan::Case> = ::std::vec::Vec::new();
        $(
            let seq = cases.len() as u32 + 1;
            cases.push($crate::koan::Case::new(seq, stringify!($name), $name));
        )*
        cases
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes() -> KoanResult {
        Ok(())
    }

    fn also_passes() -> KoanResult {
        Ok(())
    }

    #[test]
    fn macro_numbers_cases_in_declaration_order() {
        let cases = crate::koans![also_passes, passes];
        let listed: Vec<_> = cases.iter().map(|c| (c.seq(), c.name())).collect();
        assert_eq!(listed, vec![(1, "also_passes"), (2, "passes")]);
    }

    #[test]
    fn blank_never_equals_anything() {
        assert!(__ != 0);
        assert!(__ != "-=> FILL ME IN! <=-");
        assert!(__ != true);
        assert_eq!(format!("{:?}", __), FILL_ME_IN);
    }

    #[test]
    fn question_mark_turns_errors_into_execution_interruptions() {
        fn parse() -> KoanResult {
            let _: i32 = "forty-two".parse()?;
            Ok(())
        }
        match parse() {
            Err(Interruption::Execution(e)) => assert!(e.message.contains("invalid digit")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn question_mark_keeps_assertion_failures_as_assertions() {
        fn helper() -> Result<(), AssertionFailure> {
            Err(AssertionFailure::new("nope").with_values("1", "2"))
        }
        fn body() -> KoanResult {
            helper()?;
            Ok(())
        }
        match body() {
            Err(Interruption::Assertion(failure)) => {
                assert_eq!(failure.message, "nope");
                assert_eq!(failure.expected.as_deref(), Some("1"));
                assert_eq!(failure.actual.as_deref(), Some("2"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
