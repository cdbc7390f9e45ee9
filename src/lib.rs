//! Koans: a path to enlightenment, one failing assertion at a time.
//!
//! Lessons are discovered in rank order ([`discovery`]), walked koan by koan
//! until the first one that does not pass ([`engine`]), and reported back to
//! the learner ([`cli::output`]).

pub use crate::diagnostics::{KoanError, LoadError};
pub use crate::engine::{run, run_discovery, RunResult};

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod engine;
pub mod koan;
pub mod lessons;

pub mod prelude {
    pub use crate::koan::{
        __, assert_equal, assert_false, assert_match, assert_not_equal, assert_panics,
        assert_true, Case, KoanResult,
    };
    pub use crate::koans;
}
