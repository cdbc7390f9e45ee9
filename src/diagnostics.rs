//! Unified, `miette`-based diagnostics for the koans harness.
//!
//! Errors fall into two families that are never mixed:
//!
//! - [`KoanError`]: faults in the harness or its configuration (malformed
//!   lesson keys, duplicate ranks, an unreadable `koans.yaml`). These abort
//!   the run before any koan executes and are rendered through
//!   [`miette::Report`] on stderr.
//! - [`LoadError`]: a single lesson could not be brought onto the path.
//!   These are obstacles for the learner, stop discovery at that lesson, and
//!   surface in the regular report like any failing koan.
//!
//! Failures raised inside a koan body live next to the assertions in
//! [`crate::koan`].

use miette::Diagnostic;
use thiserror::Error;

/// Fatal harness or configuration fault.
#[derive(Debug, Error, Diagnostic)]
pub enum KoanError {
    #[error("lesson key '{key}' does not start with a numeric rank")]
    #[diagnostic(
        code(koans::config::missing_rank),
        help("lesson keys look like `02_about_sets`: a rank, an underscore, then the name")
    )]
    MissingRank { key: String },

    #[error("lesson key '{key}' has no name after its rank")]
    #[diagnostic(code(koans::config::missing_name))]
    MissingName { key: String },

    #[error("lessons '{first}' and '{second}' share rank {rank}")]
    #[diagnostic(
        code(koans::config::duplicate_rank),
        help("every lesson needs its own rank so the path has exactly one order")
    )]
    DuplicateRank {
        rank: u32,
        first: String,
        second: String,
    },

    #[error("lesson name '{name}' is registered more than once")]
    #[diagnostic(code(koans::config::duplicate_name))]
    DuplicateName { name: String },

    #[error("the lesson manifest names '{name}', which is not part of the curriculum")]
    #[diagnostic(
        code(koans::config::unknown_lesson),
        help("run `koans --list` to see the lessons that exist")
    )]
    UnknownLesson { name: String },

    #[error("failed to read config file '{path}'")]
    #[diagnostic(code(koans::config::io))]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config file '{path}' is not valid")]
    #[diagnostic(
        code(koans::config::parse),
        help("known keys are `lessons`, `color` and `show_source`")
    )]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write the report")]
    #[diagnostic(code(koans::internal::output))]
    Output(#[from] std::io::Error),
}

/// A lesson that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LoadError {
    #[error("lesson '{lesson}' declares no koans")]
    #[diagnostic(code(koans::load::empty))]
    Empty { lesson: String },

    #[error("lesson '{lesson}' cannot order its koans: {reason}")]
    #[diagnostic(
        code(koans::load::ambiguous_order),
        help("each koan needs a distinct, non-zero sequence number and a distinct name")
    )]
    AmbiguousOrder { lesson: String, reason: String },

    #[error("lesson '{lesson}' failed to load: {message}")]
    #[diagnostic(code(koans::load::broken))]
    Broken { lesson: String, message: String },
}

impl LoadError {
    /// Name of the lesson that failed to load.
    pub fn lesson(&self) -> &str {
        match self {
            LoadError::Empty { lesson }
            | LoadError::AmbiguousOrder { lesson, .. }
            | LoadError::Broken { lesson, .. } => lesson,
        }
    }
}
