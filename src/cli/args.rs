//! Defines the command-line arguments for the koans CLI.
//!
//! Every argument is optional: running `koans` with no arguments walks the
//! whole path from the first lesson.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ColorMode;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "koans",
    version,
    about = "Walk the path to enlightenment, one failing koan at a time."
)]
pub struct KoansArgs {
    /// Config file to use instead of `koans.yaml` in the working directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// When to color the report.
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Do not print the offending source lines.
    #[arg(long)]
    pub no_source: bool,

    /// List the lessons on the path and exit.
    #[arg(long)]
    pub list: bool,

    /// Log discovery and execution to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
