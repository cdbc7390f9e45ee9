//! The koans command-line interface.
//!
//! Discovery, execution and reporting run in that order. Exit status is `0`
//! once enlightenment is reached, `1` when the path halts at a koan or lesson,
//! and `2` when the harness itself is misconfigured.

use std::process::ExitCode;

use clap::Parser;
use termcolor::StandardStream;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::args::KoansArgs;
use crate::cli::output::Sensei;
use crate::config::KoansConfig;
use crate::diagnostics::KoanError;
use crate::{discovery, engine, lessons};

pub mod args;
pub mod output;

/// Exit status when the path halts before enlightenment.
pub const EXIT_HALTED: u8 = 1;
/// Exit status for harness and configuration faults.
pub const EXIT_FATAL: u8 = 2;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "KOANS_LOG";

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = KoansArgs::parse();
    init_tracing(args.verbose);

    match execute(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn execute(args: &KoansArgs) -> Result<ExitCode, KoanError> {
    let mut config = KoansConfig::load_or_default(args.config.as_deref())?;
    if let Some(color) = args.color {
        config.color = color;
    }
    if args.no_source {
        config.show_source = false;
    }
    debug!(?config, "resolved config");

    let curriculum = lessons::curriculum();
    let discovery = discovery::discover(&curriculum, &config)?;
    let sensei = Sensei::new(config.show_source);
    let mut stdout = StandardStream::stdout(config.color.choice());

    if args.list {
        sensei.list(&discovery, &mut stdout)?;
        return Ok(match discovery.obstacle {
            Some(_) => ExitCode::from(EXIT_HALTED),
            None => ExitCode::SUCCESS,
        });
    }

    let result = engine::run_discovery(&discovery);
    sensei.report(&result, &mut stdout)?;
    Ok(if result.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_HALTED)
    })
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "koans=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
