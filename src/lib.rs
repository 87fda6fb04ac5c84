//! dupelink - duplicate file finder and hard-link deduplicator
//!
//! Walks one or more directory trees, fingerprints file contents with a keyed
//! 256-bit HighwayHash, reports every later copy of an already-seen file, and
//! can optionally replace those copies with hard links to the first one.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod scanner;

use std::io::{self, BufWriter};

use anyhow::Context;
use clap::CommandFactory;

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;

/// Run the application for already-parsed arguments.
///
/// Initializes logging, prints usage when no roots were given, and otherwise
/// runs the duplicate finder with the listing on stdout.
///
/// # Errors
///
/// Returns an error if the usage text or the report cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.dirs.is_empty() {
        Cli::command()
            .print_help()
            .context("failed to print usage")?;
        println!();
        return Ok(ExitCode::Success);
    }

    let config = RunConfig::from(&cli);
    log::debug!("Run configuration: {:?}", config);
    if config.min_size > config.max_size {
        log::warn!(
            "Minimum size {} exceeds maximum size {}; no file can match",
            config.min_size,
            config.max_size
        );
    }

    let finder = DuplicateFinder::new(config);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    finder.run(&mut out).context("duplicate scan failed")?;

    Ok(ExitCode::Success)
}
