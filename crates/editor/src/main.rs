// Chunk: docs/chunks/cli_harness - Inspection CLI
//!
//! markpad: inspect the editing engine from the command line.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use markpad::cli::{self, CliArgs};
use markpad::logging;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init(args.verbose);

    let config = cli::load_config(args.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(&args.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}
