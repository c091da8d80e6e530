//! docmd - Command-line tool for generating Markdown API documentation.
//!
//! This binary documents a module from its introspection snapshot: docstrings, signatures,
//! submodules, class hierarchies and generic parameters are rendered as Markdown.
//!
//! # Usage
//!
//! ```bash
//! docmd [OPTIONS] <MODULE>
//! ```
//!
//! # Examples
//!
//! Print documentation for a package to stdout:
//! ```bash
//! docmd mypkg -p ./snapshots
//! ```
//!
//! Write one file per module, with source links:
//! ```bash
//! docmd mypkg -p ./snapshots -o docs -u https://github.com/me/mypkg/blob/main
//! ```
//!
//! Enable debug logging:
//! ```bash
//! docmd mypkg --debug
//! ```

use anyhow::Result;
use clap::Parser;
use docmd::cli;
use log::info;

fn main() -> Result<()> {
    // Parse first so the debug flag can pick the log level
    let args = cli::CliArgs::parse();

    let log_level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("docmd starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    Ok(())
}
