#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! sublime — enrich, analyze and query email artifacts with the Sublime API.

mod api;
mod cli;
mod commands;
mod config;
mod format;
mod pipeline;

use std::io::IsTerminal;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use api::HttpConnector;
use cli::Cli;
use config::{ConfigSource, DEFAULT_API_URL, FileConfigStore};
use pipeline::{Pipeline, REPORT_TARGET, TracingReporter};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("warning: {err:#}");
    }

    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let store = FileConfigStore::default_location();
    let api_url = store
        .load()
        .map_or_else(|_| DEFAULT_API_URL.to_owned(), |c| c.api_url().to_owned());
    let connector = HttpConnector::new(&api_url);
    let reporter = TracingReporter;
    let prog = Cli::command().get_name().to_owned();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Pipeline::new(&store, &connector, &reporter, &mut out, prog)
        .verbose(cli.verbose)
        .execute(&cli.command)
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
/// API failures are always shown.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let report_floor: Directive = format!("{REPORT_TARGET}=error")
        .parse()
        .context("invalid report directive")?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?
        .add_directive(report_floor);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise logging")
}
