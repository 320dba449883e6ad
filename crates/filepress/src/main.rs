use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::App;

mod cli;
mod config;
mod report;

const DEFAULT_FILTER: &str = "filepress=info,filepress_archive=info,filepress_store=warn";

fn main() -> ExitCode {
    let app = App::parse();
    init_tracing(app.verbose);

    match cli::run(app) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `fetch` can stream artifacts on stdout.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("FILEPRESS_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        1 => EnvFilter::new("filepress=debug,filepress_archive=debug,filepress_store=debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
