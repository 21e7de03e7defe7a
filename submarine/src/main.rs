mod application;
mod presentation;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use presentation::cli::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match application::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("submarine: {e}");
            ExitCode::FAILURE
        }
    }
}
