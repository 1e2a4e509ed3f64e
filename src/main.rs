//! Designlint - design review and pre-mortem analysis CLI

use clap::Parser;
use designlint::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let args = cli::Cli::parse();

    // RUST_LOG overrides the --log-level flag
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    std::process::exit(cli::run(args));
}
