//! ASF tag editor CLI.

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity.tracing_level_filter());
    let result = match cli.command {
        Command::Show(args) => commands::run_show(&args),
        Command::Get(args) => commands::run_get(&args),
        Command::Set(args) => commands::run_set(&args),
        Command::Remove(args) => commands::run_remove(&args),
    };
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Initialize tracing output on stderr. `RUST_LOG` overrides the
/// verbosity flags when set.
fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},asf_tag={level},asf_cli={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
