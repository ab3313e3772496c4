use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use lateral_core::LateralError;

fn main() {
    // Initialize logging with LATERAL_LOG environment variable support
    let log_level = std::env::var("LATERAL_LOG").unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<LateralError>() {
            Some(LateralError::Configuration(_)) => 2,
            Some(LateralError::Io(_)) => 3,
            Some(LateralError::Parse(_)) => 4,
            Some(LateralError::Tool(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose > 0;

    match cli.command {
        Commands::Run(args) => crate::cli::commands::run::run(args, verbose),
        Commands::Launch(args) => crate::cli::commands::launch::run(args, verbose),
        Commands::Tools(args) => crate::cli::commands::tools::run(args),
        Commands::Select(args) => crate::cli::commands::select::run(args),
    }
}
