//! # Strut CLI
//!
//! Command-line front end over `strut_core`: buckling load predictions,
//! mechanics reports, chart series and configuration files.
//!
//! Errors are printed to stderr as JSON and the process exits with status 1.

mod cli;
mod commands;
mod error;
mod logging;

use std::io::{self, Write};

use clap::Parser;
use tracing::{debug, error};

use crate::cli::{Cli, Commands};
use crate::error::Result;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("{}", e.to_json());
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        error!("Command failed: {}", e);
        let json = serde_json::to_string_pretty(&e.to_json()).unwrap_or_else(|_| e.to_string());
        eprintln!("{}", json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    debug!("Parsed arguments: {:?}", &cli);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Predict(args) => commands::predict(args, &mut out)?,
        Commands::Mechanics(args) => commands::mechanics(args, &mut out)?,
        Commands::Section(args) => commands::section(args, &mut out)?,
        Commands::Curve(args) => commands::curve(args, &mut out)?,
        Commands::InitConfig(args) => commands::init_config(args, &mut out)?,
        Commands::LocateModel(args) => commands::locate_model(args, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
