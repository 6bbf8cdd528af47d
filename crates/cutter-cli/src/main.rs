//! Cutter CLI
//!
//! Switches version-conditional comment blocks in source trees.

mod cli;
mod commands;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run(args) => commands::run_task(&args),
        Commands::File {
            path,
            target,
            scheme,
            debug,
        } => commands::run_file(&path, &target, scheme, debug),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "cutter", &mut std::io::stdout());
            Ok(())
        }
    }
}
