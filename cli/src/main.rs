mod artifact;
mod cli;
mod deploy;
mod error;
mod progress;
mod ui;
mod version;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Artifact { options, operation } => artifact::execute(options, operation),
        Commands::Deploy { verbose } => deploy::execute(verbose),
        Commands::Revert { verbose } => deploy::revert(verbose),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
