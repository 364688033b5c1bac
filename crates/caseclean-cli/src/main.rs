//! caseclean CLI - data-quality gate for case-record extracts.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            date_columns,
            start_column,
            end_column,
            key_columns,
            json,
        } => commands::clean::run(
            file,
            output,
            date_columns,
            start_column,
            end_column,
            key_columns,
            json,
            cli.verbose,
        ),

        Commands::Inspect { file, json } => commands::inspect::run(file, json),

        Commands::Months { start, end } => commands::months::run(&start, &end),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
