//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// caseclean: data-quality gate for case-record extracts
#[derive(Parser)]
#[command(name = "caseclean")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full cleaning pipeline and write the cleaned table
    Clean {
        /// Path to the raw extract (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the cleaned table (default: <file>_cleaned.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Date columns to validate (comma-separated)
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = [
                "registrationdate".to_string(),
                "date_received_in_opg".to_string(),
            ]
        )]
        date_columns: Vec<String>,

        /// Start column for the delay computation
        #[arg(long, default_value = "registrationdate")]
        start_column: String,

        /// End column for the delay computation
        #[arg(long, default_value = "date_received_in_opg")]
        end_column: String,

        /// Columns forming the composite key (comma-separated)
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = ["case_no".to_string(), "unique_id".to_string()]
        )]
        key_columns: Vec<String>,

        /// Print the cleaning report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize an extract without modifying anything
    Inspect {
        /// Path to the extract (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the inclusive month range between two YYYY-MM specifiers
    Months {
        /// First month (YYYY-MM)
        #[arg(value_name = "START")]
        start: String,

        /// Last month (YYYY-MM)
        #[arg(value_name = "END")]
        end: String,
    },
}
