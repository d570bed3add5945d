pub mod inspect;
pub mod report;
pub mod sample;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "tili", about = "Monthly summaries for Nordea and OP bank transaction exports.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an export file and print the monthly report.
    Report {
        /// Path to the exported transaction file
        file: String,
        /// Print per-month counterparty rankings, not just the overview
        #[arg(long)]
        full: bool,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show which layout a file uses and how much of it parses.
    Inspect {
        /// Path to the exported transaction file
        file: String,
    },
    /// Print a synthetic export for trying the tool without real bank data.
    Sample {
        /// Number of months to generate, ending at the current month (1 to 1200)
        #[arg(long, default_value_t = 7)]
        months: u32,
        /// Export layout to emit: nordea or op
        #[arg(long, default_value = "nordea")]
        layout: String,
    },
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
