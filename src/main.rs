mod cli;
mod error;
mod fmt;
mod layout;
mod models;
mod parser;
mod report;
mod section;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report { file, full, json } => cli::report::run(&file, full, json),
        Commands::Inspect { file } => cli::inspect::run(&file),
        Commands::Sample { months, layout } => cli::sample::run(months, &layout),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tili", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
