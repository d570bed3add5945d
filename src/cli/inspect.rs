use colored::Colorize;

use crate::error::{Result, TiliError};
use crate::layout;
use crate::parser;
use crate::report;

/// Key-value rundown of a file: which layout it matches and how much of it
/// actually parses. Unlike `report`, this stays useful on a file with no
/// usable rows at all.
pub fn run(file: &str) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let detected = layout::detect(&text);
    let outcome = parser::parse_transactions(detected, &text);

    println!("File:            {file}");
    println!("Layout:          {}", detected.name);
    println!("Rows:            {}", outcome.rows_total);
    println!("Usable rows:     {}", outcome.transactions.len());
    let first = outcome.transactions.iter().map(|tx| tx.date).min();
    let last = outcome.transactions.iter().map(|tx| tx.date).max();
    if let (Some(first), Some(last)) = (first, last) {
        println!("Dates:           {first} to {last}");
    }

    match report::build(&text) {
        Ok(r) => {
            let first = &r.sections[0].name;
            let last = &r.sections[r.sections.len() - 1].name;
            println!("Months:          {} ({first} to {last})", r.sections.len());
            println!("Counterparties:  {}", r.total.counts_by_counterparty.len());
            if r.sections.len() < report::MIN_SECTIONS_FOR_AVERAGE {
                println!();
                let notice = format!(
                    "Not enough history for a monthly average (needs {} months).",
                    report::MIN_SECTIONS_FOR_AVERAGE
                );
                println!("{}", notice.yellow());
            }
        }
        Err(TiliError::NoUsableData) => {
            println!();
            println!(
                "{}",
                "No usable transactions. Is this a Nordea or OP export?".yellow()
            );
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
