use colored::Colorize;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::error::Result;
use crate::report::{self, Report, MIN_SECTIONS_FOR_AVERAGE};
use crate::section::{RankedEntry, Section, SummaryLine};

struct Limits {
    counts: usize,
    gains: usize,
    spends: usize,
}

/// Ranked-list lengths for the compact per-month blocks.
const COMPACT: Limits = Limits { counts: 3, gains: 3, spends: 3 };
/// Ranked-list lengths for the detailed average/total blocks.
const DETAILED: Limits = Limits { counts: 5, gains: 10, spends: 10 };

pub fn run(file: &str, full: bool, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let report = report::build(&text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        println!("{}", format_report(&report, full));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Text rendering (report data → String)
// ---------------------------------------------------------------------------

pub fn format_report(report: &Report, full: bool) -> String {
    let mut out = format_overview(report);

    if full {
        for section in &report.sections {
            out.push_str("\n\n");
            out.push_str(&format_section(section, false));
        }
    }

    out.push_str("\n\n");
    match &report.average {
        Some(average) => out.push_str(&format_section(average, true)),
        None => out.push_str(&format!(
            "Need at least {MIN_SECTIONS_FOR_AVERAGE} months of transactions to compute a monthly average."
        )),
    }

    out.push_str("\n\n");
    out.push_str(&format_section(&report.total, true));

    let footer = format!(
        "{} layout, {} of {} rows used",
        report.layout, report.rows_valid, report.rows_total
    );
    out.push_str(&format!("\n\n{}", footer.dimmed()));
    out
}

/// One row per month: the at-a-glance overview table.
fn format_overview(report: &Report) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Gains", "Spends", "Net", "Txns"]);
    for section in &report.sections {
        let net = section.totals_summary().sum;
        let net = if section.sum_total >= 0.0 {
            net.green().to_string()
        } else {
            net.red().to_string()
        };
        table.add_row(vec![
            Cell::new(&section.name),
            Cell::new(section.gains_summary().sum),
            Cell::new(section.spends_summary().sum),
            Cell::new(net),
            Cell::new(section.items.len()),
        ]);
    }
    format!("Months\n{table}")
}

/// A month or synthetic section as an indented block. Compact blocks keep
/// the top lists short and inline; detailed blocks list one counterparty
/// per line.
fn format_section(section: &Section, detailed: bool) -> String {
    let limits = if detailed { DETAILED } else { COMPACT };

    let mut out = section.name.bold().to_string();
    out.push_str(&format!("\n  {}", summary_line(&section.gains_summary()).green()));
    out.push_str(&format!("\n  {}", summary_line(&section.spends_summary()).red()));
    out.push_str(&format!("\n  {}", summary_line(&section.totals_summary()).bold()));

    out.push_str(&format_ranked(
        "Most transactions with",
        &section.top_by_count(Some(limits.counts)),
        detailed,
    ));
    out.push_str(&format_ranked(
        "Most gained from",
        &section.top_by_gain(Some(limits.gains)),
        detailed,
    ));
    out.push_str(&format_ranked(
        "Most spent to",
        &section.top_by_spend(Some(limits.spends)),
        detailed,
    ));
    out
}

fn summary_line(line: &SummaryLine) -> String {
    format!("{}: {} e ({})", line.name, line.sum, line.count)
}

fn format_ranked(title: &str, entries: &[RankedEntry], detailed: bool) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({})", e.key, e.value))
        .collect();
    if detailed {
        format!("\n  {title}:\n    {}", rendered.join("\n    "))
    } else {
        format!("\n  {title}: {}", rendered.join(", "))
    }
}

// ---------------------------------------------------------------------------
// JSON rendering
// ---------------------------------------------------------------------------

fn report_json(report: &Report) -> serde_json::Value {
    json!({
        "layout": report.layout,
        "rows_total": report.rows_total,
        "rows_valid": report.rows_valid,
        "sections": report.sections.iter().map(section_json).collect::<Vec<_>>(),
        "average": report.average.as_ref().map(section_json),
        "total": section_json(&report.total),
    })
}

fn section_json(section: &Section) -> serde_json::Value {
    json!({
        "name": section.name,
        "gains": section.gains_summary(),
        "spends": section.spends_summary(),
        "totals": section.totals_summary(),
        "top_counts": section.top_by_count(None),
        "top_gains": section.top_by_gain(None),
        "top_spends": section.top_by_spend(None),
    })
}
