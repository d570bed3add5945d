use std::collections::BTreeMap;

use crate::error::{Result, TiliError};
use crate::layout;
use crate::models::Transaction;
use crate::parser;
use crate::section::Section;

/// Months of history needed before an average month means anything.
pub const MIN_SECTIONS_FOR_AVERAGE: usize = 5;

/// Everything one pass over an export produces.
#[derive(Debug)]
pub struct Report {
    /// One section per calendar month, oldest first.
    pub sections: Vec<Section>,
    /// Per-month average over the middle months; absent with short history.
    pub average: Option<Section>,
    /// Grand total across every month.
    pub total: Section,
    /// Name of the layout the sniffer picked.
    pub layout: &'static str,
    pub rows_total: usize,
    pub rows_valid: usize,
}

/// Group valid transactions into month sections, oldest first. The month key
/// is zero-padded, so lexicographic order is chronological order.
fn bucket(transactions: Vec<Transaction>) -> Vec<Section> {
    let mut by_month: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_month.entry(tx.month_key.clone()).or_default().push(tx);
    }
    by_month
        .into_iter()
        .map(|(month, group)| Section::collect(month, group))
        .collect()
}

/// Replay every item of `sections` into one synthetic section.
fn replay(label: String, sections: &[Section]) -> Section {
    let items = sections.iter().flat_map(|s| s.items.iter().cloned());
    Section::collect(label, items)
}

fn range_label(kind: &str, sections: &[Section]) -> String {
    // callers guarantee at least one section
    let first = &sections[0].name;
    let last = &sections[sections.len() - 1].name;
    format!("{kind} from {first} to {last} ({} months)", sections.len())
}

/// Run the whole pipeline over a raw export blob: sniff the layout, parse
/// and validate rows, bucket by month, then derive the synthetic average
/// and total sections.
pub fn build(text: &str) -> Result<Report> {
    let layout = layout::detect(text);
    let outcome = parser::parse_transactions(layout, text);
    let rows_valid = outcome.transactions.len();

    let sections = bucket(outcome.transactions);
    if sections.is_empty() {
        return Err(TiliError::NoUsableData);
    }

    let average = if sections.len() >= MIN_SECTIONS_FOR_AVERAGE {
        // first and last months of an export are usually partial
        let middle = &sections[1..sections.len() - 1];
        let label = range_label("AVERAGE", middle);
        Some(replay(label, middle).with_divisor(middle.len()))
    } else {
        None
    };

    let total = replay(range_label("TOTAL", &sections), &sections);

    Ok(Report {
        sections,
        average,
        total,
        layout: layout.name,
        rows_total: outcome.rows_total,
        rows_valid,
    })
}
