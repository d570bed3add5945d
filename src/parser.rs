use chrono::NaiveDate;

use crate::layout::Layout;
use crate::models::Transaction;

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

/// Parse a dot-delimited day-first date: "31.3.2016". Exactly three numeric
/// parts forming a real calendar date, or nothing.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a comma-decimal amount: "-40,50". Blank and non-numeric fields give
/// nothing rather than zero, so they can be told apart from a real 0.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let parsed: f64 = raw.replace(',', ".").parse().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}

fn field<'a>(columns: &[&'a str], idx: usize) -> &'a str {
    columns.get(idx).copied().unwrap_or("")
}

/// First candidate column with any content, trimmed and lower-cased.
fn counterparty(layout: &Layout, columns: &[&str]) -> Option<String> {
    for &idx in layout.counterparty_columns {
        let name = field(columns, idx).trim();
        if !name.is_empty() {
            return Some(name.to_lowercase());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Row scanning
// ---------------------------------------------------------------------------

pub struct ParseOutcome {
    pub transactions: Vec<Transaction>,
    pub rows_total: usize,
}

/// Run a whole export through the layout's row/column conventions, keeping
/// the rows that survive validation. Header lines, balance rows and other
/// junk are dropped without comment; the caller only learns the counts.
pub fn parse_transactions(layout: &Layout, text: &str) -> ParseOutcome {
    let mut transactions = Vec::new();
    let mut rows_total = 0;

    for row in layout.split_rows(text) {
        rows_total += 1;
        let columns = layout.split_columns(row);
        let Some(date) = parse_date(field(&columns, layout.date_column)) else {
            continue;
        };
        let Some(amount) = parse_amount(field(&columns, layout.amount_column)) else {
            continue;
        };
        if amount == 0.0 {
            continue;
        }
        let Some(counterparty) = counterparty(layout, &columns) else {
            continue;
        };
        transactions.push(Transaction::new(date, amount, counterparty));
    }

    ParseOutcome {
        transactions,
        rows_total,
    }
}
