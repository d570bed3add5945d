use std::collections::BTreeMap;

use serde::Serialize;

use crate::fmt;
use crate::models::Transaction;

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// All transactions sharing one grouping key (a calendar month, or one of the
/// synthetic "average"/"total" groupings), folded into running sums and
/// per-counterparty tallies. A counterparty with both gains and spends keeps
/// an entry in both sum maps; the two directions are never netted.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    /// Source order, not sorted.
    pub items: Vec<Transaction>,
    pub sum_total: f64,
    pub sum_gains: f64,
    pub sum_spends: f64,
    pub counts_by_counterparty: BTreeMap<String, usize>,
    pub gain_sums_by_counterparty: BTreeMap<String, f64>,
    pub spend_sums_by_counterparty: BTreeMap<String, f64>,
    /// Months folded into this section. Summaries and ranked values divide
    /// by it, which is how the synthetic average reports per-month figures.
    /// 1 everywhere else.
    pub divisor: usize,
}

/// One formatted summary row: a label, a summed amount and the number of
/// transactions behind it, already carrying the rendering contract (sums
/// with two decimals, counts with one).
#[derive(Debug, Clone, Serialize)]
pub struct SummaryLine {
    pub name: &'static str,
    pub sum: String,
    pub count: String,
}

/// A counterparty and its formatted value in one of the top lists.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub value: String,
}

impl Section {
    /// Fold transactions into a finished section. Sections are read-only
    /// once built; the synthetic ones replay cloned items from the ordinary
    /// ones, so nothing is shared between them.
    pub fn collect(name: String, transactions: impl IntoIterator<Item = Transaction>) -> Self {
        let mut section = Section {
            name,
            items: Vec::new(),
            sum_total: 0.0,
            sum_gains: 0.0,
            sum_spends: 0.0,
            counts_by_counterparty: BTreeMap::new(),
            gain_sums_by_counterparty: BTreeMap::new(),
            spend_sums_by_counterparty: BTreeMap::new(),
            divisor: 1,
        };
        for tx in transactions {
            section.add(tx);
        }
        section
    }

    pub fn with_divisor(mut self, divisor: usize) -> Self {
        self.divisor = divisor;
        self
    }

    fn add(&mut self, tx: Transaction) {
        self.sum_total += tx.amount;
        *self
            .counts_by_counterparty
            .entry(tx.counterparty.clone())
            .or_default() += 1;
        if tx.is_gain() {
            self.sum_gains += tx.amount;
            *self
                .gain_sums_by_counterparty
                .entry(tx.counterparty.clone())
                .or_default() += tx.amount;
        } else {
            self.sum_spends += tx.amount;
            *self
                .spend_sums_by_counterparty
                .entry(tx.counterparty.clone())
                .or_default() += tx.amount;
        }
        self.items.push(tx);
    }

    fn gain_count(&self) -> usize {
        self.items.iter().filter(|tx| tx.is_gain()).count()
    }

    fn spend_count(&self) -> usize {
        self.items.len() - self.gain_count()
    }

    // -----------------------------------------------------------------------
    // Summaries
    // -----------------------------------------------------------------------

    pub fn gains_summary(&self) -> SummaryLine {
        self.summary("Gains", self.sum_gains, self.gain_count())
    }

    pub fn spends_summary(&self) -> SummaryLine {
        self.summary("Spends", self.sum_spends, self.spend_count())
    }

    pub fn totals_summary(&self) -> SummaryLine {
        self.summary("TOTAL", self.sum_total, self.items.len())
    }

    fn summary(&self, name: &'static str, sum: f64, count: usize) -> SummaryLine {
        let divisor = self.divisor as f64;
        SummaryLine {
            name,
            sum: fmt::sum(sum / divisor),
            count: fmt::count(count as f64 / divisor),
        }
    }

    // -----------------------------------------------------------------------
    // Rankings
    // -----------------------------------------------------------------------

    /// Counterparties by number of transactions, busiest first. Ties keep the
    /// alphabetical order of the underlying map, so results are stable.
    pub fn top_by_count(&self, limit: Option<usize>) -> Vec<RankedEntry> {
        let divisor = self.divisor as f64;
        let mut ranked: Vec<(&String, usize)> =
            self.counts_by_counterparty.iter().map(|(k, &v)| (k, v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let mut entries: Vec<RankedEntry> = ranked
            .into_iter()
            .map(|(key, count)| RankedEntry {
                key: key.clone(),
                value: fmt::count(count as f64 / divisor),
            })
            .collect();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }

    /// Counterparties by money received, largest first. Entries whose
    /// per-month value rounds to 0.00 are dropped instead of being shown as
    /// zero rows.
    pub fn top_by_gain(&self, limit: Option<usize>) -> Vec<RankedEntry> {
        self.top_sums(&self.gain_sums_by_counterparty, limit, false)
    }

    /// Counterparties by money sent, most negative first.
    pub fn top_by_spend(&self, limit: Option<usize>) -> Vec<RankedEntry> {
        self.top_sums(&self.spend_sums_by_counterparty, limit, true)
    }

    fn top_sums(
        &self,
        sums: &BTreeMap<String, f64>,
        limit: Option<usize>,
        ascending: bool,
    ) -> Vec<RankedEntry> {
        let divisor = self.divisor as f64;
        let mut ranked: Vec<(&String, f64)> =
            sums.iter().map(|(k, &v)| (k, v / divisor)).collect();
        if ascending {
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        } else {
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        }
        let mut entries: Vec<RankedEntry> = ranked
            .into_iter()
            .filter(|&(_, value)| {
                let rounded = (value * 100.0).round() / 100.0;
                if ascending {
                    rounded < 0.0
                } else {
                    rounded > 0.0
                }
            })
            .map(|(key, value)| RankedEntry {
                key: key.clone(),
                value: fmt::sum(value),
            })
            .collect();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(day: u32, amount: f64, counterparty: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2016, 3, day).unwrap();
        Transaction::new(date, amount, counterparty.to_string())
    }

    fn section(transactions: Vec<Transaction>) -> Section {
        Section::collect("2016-03".to_string(), transactions)
    }

    #[test]
    fn test_sums_partition_by_sign() {
        let s = section(vec![
            tx(1, 100.0, "shop a"),
            tx(2, -40.5, "shop b"),
            tx(3, 5.0, "shop a"),
        ]);
        assert_eq!(s.sum_gains, 105.0);
        assert_eq!(s.sum_spends, -40.5);
        assert_eq!(s.sum_total, 64.5);
        assert_eq!(s.sum_total, s.sum_gains + s.sum_spends);
    }

    #[test]
    fn test_mixed_counterparty_is_never_netted() {
        let s = section(vec![tx(1, 100.0, "shop a"), tx(2, -30.0, "shop a")]);
        assert_eq!(s.gain_sums_by_counterparty["shop a"], 100.0);
        assert_eq!(s.spend_sums_by_counterparty["shop a"], -30.0);
        assert_eq!(s.counts_by_counterparty["shop a"], 2);
    }

    #[test]
    fn test_items_keep_source_order() {
        let s = section(vec![tx(20, 1.0, "late"), tx(1, 1.0, "early")]);
        assert_eq!(s.items[0].counterparty, "late");
        assert_eq!(s.items[1].counterparty, "early");
    }

    #[test]
    fn test_summaries_carry_the_formatting_contract() {
        let s = section(vec![tx(1, 100.0, "shop a"), tx(2, -40.5, "shop b")]);
        let gains = s.gains_summary();
        assert_eq!(gains.name, "Gains");
        assert_eq!(gains.sum, "100.00");
        assert_eq!(gains.count, "1.0");
        let spends = s.spends_summary();
        assert_eq!(spends.sum, "-40.50");
        assert_eq!(spends.count, "1.0");
        let totals = s.totals_summary();
        assert_eq!(totals.sum, "59.50");
        assert_eq!(totals.count, "2.0");
    }

    #[test]
    fn test_divisor_turns_summaries_into_per_month_figures() {
        let s = section(vec![
            tx(1, 100.0, "a"),
            tx(2, 100.0, "a"),
            tx(3, 100.0, "a"),
            tx(4, -50.0, "b"),
        ])
        .with_divisor(2);
        assert_eq!(s.gains_summary().sum, "150.00");
        assert_eq!(s.gains_summary().count, "1.5");
        assert_eq!(s.spends_summary().sum, "-25.00");
        assert_eq!(s.spends_summary().count, "0.5");
        assert_eq!(s.totals_summary().sum, "125.00");
    }

    #[test]
    fn test_top_by_count_orders_and_breaks_ties_alphabetically() {
        let s = section(vec![
            tx(1, 1.0, "cafe"),
            tx(2, 1.0, "alepa"),
            tx(3, 1.0, "cafe"),
            tx(4, 1.0, "bar"),
            tx(5, 1.0, "alepa"),
        ]);
        let top = s.top_by_count(None);
        let keys: Vec<&str> = top.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["alepa", "cafe", "bar"]);
        assert_eq!(top[0].value, "2.0");
        assert_eq!(top[2].value, "1.0");
    }

    #[test]
    fn test_top_by_count_honors_limit() {
        let s = section(vec![
            tx(1, 1.0, "a"),
            tx(2, 1.0, "b"),
            tx(3, 1.0, "c"),
        ]);
        assert_eq!(s.top_by_count(Some(2)).len(), 2);
        assert_eq!(s.top_by_count(None).len(), 3);
    }

    #[test]
    fn test_top_by_gain_sorts_descending_and_drops_zero_rounders() {
        let s = section(vec![
            tx(1, 100.0, "salary"),
            tx(2, 2.5, "refund"),
            tx(3, 0.004, "dust"),
            tx(4, -10.0, "rent"),
        ]);
        let top = s.top_by_gain(None);
        let keys: Vec<&str> = top.iter().map(|e| e.key.as_str()).collect();
        // "dust" rounds to 0.00 and "rent" is a spend; neither may show up
        assert_eq!(keys, vec!["salary", "refund"]);
        assert_eq!(top[0].value, "100.00");
        assert_eq!(top[1].value, "2.50");
    }

    #[test]
    fn test_top_by_spend_sorts_ascending_and_keeps_only_negatives() {
        let s = section(vec![
            tx(1, -5.0, "cafe"),
            tx(2, -50.0, "rent"),
            tx(3, -0.004, "dust"),
            tx(4, 9.0, "refund"),
        ]);
        let top = s.top_by_spend(None);
        let keys: Vec<&str> = top.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["rent", "cafe"]);
        assert_eq!(top[0].value, "-50.00");
        assert_eq!(top[1].value, "-5.00");
    }

    #[test]
    fn test_divisor_applies_before_the_zero_filter() {
        // 0.01 of gains spread over 5 months rounds to 0.00 per month
        let s = section(vec![tx(1, 0.01, "dust"), tx(2, 10.0, "real")]).with_divisor(5);
        let top = s.top_by_gain(None);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].key, "real");
        assert_eq!(top[0].value, "2.00");
    }
}
