use chrono::{Datelike, NaiveDate};

/// One validated row from a bank export. Positive amounts are money in,
/// negative amounts are money out; zero never gets this far.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub counterparty: String,
    /// Zero-padded "YYYY-MM" grouping key derived from `date`.
    pub month_key: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: f64, counterparty: String) -> Self {
        let month_key = format!("{:04}-{:02}", date.year(), date.month());
        Transaction {
            date,
            amount,
            counterparty,
            month_key,
        }
    }

    pub fn is_gain(&self) -> bool {
        self.amount > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
        let tx = Transaction::new(date, 100.0, "shop a".to_string());
        assert_eq!(tx.month_key, "2016-03");
    }

    #[test]
    fn test_gain_spend_split() {
        let date = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
        assert!(Transaction::new(date, 0.01, "a".to_string()).is_gain());
        assert!(!Transaction::new(date, -0.01, "a".to_string()).is_gain());
    }
}
