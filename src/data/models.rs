use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

/// Which input table an error refers to, using the names the user knows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Banks,
    Benchmark,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Banks => write!(f, "Multi-Bank"),
            TableKind::Benchmark => write!(f, "NIFTYBANK"),
        }
    }
}

/// One row of the multi-bank table
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub bank: String,
    pub date: NaiveDate,
    pub close: f64,
}

/// One row of the benchmark index table
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    pub date: NaiveDate,
    pub close: f64,
}

/// The multi-bank table. Rows keep their file order; duplicate
/// (bank, date) rows are kept and plotted as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankTable {
    pub rows: Vec<StockRow>,
}

impl BankTable {
    /// Distinct bank labels in ascending order (the selection universe)
    pub fn banks(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.bank.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Keep only rows whose bank is in `selected`. Pure and idempotent.
    pub fn filter(&self, selected: &[String]) -> BankTable {
        BankTable {
            rows: self
                .rows
                .iter()
                .filter(|r| selected.iter().any(|b| *b == r.bank))
                .cloned()
                .collect(),
        }
    }

    /// Rows of a single bank, in file order
    pub fn rows_for<'a>(&'a self, bank: &'a str) -> impl Iterator<Item = &'a StockRow> {
        self.rows.iter().filter(move |r| r.bank == bank)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The benchmark index table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkTable {
    pub rows: Vec<IndexRow>,
}

impl BenchmarkTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn row(bank: &str, day: u32, close: f64) -> StockRow {
        StockRow {
            bank: bank.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            close,
        }
    }

    #[test]
    fn test_banks_sorted_distinct() {
        let table = BankTable {
            rows: vec![row("SBI", 1, 1.0), row("AXIS", 1, 2.0), row("SBI", 2, 3.0)],
        };
        assert_eq!(table.banks(), vec!["AXIS".to_string(), "SBI".to_string()]);
    }

    #[test]
    fn test_filter_keeps_membership_and_order() {
        let table = BankTable {
            rows: vec![row("A", 2, 1.0), row("B", 1, 2.0), row("A", 1, 3.0)],
        };
        let filtered = table.filter(&["A".to_string()]);
        assert_eq!(filtered.rows.len(), 2);
        // file order preserved, no re-sort by date
        assert_eq!(filtered.rows[0].date.day(), 2);
        assert_eq!(filtered.rows[1].date.day(), 1);
        assert!(filtered.rows.iter().all(|r| r.bank == "A"));
    }

    #[test]
    fn test_filter_idempotent() {
        let table = BankTable {
            rows: vec![row("A", 1, 1.0), row("B", 1, 2.0), row("C", 1, 3.0)],
        };
        let selected = vec!["A".to_string(), "C".to_string()];
        let once = table.filter(&selected);
        let twice = once.filter(&selected);
        assert_eq!(once, twice, "filtering twice must equal filtering once");
    }
}
