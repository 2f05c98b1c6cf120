//! CSV loading, schema validation and date/number coercion for the two
//! input tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::config;
use crate::data::models::{BankTable, BenchmarkTable, IndexRow, StockRow, TableKind};
use crate::error::DataError;

/// Parse date from various formats (YYYY-MM-DD, M/D/YYYY, D-M-YYYY, etc.)
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y").ok())
        .or_else(|| NaiveDate::parse_from_str(s.trim(), "%m/%d/%y").ok())
        .or_else(|| NaiveDate::parse_from_str(s.trim(), "%d-%m-%Y").ok())
}

/// Parse a closing price, tolerating thousands separators
fn parse_close(s: &str) -> Option<f64> {
    s.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Resolve the index of every required column, or report all missing ones
/// at once. Header matching is case-insensitive; extra columns are ignored.
fn required_indices(
    headers: &csv::StringRecord,
    required: &[&str],
    table: TableKind,
) -> Result<Vec<usize>, DataError> {
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();

    for col in required {
        match headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(col))
        {
            Some(i) => indices.push(i),
            None => missing.push((*col).to_string()),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(DataError::MissingColumns { table, missing })
    }
}

/// Parse the multi-bank table from any reader. Fails on the first
/// unparseable date or closing price; rows are never skipped individually.
pub fn load_banks(reader: impl Read) -> Result<BankTable, DataError> {
    let table = TableKind::Banks;
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataError::Csv { table, source: e })?
        .clone();
    let idx = required_indices(&headers, config::BANKS_REQUIRED_COLUMNS, table)?;
    let (bank_idx, date_idx, close_idx) = (idx[0], idx[1], idx[2]);

    let mut rows = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let line = i + 2; // header is line 1
        let record = result.map_err(|e| DataError::Csv { table, source: e })?;

        let bank = record.get(bank_idx).unwrap_or("").to_string();
        let date_str = record.get(date_idx).unwrap_or("");
        let close_str = record.get(close_idx).unwrap_or("");

        let date = parse_date(date_str).ok_or_else(|| DataError::BadDate {
            table,
            line,
            value: date_str.to_string(),
        })?;
        let close = parse_close(close_str).ok_or_else(|| DataError::BadClose {
            table,
            line,
            value: close_str.to_string(),
        })?;

        rows.push(StockRow { bank, date, close });
    }

    Ok(BankTable { rows })
}

/// Parse the benchmark index table from any reader
pub fn load_benchmark(reader: impl Read) -> Result<BenchmarkTable, DataError> {
    let table = TableKind::Benchmark;
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataError::Csv { table, source: e })?
        .clone();
    let idx = required_indices(&headers, config::BENCHMARK_REQUIRED_COLUMNS, table)?;
    let (date_idx, close_idx) = (idx[0], idx[1]);

    let mut rows = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let line = i + 2;
        let record = result.map_err(|e| DataError::Csv { table, source: e })?;

        let date_str = record.get(date_idx).unwrap_or("");
        let close_str = record.get(close_idx).unwrap_or("");

        let date = parse_date(date_str).ok_or_else(|| DataError::BadDate {
            table,
            line,
            value: date_str.to_string(),
        })?;
        let close = parse_close(close_str).ok_or_else(|| DataError::BadClose {
            table,
            line,
            value: close_str.to_string(),
        })?;

        rows.push(IndexRow { date, close });
    }

    Ok(BenchmarkTable { rows })
}

pub fn load_banks_file(path: &Path) -> Result<BankTable, DataError> {
    let file = File::open(path).map_err(|e| DataError::Io {
        table: TableKind::Banks,
        source: e,
    })?;
    let table = load_banks(file)?;
    info!(
        "Loaded {} bank rows ({} banks) from {}",
        table.rows.len(),
        table.banks().len(),
        path.display()
    );
    Ok(table)
}

pub fn load_benchmark_file(path: &Path) -> Result<BenchmarkTable, DataError> {
    let file = File::open(path).map_err(|e| DataError::Io {
        table: TableKind::Benchmark,
        source: e,
    })?;
    let table = load_benchmark(file)?;
    info!(
        "Loaded {} NIFTYBANK rows from {}",
        table.rows.len(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_banks_valid() {
        let csv = "Bank,Date,Close\nHDFC,2024-01-01,1450.5\nHDFC,2024-01-02,1461.0\nICICI,2024-01-01,990.25\n";
        let table = load_banks(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].bank, "HDFC");
        assert_eq!(
            table.rows[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!((table.rows[2].close - 990.25).abs() < 1e-9);
    }

    #[test]
    fn test_banks_missing_close_column() {
        let csv = "Bank,Date\nHDFC,2024-01-01\n";
        let err = load_banks(csv.as_bytes()).unwrap_err();
        match &err {
            DataError::MissingColumns { table, missing } => {
                assert_eq!(*table, TableKind::Banks);
                assert_eq!(missing, &vec!["Close".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
        let msg = err.to_string();
        assert!(msg.contains("Multi-Bank"), "message should name the table: {}", msg);
        assert!(msg.contains("Close"), "message should name the column: {}", msg);
    }

    #[test]
    fn test_benchmark_missing_both_columns() {
        let csv = "Open,High\n1,2\n";
        match load_benchmark(csv.as_bytes()).unwrap_err() {
            DataError::MissingColumns { table, missing } => {
                assert_eq!(table, TableKind::Benchmark);
                assert_eq!(missing, vec!["Date".to_string(), "Close".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "Open,Bank,Volume,Date,Close\n10,HDFC,5000,2024-01-01,1450\n";
        let table = load_banks(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].bank, "HDFC");
        assert!((table.rows[0].close - 1450.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_date_formats() {
        let csv = "Date,Close\n2024-01-01,100\n01/02/2024,101\n1/3/24,102\n04-01-2024,103\n";
        let table = load_benchmark(csv.as_bytes()).unwrap();
        let days: Vec<u32> = table.rows.iter().map(|r| chrono::Datelike::day(&r.date)).collect();
        assert_eq!(days, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_bad_date_aborts_whole_load() {
        let csv = "Bank,Date,Close\nHDFC,2024-01-01,100\nHDFC,not-a-date,101\nHDFC,2024-01-03,102\n";
        match load_banks(csv.as_bytes()).unwrap_err() {
            DataError::BadDate { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected BadDate, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_close_aborts_whole_load() {
        let csv = "Date,Close\n2024-01-01,n/a\n";
        match load_benchmark(csv.as_bytes()).unwrap_err() {
            DataError::BadClose { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "n/a");
            }
            other => panic!("expected BadClose, got {:?}", other),
        }
    }

    #[test]
    fn test_thousands_separators_in_close() {
        let csv = "Date,Close\n2024-01-01,\"48,212.50\"\n";
        let table = load_benchmark(csv.as_bytes()).unwrap();
        assert!((table.rows[0].close - 48212.50).abs() < 1e-9);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_banks_file(Path::new("definitely-not-here.csv")).unwrap_err();
        assert!(matches!(
            err,
            DataError::Io {
                table: TableKind::Banks,
                ..
            }
        ));
    }
}
