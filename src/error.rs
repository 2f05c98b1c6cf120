use thiserror::Error;

use crate::data::models::TableKind;

/// Every failure mode of the load/select/assemble pipeline, mapped to a
/// user-facing message by the top-level UI.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {table} file: {source}")]
    Io {
        table: TableKind,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {table} file: {source}")]
    Csv {
        table: TableKind,
        #[source]
        source: csv::Error,
    },

    #[error("{table} file is missing required column(s): {}", .missing.join(", "))]
    MissingColumns {
        table: TableKind,
        missing: Vec<String>,
    },

    #[error("{table} file, row {line}: unparseable date '{value}'")]
    BadDate {
        table: TableKind,
        line: usize,
        value: String,
    },

    #[error("{table} file, row {line}: unparseable closing price '{value}'")]
    BadClose {
        table: TableKind,
        line: usize,
        value: String,
    },

    #[error("No banks selected")]
    EmptySelection,

    #[error("Empty data for selected banks or NIFTYBANK")]
    NoMatchingRows,

    #[error("Error processing files: {0}")]
    Other(#[from] anyhow::Error),
}

impl DataError {
    /// Warning-level failures halt the render but are not reported as errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, DataError::EmptySelection | DataError::NoMatchingRows)
    }
}
