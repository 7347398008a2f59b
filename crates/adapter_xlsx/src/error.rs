//! Adapter error types.
//!
//! [`SheetError`] covers structural import failures that abort a whole
//! import; row-level problems are reported as messages in
//! [`ImportResult`](crate::ImportResult) instead. [`ExportError`] covers
//! workbook generation.

use std::path::PathBuf;

use thiserror::Error;

/// Structural errors that abort an import with zero records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// File extension is not a supported spreadsheet format.
    #[error("Unsupported file type '{0}'. Please upload an Excel file (.xlsx, .xls, .ods) or a CSV file")]
    UnsupportedFormat(String),

    /// File could not be read from disk.
    #[error("Error reading {path}: {message}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying error text
        message: String,
    },

    /// Workbook bytes could not be decoded.
    #[error("Error parsing Excel file: {0}")]
    Parse(String),

    /// Fewer than two rows in the first sheet.
    #[error("Excel file must have at least a header row and one data row")]
    TooFewRows,

    /// One or more required columns are absent.
    #[error("{}", .0.join("; "))]
    MissingColumns(Vec<String>),
}

impl SheetError {
    /// The error as a list of user-facing messages.
    pub fn messages(&self) -> Vec<String> {
        match self {
            SheetError::MissingColumns(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Errors that can occur while building or saving a workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Date format pattern is not a valid `strftime` pattern.
    #[error("Invalid date format '{0}'")]
    InvalidDateFormat(String),

    /// Workbook writer failure.
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result alias for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
