//! First-sheet cell grid.
//!
//! Every source format is read into a [`Grid`] of [`Cell`]s before any row
//! is interpreted: workbooks through `calamine` (first worksheet only),
//! CSV files through `csv` (no header handling, ragged rows allowed).

use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::SheetError;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Any workbook `calamine` can open (xlsx, xlsm, xlsb, xls, ods)
    Workbook,
    /// Comma-separated values
    Csv,
}

impl SheetFormat {
    /// Format implied by the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, SheetError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SheetFormat::Workbook),
            "csv" => Ok(SheetFormat::Csv),
            _ => Err(SheetError::UnsupportedFormat(extension)),
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value
    Empty,
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// Boolean value
    Bool(bool),
}

impl Cell {
    /// Trimmed text of the cell; `None` when blank.
    pub fn text(&self) -> Option<String> {
        let text = match self {
            Cell::Empty => return None,
            Cell::Number(value) => value.to_string(),
            Cell::Text(text) => text.trim().to_string(),
            Cell::Bool(value) => value.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    /// Whether the cell holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text().is_none()
    }

    /// Numeric value, parsing text; `None` for blank or non-numeric cells.
    pub fn number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(text) => text.trim().parse().ok(),
            Cell::Empty | Cell::Bool(_) => None,
        }
    }

    /// Numeric value of a cell that may be written as a percentage.
    ///
    /// Returns the number and whether a trailing `%` was present.
    pub fn percent_number(&self) -> Option<(f64, bool)> {
        if let Cell::Text(text) = self {
            if let Some(stripped) = text.trim().strip_suffix('%') {
                return stripped.trim().parse().ok().map(|value| (value, true));
            }
        }
        self.number().map(|value| (value, false))
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(value) => Cell::Number(*value as f64),
            Data::Float(value) => Cell::Number(*value),
            Data::String(text) => Cell::Text(text.clone()),
            Data::Bool(value) => Cell::Bool(*value),
            Data::DateTime(value) => Cell::Number(value.as_f64()),
            Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// Rows of cells from the first sheet of a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Grid from rows of cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Grid of text cells; empty strings become [`Cell::Empty`].
    pub fn from_text_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|value| text_cell(value.as_ref())).collect())
                .collect(),
        )
    }

    /// Reads the first worksheet of an in-memory workbook.
    pub fn from_workbook_bytes(bytes: Vec<u8>) -> Result<Self, SheetError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| SheetError::Parse(e.to_string()))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(|e| SheetError::Parse(e.to_string()))?,
            None => return Ok(Self::default()),
        };
        Ok(Self::new(
            range
                .rows()
                .map(|row| row.iter().map(Cell::from).collect())
                .collect(),
        ))
    }

    /// Reads CSV text; every record is a row, the header included.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, SheetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| SheetError::Parse(e.to_string()))?;
            rows.push(record.iter().map(text_cell).collect());
        }
        Ok(Self::new(rows))
    }

    /// Reads `bytes` as `format`.
    pub fn from_bytes(bytes: Vec<u8>, format: SheetFormat) -> Result<Self, SheetError> {
        match format {
            SheetFormat::Workbook => Self::from_workbook_bytes(bytes),
            SheetFormat::Csv => Self::from_csv(bytes.as_slice()),
        }
    }

    /// Reads the file at `path`, choosing the format from its extension.
    pub fn read(path: &Path) -> Result<Self, SheetError> {
        let format = SheetFormat::from_path(path)?;
        let bytes = std::fs::read(path).map_err(|e| SheetError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_bytes(bytes, format)
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn text_cell(value: &str) -> Cell {
    if value.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(value.to_string())
    }
}
