//! Register import.
//!
//! Rows are validated one by one and converted through the record
//! factory. A bad row is reported by its 1-based data-row number and
//! skipped; the remaining rows still import. Structural problems (missing
//! required columns, no data row, unreadable file) abort the import with
//! zero records.

use std::path::Path;

use chrono::{DateTime, Utc};
use risk_core::factory::{create_record_at, RiskInput};
use risk_core::scoring::{MAX_RATING, MIN_RATING};
use risk_core::types::{RiskDraft, RiskStatus};
use tracing::{debug, info, warn};

use crate::columns::{ColumnMap, Field};
use crate::error::SheetError;
use crate::grid::{Cell, Grid, SheetFormat};

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportResult {
    /// True only when `errors` is empty
    pub success: bool,
    /// Records built from valid rows, in sheet order
    pub records: Vec<RiskDraft>,
    /// One message per problem
    pub errors: Vec<String>,
}

impl ImportResult {
    fn new(records: Vec<RiskDraft>, errors: Vec<String>) -> Self {
        Self {
            success: errors.is_empty(),
            records,
            errors,
        }
    }
}

impl From<SheetError> for ImportResult {
    fn from(error: SheetError) -> Self {
        Self::new(Vec::new(), error.messages())
    }
}

/// Maps status text by substring; unrecognised text is `Open`.
pub fn normalize_status(text: &str) -> RiskStatus {
    let text = text.to_lowercase();
    if text.contains("open") {
        RiskStatus::Open
    } else if text.contains("progress") || text.contains("active") {
        RiskStatus::InProgress
    } else if text.contains("mitigated") || text.contains("controlled") {
        RiskStatus::Mitigated
    } else if text.contains("closed") || text.contains("resolved") {
        RiskStatus::Closed
    } else {
        RiskStatus::Open
    }
}

/// Imports the file at `path`.
pub fn import_file(path: &Path) -> ImportResult {
    import_file_at(path, Utc::now())
}

/// Imports the file at `path`, stamping records with `now`.
pub fn import_file_at(path: &Path, now: DateTime<Utc>) -> ImportResult {
    info!(path = %path.display(), "importing register");
    match Grid::read(path) {
        Ok(grid) => import_grid_at(&grid, now),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "import aborted");
            err.into()
        }
    }
}

/// Imports in-memory file contents.
pub fn import_bytes(bytes: Vec<u8>, format: SheetFormat) -> ImportResult {
    match Grid::from_bytes(bytes, format) {
        Ok(grid) => import_grid_at(&grid, Utc::now()),
        Err(err) => err.into(),
    }
}

/// Imports an already-read grid.
pub fn import_grid(grid: &Grid) -> ImportResult {
    import_grid_at(grid, Utc::now())
}

/// Imports an already-read grid, stamping records with `now`.
pub fn import_grid_at(grid: &Grid, now: DateTime<Utc>) -> ImportResult {
    match read_rows(grid, now) {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "import aborted");
            err.into()
        }
    }
}

/// Row-level import; `Err` only for structural problems.
pub fn read_rows(grid: &Grid, now: DateTime<Utc>) -> Result<ImportResult, SheetError> {
    let rows = grid.rows();
    if rows.len() < 2 {
        return Err(SheetError::TooFewRows);
    }

    let columns = ColumnMap::from_headers(&rows[0]);
    let missing = columns.missing_required();
    if !missing.is_empty() {
        return Err(SheetError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (index, row) in rows[1..].iter().enumerate() {
        let row_number = index + 1;
        if is_blank_row(&columns, row) {
            continue;
        }
        match parse_row(&columns, row, row_number) {
            Ok(input) => match create_record_at(input, now) {
                Ok(draft) => {
                    debug!(row = row_number, score = draft.score(), "row imported");
                    records.push(draft);
                }
                Err(err) => {
                    warn!(row = row_number, error = %err, "row rejected");
                    errors.extend(err.messages().into_iter().map(|m| format!("Row {row_number}: {m}")));
                }
            },
            Err(row_errors) => {
                warn!(row = row_number, problems = row_errors.len(), "row rejected");
                errors.extend(row_errors);
            }
        }
    }

    info!(imported = records.len(), errors = errors.len(), "import finished");
    Ok(ImportResult::new(records, errors))
}

fn is_blank_row(columns: &ColumnMap, row: &[Cell]) -> bool {
    [Field::Name, Field::Probability, Field::Impact]
        .iter()
        .all(|field| columns.cell(row, *field).is_blank())
}

fn parse_row(columns: &ColumnMap, row: &[Cell], row_number: usize) -> Result<RiskInput, Vec<String>> {
    let mut errors = Vec::new();

    let description = columns.cell(row, Field::Name).text();
    if description.is_none() {
        errors.push(format!("Row {row_number}: Missing risk name/description"));
    }

    let probability = collect(
        parse_rating(columns.cell(row, Field::Probability), "Probability", row_number),
        &mut errors,
    );
    let impact = collect(
        parse_rating(columns.cell(row, Field::Impact), "Impact", row_number),
        &mut errors,
    );
    let mitigation = collect(
        parse_mitigation(
            columns.cell(row, Field::Mitigation),
            columns.mitigation_is_percent(),
            row_number,
        ),
        &mut errors,
    );

    match (description, probability, impact, mitigation) {
        (Some(description), Some(probability), Some(impact), Some(mitigation))
            if errors.is_empty() =>
        {
            let mut input = RiskInput::new(description, probability, impact)
                .with_mitigation(mitigation);
            input.owner = optional_text(columns.cell(row, Field::Owner));
            input.category = optional_text(columns.cell(row, Field::Category));
            input.project = optional_text(columns.cell(row, Field::Project));
            input.notes = optional_text(columns.cell(row, Field::Notes));
            input.comments = optional_text(columns.cell(row, Field::Comments));
            input.status = columns.cell(row, Field::Status).text().map(|s| normalize_status(&s));
            Ok(input)
        }
        _ => Err(errors),
    }
}

fn collect<T>(result: Result<T, String>, errors: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(message);
            None
        }
    }
}

fn parse_rating(cell: &Cell, label: &str, row_number: usize) -> Result<u8, String> {
    let value = cell
        .number()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Row {row_number}: Missing or invalid {}", label.to_lowercase()))?;
    if value < f64::from(MIN_RATING) || value > f64::from(MAX_RATING) {
        return Err(format!(
            "Row {row_number}: {label} must be between {MIN_RATING} and {MAX_RATING}"
        ));
    }
    if value.fract() != 0.0 {
        return Err(format!("Row {row_number}: {label} must be a whole number"));
    }
    Ok(value as u8)
}

fn parse_mitigation(cell: &Cell, percent_column: bool, row_number: usize) -> Result<f64, String> {
    if cell.is_blank() {
        return Ok(0.0);
    }
    let (value, percent_sign) = cell
        .percent_number()
        .filter(|(v, _)| v.is_finite())
        .ok_or_else(|| format!("Row {row_number}: Invalid mitigation effectiveness"))?;
    let effectiveness = if percent_column || percent_sign {
        value / 100.0
    } else {
        value
    };
    if !(0.0..=1.0).contains(&effectiveness) {
        return Err(format!(
            "Row {row_number}: Mitigation effectiveness must be between 0 and 1"
        ));
    }
    Ok(effectiveness)
}

/// Text of an optional column; the export placeholder "N/A" reads as absent.
fn optional_text(cell: &Cell) -> Option<String> {
    cell.text().filter(|text| !text.eq_ignore_ascii_case("n/a"))
}
