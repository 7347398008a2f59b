//! Workbook export.
//!
//! Three workbook variants:
//! - register: one row per record plus the risk matrix reference sheet
//! - project summary: one row per project plus a timeline sheet per project
//! - cause-effect: records with causes plus a root-cause sheet
//!
//! Workbooks are returned unsaved so callers choose between
//! [`save_workbook`] and `Workbook::save_to_buffer`.

use std::collections::HashSet;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use risk_analytics::ProjectRiskSummary;
use risk_core::scoring::RISK_MATRIX;
use risk_core::types::{RiskLevel, RiskRecord};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};
use tracing::{debug, info};

use crate::error::{ExportError, ExportResult};

/// Excel's sheet-name length limit.
const MAX_SHEET_NAME: usize = 31;
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Sheet name of the register export.
pub const REGISTER_SHEET: &str = "Risk Register";
/// Sheet name of the matrix reference.
pub const MATRIX_SHEET: &str = "Risk Matrix";
/// Sheet name of the project summary export.
pub const PROJECT_SUMMARY_SHEET: &str = "Project Summary";
/// Sheet name of the cause-effect export.
pub const CAUSE_EFFECT_SHEET: &str = "Cause-Effect Analysis";
/// Sheet name of the root-cause list.
pub const ROOT_CAUSES_SHEET: &str = "Root Causes";

const REGISTER_COLUMNS: [(&str, f64); 19] = [
    ("Risk ID", 12.0),
    ("Description", 50.0),
    ("Project", 25.0),
    ("Category", 15.0),
    ("Owner", 20.0),
    ("Probability (1-5)", 12.0),
    ("Impact (1-5)", 12.0),
    ("Risk Score", 12.0),
    ("Risk Level", 15.0),
    ("Mitigation Effectiveness (%)", 18.0),
    ("Residual Score", 12.0),
    ("Residual Risk Level", 15.0),
    ("Status", 12.0),
    ("Notes", 30.0),
    ("Comments/Lessons", 30.0),
    ("Created Date", 12.0),
    ("Updated Date", 12.0),
    ("Mitigation Date", 12.0),
    ("Root Cause", 10.0),
];

const PROJECT_COLUMNS: [(&str, f64); 8] = [
    ("Project Name", 25.0),
    ("Total Risks", 12.0),
    ("High Risk Count", 15.0),
    ("Open Risks", 12.0),
    ("Mitigated Risks", 15.0),
    ("Average Risk Score", 18.0),
    ("Risk Trend", 12.0),
    ("Profitability Impact", 18.0),
];

const TIMELINE_COLUMNS: [(&str, f64); 5] = [
    ("Date", 12.0),
    ("Risk ID", 12.0),
    ("Event", 12.0),
    ("Description", 40.0),
    ("Risk Level", 15.0),
];

const CAUSE_EFFECT_COLUMNS: [(&str, f64); 9] = [
    ("Risk ID", 12.0),
    ("Description", 40.0),
    ("Project", 25.0),
    ("Is Root Cause", 12.0),
    ("Causes (Risk IDs)", 20.0),
    ("Effects (Risk IDs)", 20.0),
    ("Risk Score", 12.0),
    ("Risk Level", 15.0),
    ("Status", 12.0),
];

const ROOT_CAUSE_COLUMNS: [(&str, f64); 6] = [
    ("Root Cause Risk ID", 15.0),
    ("Description", 40.0),
    ("Project", 25.0),
    ("Direct Effects Count", 18.0),
    ("Risk Score", 12.0),
    ("Mitigation Status", 15.0),
];

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    date_format: String,
}

impl ExportOptions {
    /// Options with a `strftime` date pattern.
    ///
    /// # Errors
    ///
    /// [`ExportError::InvalidDateFormat`] for an empty or unparsable pattern.
    pub fn new(date_format: impl Into<String>) -> ExportResult<Self> {
        let date_format = date_format.into();
        if date_format.trim().is_empty()
            || StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ExportError::InvalidDateFormat(date_format));
        }
        Ok(Self { date_format })
    }

    /// The date pattern.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Formats `date` with the configured pattern.
    pub fn format_date(&self, date: &DateTime<Utc>) -> String {
        date.format(&self.date_format).to_string()
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

/// A value written to one cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Text(String),
    Number(f64),
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<u8> for Value {
    fn from(number: u8) -> Self {
        Value::Number(f64::from(number))
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Value::Number(number as f64)
    }
}

/// Hands out valid, unique worksheet names.
///
/// Invalid characters become `_`, names are cut to 31 characters, and a
/// repeated name gets a ` (n)` suffix. Comparison ignores case.
#[derive(Debug, Default)]
pub struct SheetNames {
    used: HashSet<String>,
}

impl SheetNames {
    /// Tracker with no names used.
    pub fn new() -> Self {
        Self::default()
    }

    /// A valid name derived from `raw`, not returned before.
    pub fn unique(&mut self, raw: &str) -> String {
        let cleaned: String = raw
            .chars()
            .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
            .collect();
        let cleaned = cleaned.trim().trim_matches('\'').trim();
        let base = if cleaned.is_empty() { "Sheet" } else { cleaned };

        let mut candidate = truncate(base, MAX_SHEET_NAME);
        let mut n = 2;
        while self.used.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            candidate = format!(
                "{}{}",
                truncate(base, MAX_SHEET_NAME - suffix.chars().count()),
                suffix
            );
            n += 1;
        }
        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

fn or_na(text: &Option<String>) -> Value {
    Value::from(text.as_deref().unwrap_or("N/A"))
}

fn yes_no(flag: bool) -> Value {
    Value::from(if flag { "Yes" } else { "No" })
}

fn join_ids<'a>(ids: impl IntoIterator<Item = &'a risk_core::types::RiskId>) -> String {
    ids.into_iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn header_format() -> Format {
    Format::new().set_bold()
}

/// Writes a header row and data rows to a new sheet named `name`.
pub(crate) fn write_table(
    name: &str,
    columns: &[(&str, f64)],
    rows: &[Vec<Value>],
) -> ExportResult<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(name)?;
    let bold = header_format();

    for (col, (header, width)) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &bold)?;
        worksheet.set_column_width(col, *width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (index, row) in rows.iter().enumerate() {
        let row_num = index as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            match value {
                Value::Text(text) if text.is_empty() => {}
                Value::Text(text) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                Value::Number(number) => {
                    worksheet.write_number(row_num, col, *number)?;
                }
            }
        }
    }
    Ok(worksheet)
}

fn register_row(record: &RiskRecord, options: &ExportOptions) -> Vec<Value> {
    vec![
        Value::from(record.id.as_str()),
        Value::from(record.description.as_str()),
        or_na(&record.project),
        or_na(&record.category),
        or_na(&record.owner),
        Value::from(record.probability()),
        Value::from(record.impact()),
        Value::from(record.score()),
        Value::from(record.risk_level().name()),
        Value::from((record.mitigation_effectiveness() * 100.0).round()),
        Value::from(record.residual_score()),
        Value::from(record.residual_risk_level().name()),
        Value::from(record.status.name()),
        Value::from(record.notes.clone().unwrap_or_default()),
        Value::from(record.comments.clone().unwrap_or_default()),
        Value::from(options.format_date(&record.created_at)),
        Value::from(options.format_date(&record.updated_at)),
        Value::from(
            record
                .mitigation_date
                .as_ref()
                .map(|date| options.format_date(date))
                .unwrap_or_default(),
        ),
        yes_no(record.root_cause),
    ]
}

fn hex_color(hex: &str) -> Color {
    Color::RGB(u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0xFF_FF_FF))
}

/// The 5x5 probability × impact matrix with a level legend.
pub fn matrix_sheet(name: &str) -> ExportResult<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(name)?;
    let bold = header_format();

    worksheet.set_column_width(0, 34)?;
    for impact in 1..=RISK_MATRIX.size() {
        let col = impact as u16;
        worksheet.write_string_with_format(0, col, format!("Impact {impact}"), &bold)?;
        worksheet.set_column_width(col, 10)?;
    }

    for (p, row) in RISK_MATRIX.rows().iter().enumerate() {
        let row_num = p as u32 + 1;
        worksheet.write_string_with_format(row_num, 0, format!("Probability {}", p + 1), &bold)?;
        for (i, score) in row.iter().enumerate() {
            let level = risk_core::scoring::classify(f64::from(*score));
            let format = Format::new()
                .set_align(FormatAlign::Center)
                .set_background_color(hex_color(level.color()))
                .set_font_color(hex_color(level.text_color()));
            worksheet.write_number_with_format(row_num, i as u16 + 1, f64::from(*score), &format)?;
        }
    }

    let legend_start = RISK_MATRIX.size() as u32 + 2;
    worksheet.write_string_with_format(legend_start, 0, "Risk Level Categories:", &bold)?;
    for (offset, level) in RiskLevel::ALL.iter().enumerate() {
        worksheet.write_string(
            legend_start + 1 + offset as u32,
            0,
            format!("{}: {}", level.score_range_label(), level.name()),
        )?;
    }
    Ok(worksheet)
}

/// Register sheet plus the matrix reference sheet.
pub fn register_workbook(records: &[RiskRecord], options: &ExportOptions) -> ExportResult<Workbook> {
    let rows: Vec<Vec<Value>> = records.iter().map(|r| register_row(r, options)).collect();

    let mut workbook = Workbook::new();
    workbook.push_worksheet(write_table(REGISTER_SHEET, &REGISTER_COLUMNS, &rows)?);
    workbook.push_worksheet(matrix_sheet(MATRIX_SHEET)?);

    info!(records = records.len(), "built register workbook");
    Ok(workbook)
}

/// Summary sheet plus one timeline sheet per project with events.
pub fn project_summary_workbook(
    summaries: &[ProjectRiskSummary],
    options: &ExportOptions,
) -> ExportResult<Workbook> {
    let mut names = SheetNames::new();
    let mut workbook = Workbook::new();

    let rows: Vec<Vec<Value>> = summaries
        .iter()
        .map(|summary| {
            vec![
                Value::from(summary.project_name.as_str()),
                Value::from(summary.total_risks),
                Value::from(summary.high_risks),
                Value::from(summary.open_risks),
                Value::from(summary.mitigated_risks),
                Value::from(summary.average_score),
                Value::from(summary.risk_trend.name()),
                Value::from(summary.expected_profitability_impact.name()),
            ]
        })
        .collect();
    let summary_name = names.unique(PROJECT_SUMMARY_SHEET);
    workbook.push_worksheet(write_table(&summary_name, &PROJECT_COLUMNS, &rows)?);

    for summary in summaries.iter().filter(|s| !s.timeline.is_empty()) {
        let rows: Vec<Vec<Value>> = summary
            .timeline
            .iter()
            .map(|entry| {
                vec![
                    Value::from(options.format_date(&entry.date)),
                    Value::from(entry.risk_id.as_str()),
                    Value::from(entry.event.name()),
                    Value::from(entry.description.as_str()),
                    Value::from(entry.risk_level.name()),
                ]
            })
            .collect();
        let sheet_name = names.unique(&format!("{} Timeline", summary.project_name));
        debug!(project = %summary.project_name, sheet = %sheet_name, "timeline sheet");
        workbook.push_worksheet(write_table(&sheet_name, &TIMELINE_COLUMNS, &rows)?);
    }

    info!(projects = summaries.len(), "built project summary workbook");
    Ok(workbook)
}

/// Records with causes, plus a root-cause sheet when any record is one.
pub fn cause_effect_workbook(records: &[RiskRecord]) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();

    let relationships: Vec<Vec<Value>> = records
        .iter()
        .filter(|record| !record.causes.is_empty())
        .map(|record| {
            vec![
                Value::from(record.id.as_str()),
                Value::from(record.description.as_str()),
                or_na(&record.project),
                yes_no(record.root_cause),
                Value::from(join_ids(&record.causes)),
                Value::from(join_ids(&record.effects)),
                Value::from(record.score()),
                Value::from(record.risk_level().name()),
                Value::from(record.status.name()),
            ]
        })
        .collect();
    workbook.push_worksheet(write_table(CAUSE_EFFECT_SHEET, &CAUSE_EFFECT_COLUMNS, &relationships)?);

    let root_causes: Vec<Vec<Value>> = records
        .iter()
        .filter(|record| record.root_cause)
        .map(|record| {
            vec![
                Value::from(record.id.as_str()),
                Value::from(record.description.as_str()),
                or_na(&record.project),
                Value::from(record.effects.len()),
                Value::from(record.score()),
                Value::from(record.status.name()),
            ]
        })
        .collect();
    if !root_causes.is_empty() {
        workbook.push_worksheet(write_table(ROOT_CAUSES_SHEET, &ROOT_CAUSE_COLUMNS, &root_causes)?);
    }

    info!(
        relationships = relationships.len(),
        root_causes = root_causes.len(),
        "built cause-effect workbook"
    );
    Ok(workbook)
}

/// Saves `workbook` to `path`.
pub fn save_workbook(workbook: &mut Workbook, path: &Path) -> ExportResult<()> {
    workbook.save(path)?;
    info!(path = %path.display(), "workbook saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto_from_rs, Data, Reader};
    use chrono::TimeZone;
    use risk_core::factory::{create_record_at, RiskInput};
    use risk_core::types::RiskId;
    use std::io::Cursor;

    fn sheet_names(workbook: &mut Workbook) -> Vec<String> {
        let bytes = workbook.save_to_buffer().unwrap();
        open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap().sheet_names()
    }

    fn record(id: &str) -> RiskRecord {
        create_record_at(
            RiskInput::new(format!("Risk {id}"), 3, 5).with_mitigation(0.4),
            Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap(),
        )
        .unwrap()
        .with_id(RiskId::new(id))
    }

    #[test]
    fn test_sheet_names_sanitized() {
        let mut names = SheetNames::new();
        assert_eq!(names.unique("Q1/Q2: [Solar]"), "Q1_Q2_ _Solar_");
        assert_eq!(names.unique("Project Summary"), "Project Summary");
        assert_eq!(names.unique("project summary"), "project summary (2)");

        let long = "Battery Storage System Q2 2024 Timeline";
        let first = names.unique(long);
        let second = names.unique(long);
        assert_eq!(first, "Battery Storage System Q2 2024");
        assert_eq!(second, "Battery Storage System Q2 2 (2)");
        assert_eq!(names.unique("''"), "Sheet");
    }

    #[test]
    fn test_invalid_date_format() {
        assert!(matches!(
            ExportOptions::new("%Q"),
            Err(ExportError::InvalidDateFormat(_))
        ));
        let options = ExportOptions::new("%Y-%m-%d").unwrap();
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(options.format_date(&date), "2024-01-15");
        assert_eq!(ExportOptions::default().format_date(&date), "1/15/2024");
    }

    #[test]
    fn test_register_row_values() {
        let mut record = record("R1");
        record.root_cause = true;
        let row = register_row(&record, &ExportOptions::default());
        assert_eq!(row.len(), REGISTER_COLUMNS.len());
        assert_eq!(row[2], Value::from("N/A"));
        assert_eq!(row[7], Value::Number(15.0));
        assert_eq!(row[8], Value::from("VERY HIGH"));
        assert_eq!(row[9], Value::Number(40.0));
        assert_eq!(row[10], Value::Number(9.0));
        assert_eq!(row[11], Value::from("SIGNIFICANT"));
        assert_eq!(row[15], Value::from("3/9/2024"));
        assert_eq!(row[17], Value::from(""));
        assert_eq!(row[18], Value::from("Yes"));
    }

    #[test]
    fn test_register_workbook_sheets() {
        let mut workbook = register_workbook(&[record("R1")], &ExportOptions::default()).unwrap();
        assert_eq!(sheet_names(&mut workbook), vec![REGISTER_SHEET, MATRIX_SHEET]);
    }

    #[test]
    fn test_matrix_sheet_contents() {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(matrix_sheet(MATRIX_SHEET).unwrap());
        let bytes = workbook.save_to_buffer().unwrap();
        let mut reader = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        let range = reader.worksheet_range(MATRIX_SHEET).unwrap();

        assert_eq!(range.get_value((3, 4)), Some(&Data::Float(12.0)));
        assert_eq!(range.get_value((5, 5)), Some(&Data::Float(25.0)));
        assert_eq!(
            range.get_value((12, 0)),
            Some(&Data::String("10-12: HIGH".to_string()))
        );
    }

    #[test]
    fn test_cause_effect_sheets() {
        let mut cause = record("R1");
        cause.root_cause = true;
        cause.effects = vec![RiskId::new("R2")];
        let mut effect = record("R2");
        effect.causes = vec![RiskId::new("R1")];

        let mut workbook =
            cause_effect_workbook(&[cause, effect]).unwrap();
        assert_eq!(
            sheet_names(&mut workbook),
            vec![CAUSE_EFFECT_SHEET, ROOT_CAUSES_SHEET]
        );

        let mut without_roots = cause_effect_workbook(&[record("R3")]).unwrap();
        assert_eq!(sheet_names(&mut without_roots), vec![CAUSE_EFFECT_SHEET]);
    }
}
