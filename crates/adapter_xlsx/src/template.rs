//! Blank import template.

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::ExportResult;
use crate::export::{write_table, Value};

/// Sheet name of the template workbook.
pub const TEMPLATE_SHEET: &str = "Risk Template";

const TEMPLATE_COLUMNS: [(&str, f64); 8] = [
    ("Name/Description", 40.0),
    ("Probability", 12.0),
    ("Impact", 12.0),
    ("Owner", 20.0),
    ("Status", 12.0),
    ("Category", 15.0),
    ("Notes", 30.0),
    ("Comments/Lessons", 30.0),
];

const EXAMPLE_ROWS: [(&str, u8, u8, &str, &str, &str, &str, &str); 2] = [
    (
        "Sample cyber security risk",
        3,
        4,
        "IT Security Team",
        "Open",
        "Technology",
        "Regular security audits needed",
        "Previous incidents showed importance of training",
    ),
    (
        "Supply chain disruption",
        2,
        5,
        "Procurement Manager",
        "In Progress",
        "Operations",
        "Diversify supplier base",
        "Single supplier dependency caused delays in 2023",
    ),
];

/// Workbook with the import headers and two valid example rows.
pub fn template_workbook() -> ExportResult<Workbook> {
    let rows: Vec<Vec<Value>> = EXAMPLE_ROWS
        .iter()
        .map(|(name, probability, impact, owner, status, category, notes, comments)| {
            vec![
                Value::from(*name),
                Value::from(*probability),
                Value::from(*impact),
                Value::from(*owner),
                Value::from(*status),
                Value::from(*category),
                Value::from(*notes),
                Value::from(*comments),
            ]
        })
        .collect();

    let mut workbook = Workbook::new();
    workbook.push_worksheet(write_table(TEMPLATE_SHEET, &TEMPLATE_COLUMNS, &rows)?);
    info!("built import template");
    Ok(workbook)
}
