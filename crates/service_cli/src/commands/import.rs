//! Import command implementation
//!
//! Validates a register file and reports what would be imported.

use std::path::Path;

use adapter_xlsx::{import_file, ImportResult};
use serde::Serialize;
use tracing::info;

use super::{print_json, print_table, OutputFormat};
use crate::{CliError, Result};

#[derive(Serialize)]
struct ImportedRow<'a> {
    description: &'a str,
    probability: u8,
    impact: u8,
    score: u8,
    risk_level: &'a str,
    residual_score: f64,
    status: &'a str,
    project: Option<&'a str>,
}

#[derive(Serialize)]
struct ImportReport<'a> {
    success: bool,
    imported: usize,
    errors: &'a [String],
    records: Vec<ImportedRow<'a>>,
}

fn report(result: &ImportResult) -> ImportReport<'_> {
    ImportReport {
        success: result.success,
        imported: result.records.len(),
        errors: &result.errors,
        records: result
            .records
            .iter()
            .map(|draft| ImportedRow {
                description: &draft.description,
                probability: draft.probability(),
                impact: draft.impact(),
                score: draft.score(),
                risk_level: draft.risk_level().name(),
                residual_score: draft.residual_score(),
                status: draft.status.name(),
                project: draft.project.as_deref(),
            })
            .collect(),
    }
}

/// Run the import command
pub fn run(file: &Path, format: OutputFormat) -> Result<()> {
    info!("Importing {}", file.display());

    if !file.exists() {
        return Err(CliError::FileNotFound(file.display().to_string()));
    }

    let result = import_file(file);
    let report = report(&result);

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = report
                .records
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    vec![
                        (i + 1).to_string(),
                        row.description.to_string(),
                        row.probability.to_string(),
                        row.impact.to_string(),
                        row.score.to_string(),
                        row.risk_level.to_string(),
                        format!("{:.1}", row.residual_score),
                        row.status.to_string(),
                    ]
                })
                .collect();
            print_table(
                &["#", "Description", "P", "I", "Score", "Level", "Residual", "Status"],
                &rows,
            );
            println!("\nImported {} risks", report.imported);
            if !report.errors.is_empty() {
                println!("{} problems:", report.errors.len());
                for error in report.errors {
                    println!("  - {}", error);
                }
            }
        }
    }

    if result.records.is_empty() && !result.errors.is_empty() {
        return Err(CliError::Import(result.errors));
    }
    info!("Import check complete");
    Ok(())
}
