//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared here: loading
//! the register a command works on and rendering table output.

pub mod check;
pub mod export;
pub mod import;
pub mod list;
pub mod matrix;
pub mod projects;
pub mod sample;
pub mod summary;
pub mod template;

use std::path::Path;

use adapter_xlsx::import_file;
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use infra_store::{InMemoryRiskStore, RiskStore};
use tracing::{info, warn};

use crate::sample::sample_register;
use crate::{CliError, Result};

/// Output format of reporting commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Loads the register from `input`, or the sample register when absent.
///
/// Row errors are logged and skipped; an import that yields no records at
/// all is an error.
pub fn load_register(input: Option<&Path>) -> Result<InMemoryRiskStore> {
    let drafts = match input {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            let result = import_file(path);
            for error in &result.errors {
                warn!("{}", error);
            }
            if result.records.is_empty() && !result.errors.is_empty() {
                return Err(CliError::Import(result.errors));
            }
            result.records
        }
        None => {
            info!("No input file given, using the sample register");
            sample_register(Utc::now()).map_err(|e| CliError::Import(e.messages()))?
        }
    };

    let mut store = InMemoryRiskStore::new();
    store.add_all(drafts);
    info!("Loaded {} risks", store.len());
    Ok(store)
}

/// Parses an `--as-of` date (YYYY-MM-DD, end of day UTC); now when absent.
pub fn parse_as_of(date: Option<&str>) -> Result<DateTime<Utc>> {
    match date {
        None => Ok(Utc::now()),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| {
                CliError::InvalidArgument(format!("Invalid date: {}. Expected YYYY-MM-DD", text))
            }),
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

const NO_DATA: &str = "(no data)";

/// Renders rows as a box-drawn table.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    if rows.is_empty() {
        if let Some(first) = widths.first_mut() {
            *first = (*first).max(NO_DATA.len());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - cell.chars().count())))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let mut out = vec![rule("┌", "┬", "┐"), line(headers.to_vec()), rule("├", "┼", "┤")];
    if rows.is_empty() {
        let mut cells = vec![""; widths.len()];
        if let Some(first) = cells.first_mut() {
            *first = NO_DATA;
        }
        out.push(line(cells));
    }
    for row in rows {
        let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
        cells.resize(widths.len(), "");
        out.push(line(cells));
    }
    out.push(rule("└", "┴", "┘"));
    out.join("\n")
}

/// Prints rows as a box-drawn table.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", render_table(headers, rows));
}
