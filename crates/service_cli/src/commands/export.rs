//! Export command implementation
//!
//! Writes the register, project rollups or cause-effect links to a workbook.

use std::path::Path;

use adapter_xlsx::{
    cause_effect_workbook, project_summary_workbook, register_workbook, save_workbook,
    ExportOptions, Workbook,
};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use infra_config::RegisterConfig;
use infra_store::RiskStore;
use risk_analytics::{project_names, RiskAnalyzer};
use risk_core::types::RiskRecord;
use tracing::info;

use super::{load_register, parse_as_of};
use crate::Result;

/// Workbook variant to export
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Full register plus the risk matrix
    Register,
    /// Project summaries and timelines
    Projects,
    /// Cause-effect links and root causes
    CauseEffect,
}

impl ExportKind {
    /// File name used when no output path is given.
    pub fn default_file_name(&self, date: DateTime<Utc>) -> String {
        let stem = match self {
            ExportKind::Register => "risk_register",
            ExportKind::Projects => "project_risk_summary",
            ExportKind::CauseEffect => "risk_cause_effect",
        };
        format!("{}_{}.xlsx", stem, date.format("%Y-%m-%d"))
    }
}

/// Builds the workbook of `kind` for `records`.
pub fn build_workbook(
    config: &RegisterConfig,
    records: &[RiskRecord],
    kind: ExportKind,
    as_of: DateTime<Utc>,
) -> Result<Workbook> {
    let options = ExportOptions::new(config.export.date_format.clone())?;
    let workbook = match kind {
        ExportKind::Register => register_workbook(records, &options)?,
        ExportKind::Projects => {
            let analyzer = RiskAnalyzer::new(config.analytics.clone());
            let summaries: Vec<_> = project_names(records)
                .iter()
                .map(|project| analyzer.summarize_project(records, project, as_of))
                .collect();
            project_summary_workbook(&summaries, &options)?
        }
        ExportKind::CauseEffect => cause_effect_workbook(records)?,
    };
    Ok(workbook)
}

/// Run the export command
pub fn run(
    config: &RegisterConfig,
    input: Option<&Path>,
    kind: ExportKind,
    output: Option<&Path>,
    as_of: Option<&str>,
) -> Result<()> {
    let as_of = parse_as_of(as_of)?;
    let store = load_register(input)?;

    let default_path = kind.default_file_name(Utc::now());
    let output = output.unwrap_or_else(|| Path::new(&default_path));

    let mut workbook = build_workbook(config, store.list(), kind, as_of)?;
    save_workbook(&mut workbook, output)?;

    info!("Exported {} risks to {}", store.len(), output.display());
    println!("Wrote {}", output.display());
    Ok(())
}
