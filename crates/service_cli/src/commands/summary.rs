//! Summary command implementation
//!
//! Counts the register by level, status and project.

use std::path::Path;

use infra_config::RegisterConfig;
use infra_store::RiskStore;
use risk_analytics::{RiskAnalyzer, RiskSummary};
use risk_core::types::RiskLevel;
use tracing::info;

use super::{load_register, print_json, print_table, OutputFormat};
use crate::Result;

/// Table rows of a summary: one per level, then status and project counts.
pub fn summary_rows(summary: &RiskSummary) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = RiskLevel::ALL
        .iter()
        .rev()
        .map(|level| {
            vec![
                "Level".to_string(),
                level.name().to_string(),
                summary.level_count(*level).to_string(),
            ]
        })
        .collect();
    rows.extend(summary.by_status.iter().map(|(status, count)| {
        vec!["Status".to_string(), status.name().to_string(), count.to_string()]
    }));
    rows.extend(summary.by_project.iter().map(|(project, count)| {
        vec!["Project".to_string(), project.clone(), count.to_string()]
    }));
    rows.push(vec!["Total".to_string(), String::new(), summary.total.to_string()]);
    rows
}

/// Run the summary command
pub fn run(config: &RegisterConfig, input: Option<&Path>, format: OutputFormat) -> Result<()> {
    let store = load_register(input)?;
    let summary = RiskAnalyzer::new(config.analytics.clone()).summarize(store.list());
    info!("Summarised {} risks", summary.total);

    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Table => print_table(&["Group", "Key", "Count"], &summary_rows(&summary)),
    }
    Ok(())
}
