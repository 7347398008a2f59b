//! List command implementation
//!
//! Filters and sorts the register.

use std::path::Path;

use clap::ValueEnum;
use infra_store::{RiskQuery, RiskStore, SortDirection, SortField};
use risk_core::types::{RiskLevel, RiskRecord, RiskStatus};
use tracing::info;

use super::{load_register, print_json, print_table, OutputFormat};
use crate::Result;

/// Sort key accepted on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Risk score
    #[default]
    Score,
    /// Residual score
    Residual,
    /// Probability rating
    Probability,
    /// Impact rating
    Impact,
    /// Description text
    Description,
    /// Status
    Status,
    /// Creation time
    Created,
    /// Last update time
    Updated,
}

impl From<SortKey> for SortField {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Score => SortField::Score,
            SortKey::Residual => SortField::ResidualScore,
            SortKey::Probability => SortField::Probability,
            SortKey::Impact => SortField::Impact,
            SortKey::Description => SortField::Description,
            SortKey::Status => SortField::Status,
            SortKey::Created => SortField::CreatedAt,
            SortKey::Updated => SortField::UpdatedAt,
        }
    }
}

/// Filters for the list command
#[derive(Clone, Debug, Default)]
pub struct ListArgs {
    /// Only this level
    pub level: Option<RiskLevel>,
    /// Only this status
    pub status: Option<RiskStatus>,
    /// Only this category
    pub category: Option<String>,
    /// Only this project
    pub project: Option<String>,
    /// Sort key
    pub sort: SortKey,
    /// Smallest first
    pub ascending: bool,
}

impl ListArgs {
    /// The register query these arguments describe.
    pub fn query(&self) -> RiskQuery {
        let direction = if self.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        let mut query = RiskQuery::new().sort_by(self.sort.into(), direction);
        query.level = self.level;
        query.status = self.status;
        query.category = self.category.clone();
        query.project = self.project.clone();
        query
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

fn list_rows(records: &[&RiskRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                truncate(&r.description, 40),
                r.project.clone().unwrap_or_default(),
                r.score().to_string(),
                r.risk_level().name().to_string(),
                format!("{:.1}", r.residual_score()),
                r.status.name().to_string(),
            ]
        })
        .collect()
}

/// Run the list command
pub fn run(input: Option<&Path>, args: &ListArgs, format: OutputFormat) -> Result<()> {
    let store = load_register(input)?;
    let matches = args.query().apply(store.list());
    info!("{} of {} risks match", matches.len(), store.len());

    match format {
        OutputFormat::Json => print_json(&matches)?,
        OutputFormat::Table => print_table(
            &["ID", "Description", "Project", "Score", "Level", "Residual", "Status"],
            &list_rows(&matches),
        ),
    }
    Ok(())
}
