//! Projects command implementation
//!
//! Per-project rollups: counts, trend, profitability and financial impact.

use std::path::Path;

use infra_config::RegisterConfig;
use infra_store::RiskStore;
use risk_analytics::{ProjectAnalytics, RiskAnalyzer};
use tracing::info;

use super::{load_register, parse_as_of, print_json, print_table, OutputFormat};
use crate::Result;

fn project_rows(analytics: &[ProjectAnalytics]) -> Vec<Vec<String>> {
    analytics
        .iter()
        .map(|a| {
            vec![
                a.summary.project_name.clone(),
                a.summary.total_risks.to_string(),
                a.summary.high_risks.to_string(),
                a.summary.open_risks.to_string(),
                a.summary.mitigated_risks.to_string(),
                format!("{:.1}", a.summary.average_score),
                a.summary.risk_trend.name().to_string(),
                a.summary.expected_profitability_impact.name().to_string(),
                format!("{:.0}", a.total_financial_impact),
                format!("{:.0}", a.potential_savings),
                a.impact_category.name().to_string(),
            ]
        })
        .collect()
}

/// Run the projects command
pub fn run(
    config: &RegisterConfig,
    input: Option<&Path>,
    as_of: Option<&str>,
    timeline: bool,
    format: OutputFormat,
) -> Result<()> {
    let as_of = parse_as_of(as_of)?;
    let store = load_register(input)?;
    let analyzer = RiskAnalyzer::new(config.analytics.clone());
    let analytics = analyzer.analyze_projects(store.list(), as_of);
    info!("Analysed {} projects as of {}", analytics.len(), as_of);

    if format == OutputFormat::Json {
        return print_json(&analytics);
    }

    print_table(
        &[
            "Project",
            "Total",
            "High",
            "Open",
            "Mitigated",
            "Avg Score",
            "Trend",
            "Profitability",
            "Financial Impact",
            "Potential Savings",
            "Impact",
        ],
        &project_rows(&analytics),
    );

    if timeline {
        for a in analytics.iter().filter(|a| !a.summary.timeline.is_empty()) {
            println!("\n{} timeline", a.summary.project_name);
            let rows: Vec<Vec<String>> = a
                .summary
                .timeline
                .iter()
                .map(|entry| {
                    vec![
                        entry.date.format(&config.export.date_format).to_string(),
                        entry.risk_id.to_string(),
                        entry.event.name().to_string(),
                        entry.description.clone(),
                        entry.risk_level.name().to_string(),
                    ]
                })
                .collect();
            print_table(&["Date", "Risk ID", "Event", "Description", "Level"], &rows);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{BATTERY_PROJECT, SOLAR_PROJECT};

    #[test]
    fn test_sample_project_rows() {
        let store = load_register(None).unwrap();
        let analyzer = RiskAnalyzer::new(RegisterConfig::default().analytics);
        let analytics = analyzer.analyze_projects(store.list(), chrono::Utc::now());
        let rows = project_rows(&analytics);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], SOLAR_PROJECT);
        assert_eq!(rows[0][1], "10");
        assert_eq!(rows[1][0], BATTERY_PROJECT);
        assert_eq!(rows[1][4], "1");
        assert_eq!(rows[0][10], "high");
    }
}
