//! Integration tests for register and project aggregation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use risk_analytics::{
    summarize, ImpactCategory, ProfitabilityImpact, RiskAnalyzer, RiskTrend, TimelineEvent,
};
use risk_core::factory::{create_record_at, RiskInput};
use risk_core::types::{FinancialExposure, RiskId, RiskLevel, RiskRecord, RiskStatus};

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
}

fn record(id: &str, input: RiskInput, created: DateTime<Utc>) -> RiskRecord {
    create_record_at(input, created).unwrap().with_id(RiskId::new(id))
}

/// A five-record project with two VERY HIGH risks.
#[test]
fn test_project_with_two_very_high_risks() {
    let created = as_of() - Duration::days(60);
    let records = vec![
        record("R1", RiskInput::new("Supplier insolvency", 4, 4).with_project("Wind"), created),
        record("R2", RiskInput::new("Turbine defect", 3, 5).with_project("Wind"), created),
        record("R3", RiskInput::new("Permit delay", 2, 3).with_project("Wind"), created),
        record("R4", RiskInput::new("Crane shortage", 1, 4).with_project("Wind"), created),
        record("R5", RiskInput::new("Labour dispute", 2, 2).with_project("Wind"), created),
    ];
    assert_eq!(
        records
            .iter()
            .filter(|r| r.risk_level() == RiskLevel::VeryHigh)
            .count(),
        2
    );

    let summary = RiskAnalyzer::default().summarize_project(&records, "Wind", as_of());
    assert_eq!(summary.total_risks, 5);
    assert_eq!(summary.high_risks, 2);
    assert_eq!(summary.open_risks, 5);
    assert_eq!(summary.mitigated_risks, 0);
    // (16 + 15 + 6 + 4 + 4) / 5
    assert_eq!(summary.average_score, 9.0);
    assert_eq!(summary.risk_trend, RiskTrend::Decreasing);
    assert_eq!(summary.expected_profitability_impact, ProfitabilityImpact::Medium);
}

/// An empty register still reports every level.
#[test]
fn test_empty_register_summary() {
    let summary = summarize(&[]);
    assert_eq!(summary.total, 0);
    for level in RiskLevel::ALL {
        assert_eq!(summary.by_level.get(&level), Some(&0), "{level} missing");
    }
}

#[test]
fn test_solar_project_analytics() {
    let day = |d: u32| Utc.with_ymd_and_hms(2024, 1, d, 10, 0, 0).unwrap();
    let mut records = vec![
        record(
            "S1",
            RiskInput::new("Module delivery delayed by port congestion", 4, 4)
                .with_project("Solar Q1")
                .with_mitigation(0.6)
                .with_exposure(FinancialExposure::new(15_000.0, 20.0).with_unit_type("days")),
            day(5),
        ),
        record(
            "S2",
            RiskInput::new("Inverter firmware incompatibility", 3, 3)
                .with_project("Solar Q1")
                .with_mitigation(0.8)
                .with_mitigation_date(day(25))
                .with_status(RiskStatus::Mitigated),
            day(10),
        ),
        record(
            "B1",
            RiskInput::new("Battery thermal event", 2, 5).with_project("Battery Q2"),
            day(12),
        ),
    ];
    records[0].mitigation_savings = Some(100_000.0);

    let analytics = RiskAnalyzer::default().analyze_projects(&records, as_of());
    let names: Vec<_> = analytics.iter().map(|a| a.summary.project_name.as_str()).collect();
    assert_eq!(names, vec!["Solar Q1", "Battery Q2"]);

    let solar = &analytics[0];
    assert_eq!(solar.summary.total_risks, 2);
    assert_eq!(solar.summary.high_risks, 1);
    assert_eq!(solar.summary.mitigated_risks, 1);
    assert_eq!(solar.summary.risk_trend, RiskTrend::Increasing);
    // 300k × 4/5 + 9 × 500k × 0.6 × 0.01
    approx::assert_relative_eq!(solar.total_financial_impact, 267_000.0, epsilon = 1e-6);
    // only S2 is resolved: 27k × 0.8
    approx::assert_relative_eq!(solar.potential_savings, 21_600.0, epsilon = 1e-6);
    assert_eq!(solar.impact_category, ImpactCategory::High);

    let events: Vec<_> = solar
        .summary
        .timeline
        .iter()
        .map(|e| (e.risk_id.as_str(), e.event))
        .collect();
    assert_eq!(
        events,
        vec![
            ("S1", TimelineEvent::Created),
            ("S2", TimelineEvent::Created),
            ("S2", TimelineEvent::Mitigated),
        ]
    );
    assert_eq!(solar.summary.timeline[2].risk_level, RiskLevel::Acceptable);
}

fn arb_record() -> impl Strategy<Value = RiskRecord> {
    (
        1u8..=5,
        1u8..=5,
        0.0f64..=1.0,
        0usize..4,
        proptest::option::of(0usize..3),
        0i64..120,
        proptest::option::of(0i64..120),
    )
        .prop_map(|(p, i, m, status, project, age, mitigated)| {
            let mut input = RiskInput::new("generated", p, i)
                .with_mitigation(m)
                .with_status(RiskStatus::ALL[status]);
            input.project = project.map(|n| format!("P{n}"));
            input.mitigation_date = mitigated.map(|d| as_of() - Duration::days(d));
            record("G", input, as_of() - Duration::days(age))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_summary_counts_partition_register(records in prop::collection::vec(arb_record(), 0..40)) {
        let summary = summarize(&records);
        prop_assert_eq!(summary.total, records.len());
        prop_assert_eq!(summary.by_level.values().sum::<usize>(), records.len());
        prop_assert_eq!(summary.by_status.values().sum::<usize>(), records.len());
        let with_project = records.iter().filter(|r| r.project.is_some()).count();
        prop_assert_eq!(summary.by_project.values().sum::<usize>(), with_project);
    }

    #[test]
    fn prop_project_summary_consistent(records in prop::collection::vec(arb_record(), 0..40)) {
        let analyzer = RiskAnalyzer::default();
        for name in ["P0", "P1", "P2"] {
            let summary = analyzer.summarize_project(&records, name, as_of());
            prop_assert!(summary.high_risks <= summary.total_risks);
            prop_assert_eq!(summary.open_risks + summary.mitigated_risks, summary.total_risks);
            prop_assert!(summary.average_score >= 0.0 && summary.average_score <= 25.0);
            prop_assert!(summary.timeline.len() <= 10);
            prop_assert!(summary.timeline.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }
}
