//! Demonstration register: a solar procurement project and a battery
//! storage project.

use chrono::{DateTime, TimeZone, Utc};
use risk_core::factory::{create_record_at, RiskInput};
use risk_core::types::{FinancialExposure, RecordError, RiskDraft, RiskId, RiskStatus};

/// Project name of the solar risks.
pub const SOLAR_PROJECT: &str = "Solar Panel Procurement Q1 2024";
/// Project name of the battery risks.
pub const BATTERY_PROJECT: &str = "Battery Storage System Q2 2024";

struct SampleRisk {
    description: &'static str,
    probability: u8,
    impact: u8,
    mitigation: f64,
    owner: &'static str,
    category: &'static str,
    project: &'static str,
    status: RiskStatus,
    notes: &'static str,
    comments: &'static str,
    causes: &'static [&'static str],
    effects: &'static [&'static str],
    root_cause: bool,
    // (dollar effect per unit, units, unit type)
    exposure: Option<(f64, f64, &'static str)>,
}

const SAMPLE_RISKS: [SampleRisk; 14] = [
    SampleRisk {
        description: "Delay in interconnection",
        probability: 4,
        impact: 3,
        mitigation: 0.8,
        owner: "Supply Chain Manager",
        category: "Logistics",
        project: SOLAR_PROJECT,
        status: RiskStatus::Open,
        notes: "Monitoring port status daily, exploring alternative shipping routes",
        comments: "Port congestion has increased 40% this quarter. Consider air freight for critical components.",
        causes: &["supply-chain-risk-1", "logistics-risk-1"],
        effects: &["project-delay-1"],
        root_cause: false,
        exposure: Some((15_000.0, 20.0, "days")),
    },
    SampleRisk {
        description: "Module price tariff",
        probability: 3,
        impact: 4,
        mitigation: 0.5,
        owner: "Project Manager",
        category: "Financial",
        project: SOLAR_PROJECT,
        status: RiskStatus::InProgress,
        notes: "Weekly vendor calls established, technical specifications documented",
        comments: "Previous project had specification issues costing $120K. Implementing structured communication protocol.",
        causes: &[],
        effects: &["project-delay-1", "cost-overrun-1"],
        root_cause: true,
        exposure: Some((10_000.0, 10.0, "% tariff")),
    },
    SampleRisk {
        description: "Regulatory penalty",
        probability: 4,
        impact: 4,
        mitigation: 0.3,
        owner: "Project Director",
        category: "Regulatory",
        project: SOLAR_PROJECT,
        status: RiskStatus::Open,
        notes: "Contingency plans activated, stakeholder communication increased",
        comments: "Multiple dependencies creating compound risk. May need to adjust delivery timeline.",
        causes: &["communication-risk-1"],
        effects: &[],
        root_cause: false,
        exposure: Some((250_000.0, 1.0, "occurrence")),
    },
    SampleRisk {
        description: "Ambiguous Interconnection Agreement",
        probability: 3,
        impact: 3,
        mitigation: 0.6,
        owner: "Legal Team",
        category: "Legal",
        project: SOLAR_PROJECT,
        status: RiskStatus::Open,
        notes: "Legal review in progress, seeking clarification from utility company",
        comments: "Agreement terms need clarification to avoid delays",
        causes: &[],
        effects: &["interconnection-delay-1"],
        root_cause: true,
        exposure: Some((5_000.0, 30.0, "days")),
    },
    SampleRisk {
        description: "Inexperienced Subcontractor",
        probability: 4,
        impact: 3,
        mitigation: 0.7,
        owner: "Construction Manager",
        category: "Human Resources",
        project: SOLAR_PROJECT,
        status: RiskStatus::InProgress,
        notes: "Additional training provided, senior oversight assigned",
        comments: "New subcontractor requires additional supervision",
        causes: &[],
        effects: &["interconnection-delay-1"],
        root_cause: true,
        exposure: Some((8_000.0, 15.0, "days")),
    },
    SampleRisk {
        description: "Port Congestion",
        probability: 5,
        impact: 2,
        mitigation: 0.4,
        owner: "Logistics Manager",
        category: "Logistics",
        project: SOLAR_PROJECT,
        status: RiskStatus::Open,
        notes: "Monitoring port conditions, considering alternative routes",
        comments: "Seasonal congestion affecting delivery schedules",
        causes: &[],
        effects: &["construction-slippage-1"],
        root_cause: true,
        exposure: Some((12_000.0, 10.0, "days")),
    },
    SampleRisk {
        description: "Delayed Interconnection Approval",
        probability: 3,
        impact: 4,
        mitigation: 0.5,
        owner: "Project Manager",
        category: "Regulatory",
        project: SOLAR_PROJECT,
        status: RiskStatus::Open,
        notes: "Following up with utility company weekly",
        comments: "Approval process taking longer than expected",
        causes: &["ambiguous-agreement-1", "inexperienced-subcontractor-1"],
        effects: &["cod-delayed-1"],
        root_cause: false,
        exposure: Some((20_000.0, 5.0, "days")),
    },
    SampleRisk {
        description: "COD Delayed by 5 Days",
        probability: 4,
        impact: 5,
        mitigation: 0.2,
        owner: "Project Director",
        category: "Schedule",
        project: SOLAR_PROJECT,
        status: RiskStatus::Open,
        notes: "Assessing impact on project timeline and revenue",
        comments: "Final effect of multiple risk factors converging",
        causes: &[
            "interconnection-delay-1",
            "inspection-delay-1",
            "construction-slippage-1",
        ],
        effects: &[],
        root_cause: false,
        exposure: Some((50_000.0, 5.0, "days")),
    },
    SampleRisk {
        description: "Battery supplier quality control issues affecting performance specifications",
        probability: 2,
        impact: 5,
        mitigation: 0.7,
        owner: "Quality Assurance Lead",
        category: "Quality",
        project: BATTERY_PROJECT,
        status: RiskStatus::Mitigated,
        notes: "Enhanced QA process implemented, third-party testing required",
        comments: "Previous batch had 15% failure rate. New testing protocol reduces risk significantly.",
        causes: &[],
        effects: &[],
        root_cause: false,
        exposure: None,
    },
    SampleRisk {
        description: "Battery technology obsolescence during long procurement cycle",
        probability: 3,
        impact: 3,
        mitigation: 0.4,
        owner: "Technology Lead",
        category: "Technology",
        project: BATTERY_PROJECT,
        status: RiskStatus::Open,
        notes: "Technology roadmap review scheduled quarterly",
        comments: "Battery tech evolving rapidly. Need to balance cutting-edge vs proven technology.",
        causes: &[],
        effects: &[],
        root_cause: false,
        exposure: None,
    },
    SampleRisk {
        description: "Key technical personnel departure affecting both solar and battery projects",
        probability: 2,
        impact: 4,
        mitigation: 0.6,
        owner: "HR Director",
        category: "Human Resources",
        project: SOLAR_PROJECT,
        status: RiskStatus::InProgress,
        notes: "Knowledge transfer sessions ongoing, backup personnel identified",
        comments: "Lost senior engineer last year. Implementing knowledge retention strategies.",
        causes: &[],
        effects: &[],
        root_cause: false,
        exposure: None,
    },
    SampleRisk {
        description: "Regulatory changes affecting renewable energy procurement standards",
        probability: 3,
        impact: 4,
        mitigation: 0.3,
        owner: "Compliance Officer",
        category: "Regulatory",
        project: BATTERY_PROJECT,
        status: RiskStatus::Open,
        notes: "Monitoring regulatory developments, engaging industry associations",
        comments: "New environmental standards expected Q2. May impact component selection.",
        causes: &[],
        effects: &[],
        root_cause: false,
        exposure: None,
    },
    SampleRisk {
        description: "Currency fluctuation impacting international component costs",
        probability: 4,
        impact: 3,
        mitigation: 0.2,
        owner: "Finance Director",
        category: "Financial",
        project: SOLAR_PROJECT,
        status: RiskStatus::Open,
        notes: "Exploring currency hedging options",
        comments: "USD strengthening affecting procurement costs. 8% increase observed this quarter.",
        causes: &[],
        effects: &[],
        root_cause: false,
        exposure: None,
    },
    SampleRisk {
        description: "Market volatility affecting renewable energy investment funding",
        probability: 3,
        impact: 5,
        mitigation: 0.1,
        owner: "CFO",
        category: "Market",
        project: BATTERY_PROJECT,
        status: RiskStatus::Open,
        notes: "Diversifying funding sources, securing letters of credit",
        comments: "Interest rates rising. Green energy funding becoming more competitive.",
        causes: &[],
        effects: &[],
        root_cause: false,
        exposure: None,
    },
];

fn battery_mitigation_date() -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).single()
}

fn ids(raw: &[&str]) -> Vec<RiskId> {
    raw.iter().map(|id| RiskId::new(*id)).collect()
}

/// The demonstration register as drafts stamped with `now`.
pub fn sample_register(now: DateTime<Utc>) -> Result<Vec<RiskDraft>, RecordError> {
    SAMPLE_RISKS
        .iter()
        .map(|sample| {
            let mut input = RiskInput::new(sample.description, sample.probability, sample.impact)
                .with_mitigation(sample.mitigation)
                .with_owner(sample.owner)
                .with_category(sample.category)
                .with_project(sample.project)
                .with_status(sample.status)
                .with_notes(sample.notes)
                .with_comments(sample.comments)
                .with_relationships(ids(sample.causes), ids(sample.effects), sample.root_cause);
            if let Some((per_unit, units, unit_type)) = sample.exposure {
                input = input.with_exposure(FinancialExposure::new(per_unit, units).with_unit_type(unit_type));
            }
            if sample.status == RiskStatus::Mitigated {
                input.mitigation_date = battery_mitigation_date();
            }
            create_record_at(input, now)
        })
        .collect()
}
