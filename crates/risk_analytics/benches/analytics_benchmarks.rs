//! Criterion benchmarks for risk_analytics aggregation.
//!
//! Benchmarks cover:
//! - Register summary over growing registers
//! - Project summaries and project analytics across all projects

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use risk_analytics::{summarize, RiskAnalyzer};
use risk_core::factory::{create_record_at, RiskInput};
use risk_core::types::{RiskId, RiskRecord, RiskStatus};

/// Generate a synthetic register spread over `n_projects` projects.
fn generate_register(n_records: usize, n_projects: usize) -> Vec<RiskRecord> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n_records)
        .map(|n| {
            let probability = (n % 5) as u8 + 1;
            let impact = ((n * 7) % 5) as u8 + 1;
            let status = RiskStatus::ALL[n % RiskStatus::ALL.len()];
            let mut input = RiskInput::new(format!("Synthetic risk {n}"), probability, impact)
                .with_mitigation((n % 10) as f64 / 10.0)
                .with_project(format!("Project {}", n % n_projects))
                .with_status(status);
            if n % 3 == 0 {
                input.mitigation_date = Some(start + Duration::days(n as i64 + 10));
            }
            create_record_at(input, start + Duration::days(n as i64 % 180))
                .unwrap()
                .with_id(RiskId::new(format!("R{n}")))
        })
        .collect()
}

/// Benchmark the register-wide summary.
fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for n_records in [50, 200, 500] {
        let records = generate_register(n_records, 5);
        group.bench_with_input(BenchmarkId::new("summarize", n_records), &records, |b, records| {
            b.iter(|| summarize(black_box(records)));
        });
    }

    group.finish();
}

/// Benchmark per-project rollups.
fn bench_projects(c: &mut Criterion) {
    let mut group = c.benchmark_group("projects");
    let analyzer = RiskAnalyzer::default();
    let as_of = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();

    for n_records in [50, 200, 500] {
        let records = generate_register(n_records, 8);

        group.bench_with_input(
            BenchmarkId::new("summarize_project", n_records),
            &records,
            |b, records| {
                b.iter(|| analyzer.summarize_project(black_box(records), "Project 3", as_of));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("analyze_projects", n_records),
            &records,
            |b, records| {
                b.iter(|| analyzer.analyze_projects(black_box(records), as_of));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_summary, bench_projects);
criterion_main!(benches);
