//! Export-then-import behaviour through real workbook bytes.

use adapter_xlsx::{
    import_bytes, import_file_at, project_summary_workbook, register_workbook, save_workbook,
    ExportOptions, SheetFormat,
};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use risk_analytics::{AnalyticsPolicy, RiskAnalyzer};
use risk_core::factory::{create_record_at, update_record_at, RiskChanges, RiskInput};
use risk_core::types::{RiskId, RiskRecord, RiskStatus};

fn record(id: &str, description: &str, probability: u8, impact: u8) -> RiskRecord {
    create_record_at(
        RiskInput::new(description, probability, impact),
        Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
    )
    .unwrap()
    .with_id(RiskId::new(id))
}

fn register() -> Vec<RiskRecord> {
    vec![
        record("R1", "Panel delivery delayed", 4, 3),
        {
            let mut r = record("R2", "Inverter recall", 2, 5);
            r.project = Some("Solar Farm".to_string());
            r.status = RiskStatus::InProgress;
            r.owner = Some("Procurement".to_string());
            r
        },
    ]
}

#[test]
fn test_register_round_trip() {
    let records = register();
    let bytes = register_workbook(&records, &ExportOptions::default())
        .unwrap()
        .save_to_buffer()
        .unwrap();

    let result = import_bytes(bytes, SheetFormat::Workbook);
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.records.len(), records.len());

    for (exported, imported) in records.iter().zip(&result.records) {
        assert_eq!(imported.description, exported.description);
        assert_eq!(imported.probability(), exported.probability());
        assert_eq!(imported.impact(), exported.impact());
        assert_eq!(imported.score(), exported.score());
        assert_eq!(imported.project, exported.project);
        assert_eq!(imported.owner, exported.owner);
        assert_eq!(imported.status, exported.status);
    }
}

#[test]
fn test_mitigation_survives_percent_column() {
    let mitigated = update_record_at(
        &record("R1", "Transformer overheating", 5, 4),
        RiskChanges::new().mitigation(0.35),
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
    )
    .unwrap();

    let bytes = register_workbook(&[mitigated.clone()], &ExportOptions::default())
        .unwrap()
        .save_to_buffer()
        .unwrap();
    let result = import_bytes(bytes, SheetFormat::Workbook);
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.records[0].mitigation_effectiveness(), 0.35);
    assert_eq!(result.records[0].residual_score(), mitigated.residual_score());
}

#[test]
fn test_out_of_range_row_is_skipped() {
    let csv = "Name,Probability,Impact\nToo likely,10,3\nCertain disaster,5,5\n";
    let result = import_bytes(csv.as_bytes().to_vec(), SheetFormat::Csv);
    assert!(!result.success);
    assert_eq!(result.errors, vec!["Row 1: Probability must be between 1 and 5"]);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].score(), 25);
}

#[test]
fn test_import_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("register.csv");
    std::fs::write(
        &path,
        "Description,Probability,Impact,Status,Project\n\
         Permit delay,3,3,Mitigated,Wind Farm\n\
         Crane shortage,2,2,,Wind Farm\n",
    )
    .unwrap();

    let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let result = import_file_at(&path, now);
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].status, RiskStatus::Mitigated);
    assert_eq!(result.records[1].status, RiskStatus::Open);
    assert_eq!(result.records[1].project.as_deref(), Some("Wind Farm"));
    assert!(result.records.iter().all(|r| r.created_at == now));
}

#[test]
fn test_unsupported_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("register.txt");
    std::fs::write(&txt, "hello").unwrap();

    let result = import_file_at(&txt, Utc::now());
    assert!(!result.success);
    assert!(result.errors[0].starts_with("Unsupported file type 'txt'"));

    let missing = import_file_at(&dir.path().join("gone.xlsx"), Utc::now());
    assert!(!missing.success);
    assert!(missing.records.is_empty());
}

#[test]
fn test_saved_project_workbook_is_readable() {
    let mut records = register();
    for r in &mut records {
        r.project = Some("Solar Farm".to_string());
    }
    let as_of = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
    let summary = RiskAnalyzer::new(AnalyticsPolicy::default())
        .summarize_project(&records, "Solar Farm", as_of);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.xlsx");
    let mut workbook = project_summary_workbook(&[summary], &ExportOptions::default()).unwrap();
    save_workbook(&mut workbook, &path).unwrap();

    // The first sheet is the summary; its required columns are absent.
    let result = import_file_at(&path, as_of);
    assert!(!result.success);
    assert!(result
        .errors
        .iter()
        .any(|e| e == "Missing required column: probability/likelihood"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_ratings_survive_round_trip(
        ratings in prop::collection::vec((1u8..=5, 1u8..=5), 1..8)
    ) {
        let records: Vec<RiskRecord> = ratings
            .iter()
            .enumerate()
            .map(|(i, (p, im))| record(&format!("R{i}"), &format!("Risk {i}"), *p, *im))
            .collect();
        let bytes = register_workbook(&records, &ExportOptions::default())
            .unwrap()
            .save_to_buffer()
            .unwrap();
        let result = import_bytes(bytes, SheetFormat::Workbook);

        prop_assert!(result.success);
        let imported: Vec<(u8, u8)> = result
            .records
            .iter()
            .map(|r| (r.probability(), r.impact()))
            .collect();
        prop_assert_eq!(imported, ratings);
    }
}
