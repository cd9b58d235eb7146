//! Spreadsheet and JSON export

use bizcase::export::{format_compact_currency, format_percent};
use bizcase::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn read_rows(csv: &str) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv.as_bytes())
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_csv_has_every_section() {
    let data = BusinessCaseData::expected();
    let csv = to_csv(&data, &data.benefits()).unwrap();
    let rows = read_rows(&csv);

    for section in [
        "Executive Summary",
        "Assumptions",
        "Baseline vs Future",
        "Benefit Breakdown",
        "Projection",
        "Corporate P&L",
        "Amortization",
    ] {
        assert!(
            rows.iter().any(|r| r.len() == 1 && r[0] == section),
            "missing section {section}"
        );
    }
    assert_eq!(rows[0], vec!["Executive Summary"]);
    assert_eq!(rows[1], vec!["Metric", "Corporate", "System-wide"]);
}

#[test]
fn test_csv_breakdown_total_matches_result() {
    let data = BusinessCaseData::expected();
    let r = data.benefits();
    let rows = read_rows(&to_csv(&data, &r).unwrap());

    let start = rows
        .iter()
        .position(|row| row.first().map(String::as_str) == Some("Benefit Breakdown"))
        .unwrap();
    let total = rows[start..]
        .iter()
        .find(|row| row.first().map(String::as_str) == Some("Total"))
        .unwrap();
    let value: f64 = total[1].parse().unwrap();
    assert!((value - r.total_annual_benefits()).abs() < 0.01);
}

#[test]
fn test_csv_marks_sentinels() {
    let data = BusinessCaseData::expected().with_implementation_cost(0.0, 0.0);
    let csv = to_csv(&data, &data.benefits()).unwrap();
    let payback = read_rows(&csv)
        .into_iter()
        .find(|row| row.first().map(String::as_str) == Some("Payback (months)"))
        .unwrap();
    assert_eq!(payback, vec!["Payback (months)", "N/A", "N/A"]);
}

#[test]
fn test_write_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("business_case.csv");
    let data = BusinessCaseData::optimistic();
    write_csv(&path, &data, &data.benefits()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_csv(&data, &data.benefits()).unwrap());

    let missing = dir.path().join("no_such_dir").join("out.csv");
    let err: BizCaseError = write_csv(&missing, &data, &data.benefits())
        .unwrap_err()
        .into();
    assert!(err.to_string().contains("no_such_dir"));
}

#[test]
fn test_json_document() {
    let data = BusinessCaseData::expected().with_implementation_cost(0.0, 0.0);
    let doc: Value = serde_json::from_str(&to_json(&data, &data.benefits()).unwrap()).unwrap();

    assert_eq!(doc["inputs"]["schemaVersion"], 2);
    assert_eq!(doc["inputs"]["clinicCount"], 880.0);
    assert!(doc["results"]["roi"]["system"]["paybackMonths"].is_null());

    // Exported inputs load back as the same record
    let reloaded = merge_with_defaults(&doc["inputs"], &BusinessCaseData::default()).unwrap();
    assert_eq!(reloaded, data);
}

#[test]
fn test_headline_formatting() {
    let r = BusinessCaseData::expected().benefits();
    assert!(format_compact_currency(r.total_annual_benefits()).starts_with('$'));
    assert!(format_percent(r.roi.system.first_year_roi_pct).ends_with('%'));
}
