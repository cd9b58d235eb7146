//! Tests for merge-with-defaults and schema migration

use approx::assert_relative_eq;
use bizcase::data::schema::{self, SchemaError};
use bizcase::prelude::*;
use serde_json::json;

#[test]
fn test_record_missing_new_field_loads() {
    let mut record = schema::to_record(&BusinessCaseData::expected()).unwrap();
    record
        .as_object_mut()
        .unwrap()
        .remove("rdCostOfRevenuePercent");

    let data = merge_with_defaults(&record, &BusinessCaseData::default()).unwrap();
    assert_eq!(data.rd_cost_of_revenue_percent, 25.0);
    assert_eq!(data.time_reduction_percent, 70.0);

    let r = data.benefits();
    assert_relative_eq!(
        r.corporate_pnl.rd_cost_of_revenue,
        r.corporate_pnl.gross_royalty_revenue * 0.25,
        max_relative = 1e-12
    );
}

#[test]
fn test_legacy_dashboard_record() {
    let legacy = json!({
        "clinicCount": 880,
        "implementationCost": 400000,
        "refreshReductionPercent": 75,
        "workaroundReductionPercent": 65,
        "extraStepsReductionPercent": 50,
        "corporateNMFPercent": 2.5,
        "currentRevenueLeakagePercent": 1.5,
        "revenueLeakageReductionPercent": 60
    });
    let data = merge_with_defaults(&legacy, &BusinessCaseData::default()).unwrap();

    assert_relative_eq!(data.implementation_capex, 320_000.0, epsilon = 1e-6);
    assert_relative_eq!(data.implementation_opex, 80_000.0, epsilon = 1e-6);
    // (60 × 75 + 22.5 × 65) / 82.5
    assert_relative_eq!(
        data.time_reduction_percent,
        (60.0 * 75.0 + 22.5 * 65.0) / 82.5,
        epsilon = 1e-9
    );
    assert_eq!(data.marketing_fund_percent, 2.5);
    assert_eq!(data.revenue_leakage_reduction_percent, 60.0);
}

#[test]
fn test_merged_over_is_field_update() {
    let data = BusinessCaseData::expected();
    let updated = data
        .merged_over(&json!({"showRateImprovement": 9, "schemaVersion": 2}))
        .unwrap();
    assert_eq!(updated.show_rate_improvement, 9.0);
    assert_eq!(updated.time_reduction_percent, data.time_reduction_percent);
}

#[test]
fn test_merge_rejects_bad_records() {
    let defaults = BusinessCaseData::default();
    assert!(matches!(
        merge_with_defaults(&json!([1, 2]), &defaults),
        Err(SchemaError::NotAnObject { .. })
    ));
    assert!(matches!(
        merge_with_defaults(&json!({"schemaVersion": 99}), &defaults),
        Err(SchemaError::UnsupportedVersion { version: 99, .. })
    ));
    assert!(matches!(
        merge_with_defaults(&json!({"schemaVersion": "3"}), &defaults),
        Err(SchemaError::InvalidVersion { .. })
    ));
    assert!(matches!(
        merge_with_defaults(&json!({"clinicCount": "many"}), &defaults),
        Err(SchemaError::InvalidField(_))
    ));
}
