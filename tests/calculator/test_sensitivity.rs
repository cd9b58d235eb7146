//! Tests for lever sweeps and preset comparison

use approx::assert_relative_eq;
use bizcase::prelude::*;
use bizcase::sensitivity::{linspace, tornado};

#[test]
fn test_sweep_matches_direct_calculation() {
    let base = BusinessCaseData::expected();
    let values = [0.0, 2.5, 5.0, 7.5];
    let points = sweep(&base, Lever::ShowRateImprovement, &values);

    for (point, value) in points.iter().zip(values) {
        let direct = Lever::ShowRateImprovement.applied(&base, value).benefits();
        assert_eq!(point.value, value);
        assert_relative_eq!(point.total_annual_benefits, direct.total_annual_benefits());
        assert_relative_eq!(point.payback_months, direct.roi.system.payback_months);
    }
}

#[test]
fn test_sweep_by_parsed_lever() {
    let lever: Lever = "itCostReductionPercent".parse().unwrap();
    let points = sweep(&BusinessCaseData::default(), lever, &linspace(0.0, 100.0, 5));
    let totals: Vec<f64> = points.iter().map(|p| p.total_annual_benefits).collect();
    assert_eq!(totals.len(), 5);
    assert_relative_eq!(totals[4], 1_500_000.0, max_relative = 1e-12);
    assert_eq!(points[0].payback_months, f64::INFINITY);
}

#[test]
fn test_cost_levers_move_roi_not_benefit() {
    let points = sweep(
        &BusinessCaseData::expected(),
        Lever::ImplementationCapEx,
        &[100_000.0, 500_000.0],
    );
    assert_relative_eq!(points[0].total_annual_benefits, points[1].total_annual_benefits);
    assert!(points[0].payback_months < points[1].payback_months);
}

#[test]
fn test_tornado_top_lever_has_impact() {
    let impacts = tornado(&BusinessCaseData::expected(), 1.0);
    assert!(impacts[0].1.abs() > 0.0);
}

#[test]
fn test_compare_presets_keeps_baselines() {
    let base = BusinessCaseData::default().with_clinic_count(400.0);
    for (kind, result) in compare_presets(&base) {
        assert_eq!(result.forecast.baseline_clinic_count, 400.0, "{kind:?}");
    }
}
