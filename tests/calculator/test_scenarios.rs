//! End-to-end scenarios through the public API

use approx::assert_relative_eq;
use bizcase::prelude::*;

#[test]
fn test_default_record_has_zero_benefit() {
    let r = BusinessCaseData::default().benefits();
    assert_eq!(r.total_annual_benefits(), 0.0);
    assert_eq!(r.operations.it_cost_reduction, 0.0);
    assert_eq!(r.acquisition.marketing_savings, 0.0);
    assert_eq!(r.conversion.benefit, 0.0);
    assert_eq!(r.retention.total, 0.0);
}

#[test]
fn test_doubling_clinic_count() {
    let data = BusinessCaseData {
        clinic_count_change: 100.0,
        corporate_royalty_percent: 7.0,
        ..Default::default()
    };
    let r = data.benefits();
    assert_relative_eq!(
        r.global_growth_benefit(),
        data.clinic_count * data.average_clinic_revenue * 0.07,
        max_relative = 1e-12
    );
    // Retention-rate and per-clinic stage terms scale with the doubled network
    assert_eq!(r.forecast.clinic_count, 2.0 * data.clinic_count);
}

#[test]
fn test_fractional_clinic_growth_is_rounded() {
    let data = BusinessCaseData::default().with_clinic_count_change(0.1);
    let r = data.benefits();
    // 880.88 clinics round to 881
    assert_eq!(r.forecast.clinic_count, 881.0);
    assert_relative_eq!(
        r.global_growth_benefit(),
        1.0 * 1_000_000.0 * 0.07,
        max_relative = 1e-12
    );
}

#[test]
fn test_conversion_compounding() {
    let both = BusinessCaseData::default()
        .with_conversion_improvements(3.0, 3.0)
        .benefits();
    let only_booking = BusinessCaseData::default()
        .with_conversion_improvements(3.0, 0.0)
        .benefits();
    let only_show = BusinessCaseData::default()
        .with_conversion_improvements(0.0, 3.0)
        .benefits();

    assert!(both.conversion.benefit > only_booking.conversion.benefit);
    assert!(both.conversion.benefit > only_show.conversion.benefit);
}

#[test]
fn test_expected_preset_headline_numbers() {
    let r = BusinessCaseData::expected().benefits();

    // Every category contributes
    for (name, split) in r.allocation.categories() {
        if name != "Global growth" {
            assert!(split.total > 0.0, "{name} contributes nothing");
        }
    }
    // Corporate keeps royalty on franchise categories and all of the IT saving
    assert!(r.corporate_annual_benefits() < r.total_annual_benefits());
    assert_relative_eq!(r.allocation.it_cost.corporate, 450_000.0, max_relative = 1e-12);
    assert!(r.roi.system.payback_months < r.roi.corporate.payback_months);
    assert!(r.quality.is_clean(), "{:?}", r.quality.warnings);
}

#[test]
fn test_zero_cost_reports_sentinel() {
    let r = BusinessCaseData::expected()
        .with_implementation_cost(0.0, 0.0)
        .benefits();
    assert!(r.roi.system.payback_months.is_nan());
    assert!(r.roi.corporate.first_year_roi_pct.is_nan());
    assert!(r.quality.has(&Warning::ZeroImplementationCost));
    assert_eq!(bizcase::export::format_months(r.roi.system.payback_months), "N/A");
}

#[test]
fn test_out_of_domain_inputs_are_accepted() {
    let data = BusinessCaseData {
        retention_improvement_percent: -5.0,
        clinic_count: 0.0,
        ..BusinessCaseData::expected()
    };
    let r = data.benefits();
    assert!(r.quality.has(&Warning::ZeroBaselineClinics));
    assert!(r.projection.iter().all(|y| y.benefits.is_nan()));
    // Only the centralized IT saving survives an empty network
    assert_relative_eq!(r.total_annual_benefits(), 450_000.0, max_relative = 1e-12);
}

#[test]
fn test_override_shorter_than_horizon() {
    let data = BusinessCaseData::expected()
        .with_projection(6, 0.0)
        .with_projected_clinic_counts(vec![900.0]);
    let r = data.benefits();
    assert_eq!(r.projection.len(), 6);
    assert_eq!(r.projection[0].clinic_count, 900.0);
    assert!(r.projection[1..].iter().all(|y| y.clinic_count == 880.0));
    assert!(r.quality.has(&Warning::ProjectionOverrideShort {
        provided: 1,
        horizon: 6
    }));
}

#[test]
fn test_override_longer_than_horizon_is_truncated() {
    let data = BusinessCaseData::expected()
        .with_projection(2, 0.0)
        .with_projected_clinic_counts(vec![900.0, 920.0, 940.0]);
    let r = data.benefits();
    assert_eq!(r.projection.len(), 2);
    assert!(r.quality.is_clean());
}

#[test]
fn test_projection_recurring_opex_inflates() {
    let r = BusinessCaseData::expected().benefits();
    let opex: Vec<f64> = r.projection.iter().map(|y| y.recurring_expenses).collect();
    for pair in opex.windows(2) {
        assert_relative_eq!(pair[1], pair[0] * 1.03, max_relative = 1e-12);
    }
}

#[test]
fn test_batch_over_presets() {
    let inputs: Vec<BusinessCaseData> = PresetKind::all()
        .iter()
        .map(|&k| BusinessCaseData::default().with_preset(k))
        .collect();
    let results = inputs.as_slice().benefits();
    assert!(results
        .windows(2)
        .all(|w| w[0].total_annual_benefits() < w[1].total_annual_benefits()));
}

#[test]
fn test_runs_under_debug_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("bizcase=debug"))
        .with_test_writer()
        .finish();

    let r = tracing::subscriber::with_default(subscriber, || {
        BusinessCaseData::default()
            .with_clinic_count(0.0)
            .with_implementation_cost(0.0, 0.0)
            .benefits()
    });
    assert!(r.quality.has(&Warning::ZeroBaselineClinics));
    assert!(r.quality.has(&Warning::ZeroImplementationCost));
}
