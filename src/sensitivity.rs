//! Sensitivity analysis over slider levers
//!
//! [`sweep`] moves one [`Lever`] through a list of values and recomputes the
//! full calculation for each point. Points are evaluated in parallel and
//! returned in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::calculator::{calculate_benefits, BenefitCalculation};
use crate::data::{BusinessCaseData, Lever, PresetKind};

/// Key outputs at one lever value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub lever: Lever,
    pub value: f64,
    pub total_annual_benefits: f64,
    pub corporate_annual_benefits: f64,
    pub payback_months: f64,
    pub first_year_roi_pct: f64,
    pub five_year_roi_pct: f64,
}

impl SweepPoint {
    fn from_result(lever: Lever, value: f64, r: &BenefitCalculation) -> Self {
        Self {
            lever,
            value,
            total_annual_benefits: r.allocation.total_annual_benefits,
            corporate_annual_benefits: r.allocation.corporate_annual_benefits,
            payback_months: r.roi.system.payback_months,
            first_year_roi_pct: r.roi.system.first_year_roi_pct,
            five_year_roi_pct: r.roi.system.five_year_roi_pct,
        }
    }
}

/// Evaluate `data` with `lever` set to each of `values`
pub fn sweep(data: &BusinessCaseData, lever: Lever, values: &[f64]) -> Vec<SweepPoint> {
    tracing::debug!(lever = lever.key(), points = values.len(), "Sensitivity sweep");
    values
        .par_iter()
        .map(|&value| {
            let result = calculate_benefits(&lever.applied(data, value));
            SweepPoint::from_result(lever, value, &result)
        })
        .collect()
}

/// Evenly spaced values from `start` to `end` inclusive
///
/// Returns just `start` when `steps < 2`.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![start];
    }
    let step = (end - start) / (steps - 1) as f64;
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Change in total annual benefit per unit of each lever, around `data`
///
/// Central finite difference with step `delta`; sorted by absolute impact,
/// largest first.
pub fn tornado(data: &BusinessCaseData, delta: f64) -> Vec<(Lever, f64)> {
    let mut impacts: Vec<(Lever, f64)> = Lever::all()
        .par_iter()
        .map(|&lever| {
            let current = lever.get(data);
            let up = calculate_benefits(&lever.applied(data, current + delta));
            let down = calculate_benefits(&lever.applied(data, current - delta));
            let slope = (up.allocation.total_annual_benefits
                - down.allocation.total_annual_benefits)
                / (2.0 * delta);
            (lever, slope)
        })
        .collect();
    impacts.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    impacts
}

/// Apply each improvement preset over `data` and calculate
pub fn compare_presets(data: &BusinessCaseData) -> Vec<(PresetKind, BenefitCalculation)> {
    PresetKind::all()
        .par_iter()
        .map(|&kind| (kind, calculate_benefits(&data.clone().with_preset(kind))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sweep_preserves_order() {
        let values = linspace(0.0, 10.0, 11);
        let points = sweep(&BusinessCaseData::default(), Lever::RetentionImprovement, &values);
        assert_eq!(points.len(), 11);
        for (p, v) in points.iter().zip(&values) {
            assert_eq!(p.value, *v);
            assert_relative_eq!(p.total_annual_benefits, v * 10_000.0 * 880.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_sweep_monotonic_in_time_reduction() {
        let points = sweep(
            &BusinessCaseData::default(),
            Lever::TimeReduction,
            &linspace(0.0, 90.0, 10),
        );
        assert!(points
            .windows(2)
            .all(|w| w[1].total_annual_benefits > w[0].total_annual_benefits));
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(1.0, 1.0, 1), vec![1.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_tornado_ranks_levers() {
        let impacts = tornado(&BusinessCaseData::expected(), 1.0);
        assert_eq!(impacts.len(), Lever::all().len());
        assert!(impacts
            .windows(2)
            .all(|w| w[0].1.abs() >= w[1].1.abs()));
        // Informational levers do not move the total
        let churn = impacts.iter().find(|(l, _)| *l == Lever::ChurnReduction).unwrap();
        assert_eq!(churn.1, 0.0);
    }

    #[test]
    fn test_compare_presets() {
        let results = compare_presets(&BusinessCaseData::default());
        let kinds: Vec<_> = results.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, PresetKind::all().to_vec());
        assert_eq!(results[1].1, calculate_benefits(&BusinessCaseData::expected()));
    }
}
