//! Main benefit-calculation orchestrator
//!
//! Runs the stage functions in their fixed dependency order, then derives the
//! multi-year series and collects quality warnings.

use super::projection;
use super::stages;
use super::types::*;
use crate::data::BusinessCaseData;

/// Compute the complete benefit calculation for one input record
///
/// Pure and infallible: numeric anomalies resolve to `NaN`/`Infinity`
/// sentinels and are listed in [`BenefitCalculation::quality`].
pub fn calculate_benefits(data: &BusinessCaseData) -> BenefitCalculation {
    // Global forecasts feed every later stage
    let fc = stages::forecast(data);

    let acquisition = stages::acquisition(data, &fc);
    let conversion = stages::conversion(data, &fc, &acquisition);
    let growth = stages::global_growth(data, &fc, &acquisition, &conversion);
    let retention = stages::retention(data, &fc, &acquisition, &conversion, growth);
    let operations = stages::operations(data, &fc);

    let allocation = stages::allocate(data, &fc, &acquisition, &conversion, &retention, &operations);
    let roi = stages::roi(data, &fc, &allocation);

    let projection = projection::projection_series(data, allocation.total_annual_benefits);
    let corporate_projection =
        projection::projection_series(data, allocation.corporate_annual_benefits);
    let five_year_net_benefit = projection
        .last()
        .map_or(0.0, |y| y.cumulative_benefit)
        - roi.implementation_cost;

    let corporate_pnl = stages::corporate_pnl(data, &fc, &conversion, &retention, &operations);
    let expansion = projection::expansion(data, &fc);
    let including_expansion_total = allocation.total_annual_benefits + expansion.total();
    let amortization = projection::amortization_schedule(data, &corporate_pnl);

    let quality = build_quality(data, &allocation);

    tracing::debug!(
        total = allocation.total_annual_benefits,
        corporate = allocation.corporate_annual_benefits,
        franchise = allocation.franchise_annual_benefits,
        payback_months = roi.system.payback_months,
        "Calculated business case"
    );
    for warning in &quality.warnings {
        tracing::warn!("{}", warning);
    }

    BenefitCalculation {
        forecast: fc,
        acquisition,
        conversion,
        retention,
        operations,
        allocation,
        roi,
        projection,
        corporate_projection,
        five_year_net_benefit,
        corporate_pnl,
        expansion,
        including_expansion_total,
        amortization,
        quality,
    }
}

fn build_quality(data: &BusinessCaseData, alloc: &BenefitAllocation) -> Quality {
    let mut warnings = Vec::new();

    if data.implementation_cost() == 0.0 {
        warnings.push(Warning::ZeroImplementationCost);
    }
    if alloc.total_annual_benefits <= 0.0 {
        warnings.push(Warning::NonPositiveBenefit {
            basis: BenefitBasis::System,
        });
    }
    if alloc.corporate_annual_benefits <= 0.0 {
        warnings.push(Warning::NonPositiveBenefit {
            basis: BenefitBasis::Corporate,
        });
    }
    if data.clinic_count == 0.0 {
        warnings.push(Warning::ZeroBaselineClinics);
    }

    for (field, requested) in [
        ("projectionYears", data.projection_years),
        ("expansionYears", data.expansion_years),
        ("usefulLifeYears", data.useful_life_years),
    ] {
        let used = projection::clamp_horizon(requested);
        if used != requested {
            warnings.push(Warning::HorizonClamped {
                field: field.to_string(),
                requested,
                used,
            });
        }
    }

    let provided = data.projected_clinic_counts.len();
    let horizon = projection::clamp_horizon(data.projection_years) as usize;
    if provided > 0 && provided < horizon {
        warnings.push(Warning::ProjectionOverrideShort { provided, horizon });
    }

    warnings.extend(
        data.negative_fields()
            .into_iter()
            .map(|field| Warning::NegativeInput {
                field: field.to_string(),
            }),
    );

    Quality { warnings }
}
