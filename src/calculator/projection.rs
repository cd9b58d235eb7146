//! Multi-year series: benefit projection, network expansion and amortization
//!
//! These are small iterative accumulations over the modeling horizon. The
//! projection scales an annual benefit by the clinic-count ratio of each year
//! rather than re-deriving the stage arithmetic.

use super::types::*;
use crate::data::BusinessCaseData;

/// Longest horizon, in years, any multi-year series is generated for
///
/// Projection, expansion and useful-life inputs above this are clamped and
/// reported as [`Warning::HorizonClamped`].
pub const MAX_HORIZON_YEARS: u32 = 100;

/// A year count limited to [`MAX_HORIZON_YEARS`]
#[inline]
pub fn clamp_horizon(years: u32) -> u32 {
    years.min(MAX_HORIZON_YEARS)
}

/// Exponent for compounding over `offset` years
#[inline]
fn exponent(offset: usize) -> i32 {
    i32::try_from(offset).unwrap_or(i32::MAX)
}

/// Calendar label of a year offset; saturates at the `i32` range
#[inline]
pub fn year_label(start_year: i32, offset: usize) -> i32 {
    start_year.saturating_add(exponent(offset))
}

/// Clinic count for a year offset (0-based)
///
/// Uses the per-year override when one exists for `offset`, otherwise
/// compounds the baseline at the flat growth rate and rounds to whole clinics.
pub fn clinics_for_year(data: &BusinessCaseData, offset: usize) -> f64 {
    match data.projected_clinic_counts.get(offset) {
        Some(&count) => count,
        None => {
            let growth = 1.0 + data.clinic_growth_rate / 100.0;
            (data.clinic_count * growth.powi(exponent(offset))).round()
        }
    }
}

/// Recurring OpEx for a year offset, inflated annually
pub fn opex_for_year(data: &BusinessCaseData, offset: usize) -> f64 {
    let inflation = 1.0 + data.annual_inflation_rate / 100.0;
    data.recurring_annual_opex * inflation.powi(exponent(offset))
}

/// Year-by-year cash flow for an annual benefit
///
/// Year benefit = `annual_benefit × clinics(year) / baseline clinics`; the
/// ratio is `NaN` when the baseline clinic count is zero. Cumulative benefit
/// is the running sum of net benefits in year order.
pub fn projection_series(data: &BusinessCaseData, annual_benefit: f64) -> Vec<YearlyProjection> {
    let horizon = clamp_horizon(data.projection_years) as usize;
    let mut cumulative = 0.0;

    (0..horizon)
        .map(|offset| {
            let clinic_count = clinics_for_year(data, offset);
            let ratio = if data.clinic_count == 0.0 {
                f64::NAN
            } else {
                clinic_count / data.clinic_count
            };
            let benefits = annual_benefit * ratio;
            let recurring_expenses = opex_for_year(data, offset);
            let net_benefit = benefits - recurring_expenses;
            cumulative += net_benefit;

            YearlyProjection {
                year: year_label(data.start_year, offset),
                clinic_count,
                benefits,
                recurring_expenses,
                net_benefit,
                cumulative_benefit: cumulative,
            }
        })
        .collect()
}

/// Franchise fees and royalties from incremental openings
///
/// Each year adds `incremental_new_clinics_per_year` clinics; fees are
/// one-time per opening, royalties accrue on the cumulative incremental base
/// at the forecast average clinic revenue.
pub fn expansion(data: &BusinessCaseData, fc: &Forecast) -> ExpansionTotals {
    let royalty = fc.royalty();
    let mut cumulative = 0.0;
    let horizon = clamp_horizon(data.expansion_years);
    let mut years = Vec::with_capacity(horizon as usize);

    for year in 1..=horizon {
        cumulative += data.incremental_new_clinics_per_year;
        years.push(ExpansionYear {
            year,
            baseline_openings: data.baseline_new_clinics_per_year,
            incremental_openings: data.incremental_new_clinics_per_year,
            cumulative_incremental_clinics: cumulative,
            franchise_fees: data.incremental_new_clinics_per_year * data.franchise_fee,
            royalty_revenue: cumulative * fc.average_clinic_revenue * royalty,
        });
    }

    ExpansionTotals {
        baseline_openings: years.iter().map(|y| y.baseline_openings).sum(),
        incremental_clinics: cumulative,
        franchise_fees: years.iter().map(|y| y.franchise_fees).sum(),
        royalty_revenue: years.iter().map(|y| y.royalty_revenue).sum(),
        years,
    }
}

/// Straight-line amortization of the implementation cost
///
/// CapEx is amortized evenly over `useful_life_years` (all in the first year
/// when the useful life is zero); OpEx is expensed in the first year. Rows
/// cover the longer of the projection horizon and the useful life.
pub fn amortization_schedule(data: &BusinessCaseData, pnl: &CorporatePnl) -> Vec<AmortizationYear> {
    let life = clamp_horizon(data.useful_life_years) as usize;
    let rows = (clamp_horizon(data.projection_years) as usize).max(life);
    let annual_amortization = if life == 0 {
        0.0
    } else {
        data.implementation_capex / life as f64
    };

    let mut cumulative = 0.0;
    (0..rows)
        .map(|offset| {
            let amortization = match (life, offset) {
                (0, 0) => data.implementation_capex,
                (0, _) => 0.0,
                (l, o) if o < l => annual_amortization,
                _ => 0.0,
            };
            let expensed_opex = if offset == 0 {
                data.implementation_opex
            } else {
                0.0
            };
            let net_impact = pnl.net_royalty_revenue + pnl.corporate_it_savings
                - amortization
                - expensed_opex;
            cumulative += net_impact;

            AmortizationYear {
                year: year_label(data.start_year, offset),
                net_royalty_impact: pnl.net_royalty_revenue,
                it_savings: pnl.corporate_it_savings,
                amortization,
                expensed_opex,
                net_impact,
                cumulative_impact: cumulative,
            }
        })
        .collect()
}
