//! Pure stage functions of the benefit calculator
//!
//! Each stage takes the input record plus exactly the earlier results it
//! depends on, so the derivation order is visible in the signatures.

use super::types::*;
use crate::data::{forecast as apply_change, BusinessCaseData};

/// Working days used to annualize daily time savings
pub const WORKING_DAYS_PER_YEAR: f64 = 260.0;

/// Months in a year, for payback conversion
const MONTHS_PER_YEAR: f64 = 12.0;

/// Multiple used by the static five-year figures
pub const FIVE_YEAR_MULTIPLE: f64 = 5.0;

// ============================================================================
// Forecasts
// ============================================================================

/// Apply every global change delta
pub fn forecast(data: &BusinessCaseData) -> Forecast {
    Forecast {
        baseline_clinic_count: data.clinic_count,
        clinic_count: apply_change(data.clinic_count, data.clinic_count_change).round(),
        monthly_leads_per_clinic: apply_change(
            data.monthly_leads_per_clinic,
            data.monthly_leads_change,
        ),
        average_clinic_revenue: apply_change(
            data.average_clinic_revenue,
            data.average_clinic_revenue_change,
        ),
        wellness_plan_price: apply_change(data.wellness_plan_price, data.wellness_plan_price_change),
        patient_ltv_months: apply_change(data.average_patient_ltv_months, data.patient_ltv_change),
        hourly_wage: apply_change(data.average_hourly_wage, data.hourly_wage_change),
        royalty_percent: apply_change(data.corporate_royalty_percent, data.royalty_change),
        intro_price: data.intro_price,
    }
}

// ============================================================================
// Stage 1-4
// ============================================================================

/// Lead volume, qualified funnel entry and marketing savings
pub fn acquisition(data: &BusinessCaseData, fc: &Forecast) -> AcquisitionBenefit {
    let total_annual_leads = fc.monthly_leads_per_clinic * 12.0 * fc.clinic_count;
    let marketing_savings =
        total_annual_leads * data.cost_per_lead * (data.cost_per_lead_reduction_percent / 100.0);
    let qualified_leads = total_annual_leads * (data.lead_qualification_rate / 100.0);

    AcquisitionBenefit {
        total_annual_leads,
        qualified_leads,
        marketing_savings,
    }
}

/// Booking × show compounding on the qualified funnel
pub fn conversion(
    data: &BusinessCaseData,
    fc: &Forecast,
    acq: &AcquisitionBenefit,
) -> ConversionBenefit {
    let baseline_effective_conversion =
        (data.lead_to_appointment_rate / 100.0) * (data.appointment_show_rate / 100.0);
    let improved_effective_conversion = ((data.lead_to_appointment_rate
        + data.appointment_rate_improvement)
        / 100.0)
        * ((data.appointment_show_rate + data.show_rate_improvement) / 100.0);

    let incremental_patients =
        acq.qualified_leads * (improved_effective_conversion - baseline_effective_conversion);
    let revenue_per_conversion = fc.intro_price
        + fc.wellness_plan_price * fc.patient_ltv_months * (data.plan_conversion_rate / 100.0);

    ConversionBenefit {
        baseline_effective_conversion,
        improved_effective_conversion,
        incremental_patients,
        revenue_per_conversion,
        benefit: incremental_patients * revenue_per_conversion,
    }
}

/// Patients entering through the funnel at the baseline conversion rate
///
/// Uses the baseline conversion; the conversion lift belongs to the
/// conversion stage only.
#[inline]
fn first_time_patients(acq_qualified: f64, conv: &ConversionBenefit) -> f64 {
    acq_qualified * conv.baseline_effective_conversion
}

/// Royalty-scaled revenue growth of the network
pub fn global_growth(
    data: &BusinessCaseData,
    fc: &Forecast,
    acq: &AcquisitionBenefit,
    conv: &ConversionBenefit,
) -> GlobalGrowthBenefit {
    let royalty = fc.royalty();

    let new_clinics = fc.clinic_count - fc.baseline_clinic_count;
    let new_clinic_royalties = new_clinics * fc.average_clinic_revenue * royalty;

    let per_clinic_growth = fc.average_clinic_revenue - data.average_clinic_revenue;
    let existing_clinic_growth = per_clinic_growth * fc.baseline_clinic_count * royalty;

    let existing_plan_patients =
        first_time_patients(acq.qualified_leads, conv) * (data.plan_conversion_rate / 100.0);
    let price_increase = fc.wellness_plan_price - data.wellness_plan_price;
    let plan_price_growth =
        existing_plan_patients * price_increase * fc.patient_ltv_months * royalty;

    GlobalGrowthBenefit {
        new_clinic_royalties,
        existing_clinic_growth,
        plan_price_growth,
        total: new_clinic_royalties + existing_clinic_growth + plan_price_growth,
    }
}

/// Plan conversion, retention rate and global growth
pub fn retention(
    data: &BusinessCaseData,
    fc: &Forecast,
    acq: &AcquisitionBenefit,
    conv: &ConversionBenefit,
    growth: GlobalGrowthBenefit,
) -> RetentionBenefit {
    let first_time_patients = first_time_patients(acq.qualified_leads, conv);
    let additional_plan_conversions =
        first_time_patients * (data.plan_conversion_improvement / 100.0);
    let plan_conversion_value =
        additional_plan_conversions * fc.wellness_plan_price * fc.patient_ltv_months;
    let retention_rate_benefit =
        data.retention_improvement_percent * data.value_per_retention_point * fc.clinic_count;

    let total = plan_conversion_value + retention_rate_benefit + growth.total;
    RetentionBenefit {
        first_time_patients,
        additional_plan_conversions,
        plan_conversion_value,
        retention_rate_benefit,
        global_growth: growth,
        total,
    }
}

/// Staff time, revenue leakage and IT cost
pub fn operations(data: &BusinessCaseData, fc: &Forecast) -> OperationsBenefit {
    let minutes_saved_per_day =
        data.current_system_time_minutes * (data.time_reduction_percent / 100.0);
    let annual_hours_saved = minutes_saved_per_day / 60.0 * WORKING_DAYS_PER_YEAR;
    let time_savings =
        annual_hours_saved * fc.hourly_wage * fc.clinic_count * data.average_staff_per_clinic;

    let revenue_leakage_recovery = fc.average_clinic_revenue
        * (data.current_revenue_leakage_percent / 100.0)
        * (data.revenue_leakage_reduction_percent / 100.0)
        * fc.clinic_count;

    let it_cost_reduction = data.current_annual_it_costs * (data.it_cost_reduction_percent / 100.0);

    OperationsBenefit {
        minutes_saved_per_day,
        annual_hours_saved,
        time_savings,
        revenue_leakage_recovery,
        it_cost_reduction,
        total: time_savings + revenue_leakage_recovery + it_cost_reduction,
    }
}

// ============================================================================
// Totals, ROI and corporate P&L
// ============================================================================

/// Sum the stages and split every category between corporate and franchise
pub fn allocate(
    data: &BusinessCaseData,
    fc: &Forecast,
    acq: &AcquisitionBenefit,
    conv: &ConversionBenefit,
    ret: &RetentionBenefit,
    ops: &OperationsBenefit,
) -> BenefitAllocation {
    let royalty = fc.royalty();

    let acquisition = Split::at_rate(acq.total(), royalty);
    let conversion = Split::at_rate(conv.total(), royalty);
    let retention = Split::at_rate(ret.core(), royalty);
    let time_savings = Split::at_rate(ops.time_savings, royalty);
    let revenue_leakage = Split::at_rate(ops.revenue_leakage_recovery, royalty);
    let it_cost = Split::at_rate(
        ops.it_cost_reduction,
        data.corporate_it_cost_allocation / 100.0,
    );
    let global_growth = Split {
        total: ret.global_growth.total,
        corporate: ret.global_growth.total,
        franchise: 0.0,
    };

    let total_annual_benefits = acq.total() + conv.total() + ret.total + ops.total;
    let corporate_annual_benefits = acquisition.corporate
        + conversion.corporate
        + retention.corporate
        + time_savings.corporate
        + revenue_leakage.corporate
        + it_cost.corporate
        + global_growth.corporate;

    BenefitAllocation {
        acquisition_benefit: acq.total(),
        conversion_benefit: conv.total(),
        retention_benefit: ret.total,
        operations_benefit: ops.total,
        acquisition,
        conversion,
        retention,
        time_savings,
        revenue_leakage,
        it_cost,
        global_growth,
        total_annual_benefits,
        corporate_annual_benefits,
        franchise_annual_benefits: total_annual_benefits - corporate_annual_benefits,
    }
}

/// Months of benefit needed to recover `cost`
///
/// `NaN` for a zero cost, `+Infinity` when a positive cost is never recovered.
pub fn payback_months(cost: f64, annual_benefit: f64) -> f64 {
    if cost == 0.0 {
        f64::NAN
    } else if cost > 0.0 && annual_benefit <= 0.0 {
        f64::INFINITY
    } else {
        cost / annual_benefit * MONTHS_PER_YEAR
    }
}

/// Return on `cost` for a given cumulative benefit, in percent
///
/// `NaN` for a zero cost.
pub fn roi_pct(cost: f64, benefit: f64) -> f64 {
    if cost == 0.0 {
        f64::NAN
    } else {
        (benefit - cost) / cost * 100.0
    }
}

/// Annual benefit per forecast clinic; `NaN` without clinics
pub fn per_clinic(annual_benefit: f64, clinics: f64) -> f64 {
    if clinics == 0.0 {
        f64::NAN
    } else {
        annual_benefit / clinics
    }
}

fn roi_figures(cost: f64, annual_benefit: f64, clinics: f64) -> RoiFigures {
    let five_year = annual_benefit * FIVE_YEAR_MULTIPLE;
    RoiFigures {
        annual_benefit,
        payback_months: payback_months(cost, annual_benefit),
        first_year_roi_pct: roi_pct(cost, annual_benefit),
        five_year_roi_pct: roi_pct(cost, five_year),
        five_year_cumulative_benefit: five_year,
        per_clinic_annual_benefit: per_clinic(annual_benefit, clinics),
    }
}

/// Payback and ROI on the system-wide and corporate bases
pub fn roi(data: &BusinessCaseData, fc: &Forecast, alloc: &BenefitAllocation) -> RoiMetrics {
    let cost = data.implementation_cost();
    RoiMetrics {
        implementation_cost: cost,
        system: roi_figures(cost, alloc.total_annual_benefits, fc.clinic_count),
        corporate: roi_figures(cost, alloc.corporate_annual_benefits, fc.clinic_count),
    }
}

/// Royalty revenue, R&D deduction and fee income on the franchise revenue gain
pub fn corporate_pnl(
    data: &BusinessCaseData,
    fc: &Forecast,
    conv: &ConversionBenefit,
    ret: &RetentionBenefit,
    ops: &OperationsBenefit,
) -> CorporatePnl {
    let franchise_revenue_benefit = ops.revenue_leakage_recovery + ret.core() + conv.total();
    let gross_royalty_revenue = franchise_revenue_benefit * fc.royalty();
    let rd_cost_of_revenue = gross_royalty_revenue * (data.rd_cost_of_revenue_percent / 100.0);

    CorporatePnl {
        franchise_revenue_benefit,
        gross_royalty_revenue,
        rd_cost_of_revenue,
        net_royalty_revenue: gross_royalty_revenue - rd_cost_of_revenue,
        merchant_fees: franchise_revenue_benefit * (data.merchant_fee_percent / 100.0),
        marketing_fund_fees: franchise_revenue_benefit * (data.marketing_fund_percent / 100.0),
        corporate_it_savings: ops.it_cost_reduction * (data.corporate_it_cost_allocation / 100.0),
    }
}
