//! Calculator result types
//!
//! This module defines the output side of the benefit calculator:
//! - [`BenefitCalculation`]: complete structured result
//! - Per-stage groups ([`AcquisitionBenefit`], [`ConversionBenefit`], ...)
//! - [`BenefitAllocation`]: corporate/franchise partition of every category
//! - [`RoiMetrics`], [`YearlyProjection`], [`CorporatePnl`], [`ExpansionTotals`]
//! - [`Quality`] and [`Warning`]: numeric anomalies surfaced as data

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Forecast values
// ============================================================================

/// Global parameters after applying their change deltas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// Baseline clinic count, as entered
    pub baseline_clinic_count: f64,
    /// Forecast clinic count, rounded to whole clinics
    pub clinic_count: f64,
    pub monthly_leads_per_clinic: f64,
    pub average_clinic_revenue: f64,
    pub wellness_plan_price: f64,
    pub patient_ltv_months: f64,
    pub hourly_wage: f64,
    /// Forecast corporate royalty rate (points of 100)
    pub royalty_percent: f64,
    /// Intro visit price (no change pair)
    pub intro_price: f64,
}

impl Forecast {
    /// Royalty rate as a fraction
    #[inline]
    pub fn royalty(&self) -> f64 {
        self.royalty_percent / 100.0
    }
}

// ============================================================================
// Stage results
// ============================================================================

/// Stage 1: lead identification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionBenefit {
    pub total_annual_leads: f64,
    /// Leads qualified at the baseline rate; entry volume of the funnel
    pub qualified_leads: f64,
    pub marketing_savings: f64,
}

impl AcquisitionBenefit {
    pub fn total(&self) -> f64 {
        self.marketing_savings
    }
}

/// Stage 2: booking and show-up conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionBenefit {
    /// booking × show at baseline rates (fraction)
    pub baseline_effective_conversion: f64,
    /// booking × show with both improvements applied (fraction)
    pub improved_effective_conversion: f64,
    pub incremental_patients: f64,
    pub revenue_per_conversion: f64,
    pub benefit: f64,
}

impl ConversionBenefit {
    pub fn total(&self) -> f64 {
        self.benefit
    }
}

/// Royalty-bearing revenue growth on existing and new clinics
///
/// Every term is already multiplied by the forecast royalty rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalGrowthBenefit {
    /// Newly added clinics × average revenue × royalty
    pub new_clinic_royalties: f64,
    /// Per-clinic revenue growth on the baseline network × royalty
    pub existing_clinic_growth: f64,
    /// Plan price increase on existing plan patients × royalty
    pub plan_price_growth: f64,
    pub total: f64,
}

/// Stage 3: plan conversion and retention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionBenefit {
    /// Qualified leads converted at the baseline effective rate
    pub first_time_patients: f64,
    pub additional_plan_conversions: f64,
    pub plan_conversion_value: f64,
    pub retention_rate_benefit: f64,
    pub global_growth: GlobalGrowthBenefit,
    /// Core retention value plus global growth
    pub total: f64,
}

impl RetentionBenefit {
    /// Plan conversion value plus retention-rate benefit, without global growth
    pub fn core(&self) -> f64 {
        self.plan_conversion_value + self.retention_rate_benefit
    }
}

/// Stage 4: operational efficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsBenefit {
    pub minutes_saved_per_day: f64,
    /// Per staff member, over 260 working days
    pub annual_hours_saved: f64,
    pub time_savings: f64,
    pub revenue_leakage_recovery: f64,
    /// Centralized cost; not scaled by clinic count
    pub it_cost_reduction: f64,
    pub total: f64,
}

// ============================================================================
// Allocation
// ============================================================================

/// Corporate/franchise partition of one amount
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Split {
    pub total: f64,
    pub corporate: f64,
    pub franchise: f64,
}

impl Split {
    /// Corporate share at `rate` (fraction), franchise keeps the remainder
    pub fn at_rate(total: f64, rate: f64) -> Self {
        let corporate = total * rate;
        Self {
            total,
            corporate,
            franchise: total - corporate,
        }
    }
}

/// Totals and per-category splits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitAllocation {
    pub acquisition_benefit: f64,
    pub conversion_benefit: f64,
    /// Includes global growth
    pub retention_benefit: f64,
    pub operations_benefit: f64,

    pub acquisition: Split,
    pub conversion: Split,
    /// Core retention only
    pub retention: Split,
    pub time_savings: Split,
    pub revenue_leakage: Split,
    pub it_cost: Split,
    /// Already royalty-scaled, allocated wholly to corporate
    pub global_growth: Split,

    pub total_annual_benefits: f64,
    pub corporate_annual_benefits: f64,
    pub franchise_annual_benefits: f64,
}

impl BenefitAllocation {
    /// Categories in reporting order
    pub fn categories(&self) -> [(&'static str, Split); 7] {
        [
            ("Acquisition", self.acquisition),
            ("Conversion", self.conversion),
            ("Retention", self.retention),
            ("Global growth", self.global_growth),
            ("Time savings", self.time_savings),
            ("Revenue leakage", self.revenue_leakage),
            ("IT cost", self.it_cost),
        ]
    }
}

// ============================================================================
// ROI
// ============================================================================

/// Which annual benefit a metric is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenefitBasis {
    System,
    Corporate,
}

impl fmt::Display for BenefitBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenefitBasis::System => write!(f, "system-wide"),
            BenefitBasis::Corporate => write!(f, "corporate"),
        }
    }
}

/// Payback and ROI for one benefit basis
///
/// `payback_months` is `NaN` when the implementation cost is zero and
/// `+Infinity` when a positive cost is never recovered. ROI percentages are
/// `NaN` when the implementation cost is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiFigures {
    pub annual_benefit: f64,
    pub payback_months: f64,
    pub first_year_roi_pct: f64,
    /// Static ×5 multiple; see the projection series for the compounding view
    pub five_year_roi_pct: f64,
    pub five_year_cumulative_benefit: f64,
    /// `NaN` when the forecast clinic count is zero
    pub per_clinic_annual_benefit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiMetrics {
    pub implementation_cost: f64,
    pub system: RoiFigures,
    pub corporate: RoiFigures,
}

// ============================================================================
// Projections
// ============================================================================

/// One modeled year of the projection series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    pub year: i32,
    pub clinic_count: f64,
    pub benefits: f64,
    pub recurring_expenses: f64,
    pub net_benefit: f64,
    pub cumulative_benefit: f64,
}

/// Corporate P&L detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporatePnl {
    /// Leakage recovery + core retention + conversion
    pub franchise_revenue_benefit: f64,
    pub gross_royalty_revenue: f64,
    pub rd_cost_of_revenue: f64,
    pub net_royalty_revenue: f64,
    pub merchant_fees: f64,
    pub marketing_fund_fees: f64,
    pub corporate_it_savings: f64,
}

/// One year of network expansion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionYear {
    /// 1-based year offset
    pub year: u32,
    pub baseline_openings: f64,
    pub incremental_openings: f64,
    pub cumulative_incremental_clinics: f64,
    pub franchise_fees: f64,
    pub royalty_revenue: f64,
}

/// Incremental franchise fees and royalties from additional openings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionTotals {
    pub years: Vec<ExpansionYear>,
    pub baseline_openings: f64,
    pub incremental_clinics: f64,
    pub franchise_fees: f64,
    pub royalty_revenue: f64,
}

impl ExpansionTotals {
    pub fn total(&self) -> f64 {
        self.franchise_fees + self.royalty_revenue
    }
}

/// One year of the straight-line amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: i32,
    pub net_royalty_impact: f64,
    pub it_savings: f64,
    pub amortization: f64,
    pub expensed_opex: f64,
    pub net_impact: f64,
    pub cumulative_impact: f64,
}

// ============================================================================
// Quality
// ============================================================================

/// Quality metrics and warnings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    pub warnings: Vec<Warning>,
}

impl Quality {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn has(&self, warning: &Warning) -> bool {
        self.warnings.contains(warning)
    }
}

/// Calculator warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// Payback and ROI are undefined
    ZeroImplementationCost,
    /// Annual benefit on this basis is zero or negative
    NonPositiveBenefit {
        basis: BenefitBasis,
    },
    /// Clinic ratios in the projection are undefined
    ZeroBaselineClinics,
    /// Per-year clinic overrides do not cover the whole horizon
    ProjectionOverrideShort {
        provided: usize,
        horizon: usize,
    },
    /// A numeric input is negative
    NegativeInput {
        field: String,
    },
    /// A year-count input exceeds the longest generated horizon
    HorizonClamped {
        field: String,
        requested: u32,
        used: u32,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ZeroImplementationCost => {
                write!(f, "Implementation cost is zero; payback and ROI are undefined")
            }
            Warning::NonPositiveBenefit { basis } => {
                write!(f, "Annual {} benefit ≤ 0; investment never pays back", basis)
            }
            Warning::ZeroBaselineClinics => {
                write!(f, "Baseline clinic count is zero; clinic ratios are undefined")
            }
            Warning::ProjectionOverrideShort { provided, horizon } => {
                write!(
                    f,
                    "{} clinic overrides for a {}-year horizon; remaining years use the growth rate",
                    provided, horizon
                )
            }
            Warning::NegativeInput { field } => write!(f, "Input '{}' is negative", field),
            Warning::HorizonClamped {
                field,
                requested,
                used,
            } => write!(
                f,
                "Input '{}' of {} years exceeds the supported horizon; using {}",
                field, requested, used
            ),
        }
    }
}

// ============================================================================
// Complete result
// ============================================================================

/// Complete benefit calculation
///
/// Always fully populated. Recomputed from scratch for every input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitCalculation {
    pub forecast: Forecast,
    pub acquisition: AcquisitionBenefit,
    pub conversion: ConversionBenefit,
    pub retention: RetentionBenefit,
    pub operations: OperationsBenefit,
    pub allocation: BenefitAllocation,
    pub roi: RoiMetrics,

    /// Year-by-year series on the system-wide benefit
    pub projection: Vec<YearlyProjection>,
    /// Year-by-year series on the corporate benefit
    pub corporate_projection: Vec<YearlyProjection>,
    /// Last cumulative projection value minus implementation cost
    pub five_year_net_benefit: f64,

    pub corporate_pnl: CorporatePnl,
    pub expansion: ExpansionTotals,
    /// Total annual benefit plus expansion fees and royalties
    pub including_expansion_total: f64,
    pub amortization: Vec<AmortizationYear>,

    pub quality: Quality,
}

impl BenefitCalculation {
    pub fn total_annual_benefits(&self) -> f64 {
        self.allocation.total_annual_benefits
    }

    pub fn corporate_annual_benefits(&self) -> f64 {
        self.allocation.corporate_annual_benefits
    }

    pub fn franchise_annual_benefits(&self) -> f64 {
        self.allocation.franchise_annual_benefits
    }

    pub fn global_growth_benefit(&self) -> f64 {
        self.retention.global_growth.total
    }

    /// Flatten result to ordered key-value pairs
    ///
    /// Ordering follows the dashboard's reading order:
    /// stages → totals → ROI → P&L → expansion
    pub fn to_row(&self) -> Vec<(&'static str, f64)> {
        let mut row = Vec::with_capacity(40);

        // Stages
        row.push(("acquisition_benefit", self.allocation.acquisition_benefit));
        row.push(("conversion_benefit", self.allocation.conversion_benefit));
        row.push(("retention_benefit", self.allocation.retention_benefit));
        row.push(("global_growth_benefit", self.retention.global_growth.total));
        row.push(("operations_benefit", self.allocation.operations_benefit));
        row.push(("time_savings", self.operations.time_savings));
        row.push(("revenue_leakage_recovery", self.operations.revenue_leakage_recovery));
        row.push(("it_cost_reduction", self.operations.it_cost_reduction));

        // Totals
        row.push(("total_annual_benefits", self.allocation.total_annual_benefits));
        row.push(("corporate_annual_benefits", self.allocation.corporate_annual_benefits));
        row.push(("franchise_annual_benefits", self.allocation.franchise_annual_benefits));

        // ROI
        row.push(("implementation_cost", self.roi.implementation_cost));
        row.push(("payback_months", self.roi.system.payback_months));
        row.push(("first_year_roi_pct", self.roi.system.first_year_roi_pct));
        row.push(("five_year_roi_pct", self.roi.system.five_year_roi_pct));
        row.push(("per_clinic_annual_benefit", self.roi.system.per_clinic_annual_benefit));
        row.push(("corporate_payback_months", self.roi.corporate.payback_months));
        row.push(("corporate_first_year_roi_pct", self.roi.corporate.first_year_roi_pct));
        row.push(("corporate_five_year_roi_pct", self.roi.corporate.five_year_roi_pct));
        row.push((
            "corporate_per_clinic_annual_benefit",
            self.roi.corporate.per_clinic_annual_benefit,
        ));
        row.push(("five_year_net_benefit", self.five_year_net_benefit));

        // Corporate P&L
        row.push(("gross_royalty_revenue", self.corporate_pnl.gross_royalty_revenue));
        row.push(("rd_cost_of_revenue", self.corporate_pnl.rd_cost_of_revenue));
        row.push(("net_royalty_revenue", self.corporate_pnl.net_royalty_revenue));
        row.push(("merchant_fees", self.corporate_pnl.merchant_fees));
        row.push(("marketing_fund_fees", self.corporate_pnl.marketing_fund_fees));

        // Expansion
        row.push(("expansion_franchise_fees", self.expansion.franchise_fees));
        row.push(("expansion_royalty_revenue", self.expansion.royalty_revenue));
        row.push(("including_expansion_total", self.including_expansion_total));

        row
    }
}

/// Fixed-width money cell; non-finite values print as N/A
fn money(v: f64) -> String {
    if v.is_finite() {
        format!("{:>16.0}", v)
    } else {
        format!("{:>16}", "N/A")
    }
}

/// Fixed-width ratio cell with one decimal
fn ratio(v: f64) -> String {
    if v.is_finite() {
        format!("{:>16.1}", v)
    } else {
        format!("{:>16}", "N/A")
    }
}

impl fmt::Display for BenefitCalculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.allocation;
        writeln!(f, "╔══════════════════════════════════════════╗")?;
        writeln!(f, "║           Business Case Results          ║")?;
        writeln!(f, "╠══════════════════════════════════════════╣")?;
        writeln!(
            f,
            "║ Clinics: {:<31} ║",
            format!(
                "{:.0} → {:.0}",
                self.forecast.baseline_clinic_count, self.forecast.clinic_count
            )
        )?;
        writeln!(f, "╠══════════════════════════════════════════╣")?;
        writeln!(f, "║ ANNUAL BENEFITS                          ║")?;
        writeln!(f, "║   Acquisition:    {} ║", money(a.acquisition_benefit))?;
        writeln!(f, "║   Conversion:     {} ║", money(a.conversion_benefit))?;
        writeln!(f, "║   Retention:      {} ║", money(a.retention_benefit))?;
        writeln!(f, "║   Operations:     {} ║", money(a.operations_benefit))?;
        writeln!(f, "║   Total:          {} ║", money(a.total_annual_benefits))?;
        writeln!(f, "║   Corporate:      {} ║", money(a.corporate_annual_benefits))?;
        writeln!(f, "║   Franchise:      {} ║", money(a.franchise_annual_benefits))?;

        writeln!(f, "╠══════════════════════════════════════════╣")?;
        writeln!(f, "║ ROI                                      ║")?;
        writeln!(f, "║   Cost:           {} ║", money(self.roi.implementation_cost))?;
        writeln!(f, "║   Payback (mo):   {} ║", ratio(self.roi.system.payback_months))?;
        writeln!(f, "║   1-yr ROI %:     {} ║", ratio(self.roi.system.first_year_roi_pct))?;
        writeln!(f, "║   5-yr ROI %:     {} ║", ratio(self.roi.system.five_year_roi_pct))?;
        writeln!(
            f,
            "║   Corp payback:   {} ║",
            ratio(self.roi.corporate.payback_months)
        )?;

        if !self.projection.is_empty() {
            writeln!(f, "╠══════════════════════════════════════════╣")?;
            writeln!(f, "║ PROJECTION (net / cumulative)            ║")?;
            for y in &self.projection {
                writeln!(
                    f,
                    "║   {:<4} {:>16.0} {:>16.0} ║",
                    y.year, y.net_benefit, y.cumulative_benefit
                )?;
            }
        }

        writeln!(f, "╠══════════════════════════════════════════╣")?;
        writeln!(f, "║ CORPORATE P&L                            ║")?;
        writeln!(
            f,
            "║   Gross royalty:  {} ║",
            money(self.corporate_pnl.gross_royalty_revenue)
        )?;
        writeln!(
            f,
            "║   Net royalty:    {} ║",
            money(self.corporate_pnl.net_royalty_revenue)
        )?;
        writeln!(
            f,
            "║   w/ expansion:   {} ║",
            money(self.including_expansion_total)
        )?;

        if !self.quality.warnings.is_empty() {
            writeln!(f, "╠══════════════════════════════════════════╣")?;
            writeln!(f, "║ WARNINGS                                 ║")?;
            for w in &self.quality.warnings {
                writeln!(f, "║   • {}", w)?;
            }
        }

        write!(f, "╚══════════════════════════════════════════╝")
    }
}
