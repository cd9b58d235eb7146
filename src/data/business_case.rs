//! The business-case input record
//!
//! [`BusinessCaseData`] is a flat record of operational assumptions. Every
//! metric that can be improved by the system comes as a pair: a *baseline*
//! (the as-is value) and a *change* (a percentage shift or a point
//! improvement). Percentage fields are points of 100, never fractions.
//!
//! The record is permissive: no range validation is performed.
//! Negative percentages or a clinic count of zero are accepted and simply flow
//! through the arithmetic; the calculator reports such conditions as quality
//! warnings instead of rejecting them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::{self, SchemaError};

/// Apply a percentage change to a baseline value
///
/// `forecast(100.0, 10.0) == 110.0`
#[inline]
pub fn forecast(baseline: f64, change_pct: f64) -> f64 {
    baseline * (1.0 + change_pct / 100.0)
}

/// Complete set of business-case assumptions
///
/// Serialized with camelCase keys so saved scenario records remain
/// interchangeable with the dashboard's own storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessCaseData {
    // ------------------------------------------------------------------
    // Global parameters
    // ------------------------------------------------------------------
    /// Current number of clinics in the network
    pub clinic_count: f64,
    /// Forecast growth of the clinic count (%)
    pub clinic_count_change: f64,
    /// Monthly leads per clinic
    pub monthly_leads_per_clinic: f64,
    /// Forecast growth of monthly leads (%)
    pub monthly_leads_change: f64,
    /// Average annual revenue per clinic
    pub average_clinic_revenue: f64,
    /// Forecast growth of per-clinic revenue (%)
    pub average_clinic_revenue_change: f64,
    /// Monthly wellness-plan price
    pub wellness_plan_price: f64,
    /// Forecast change in wellness-plan price (%)
    pub wellness_plan_price_change: f64,
    /// Average patient lifetime on a plan, in months
    #[serde(rename = "averagePatientLTVMonths")]
    pub average_patient_ltv_months: f64,
    /// Forecast change in patient lifetime (%)
    #[serde(rename = "patientLTVChange")]
    pub patient_ltv_change: f64,
    /// Forecast change in hourly wage (%)
    pub hourly_wage_change: f64,
    /// Forecast change in the corporate royalty rate (%)
    pub royalty_change: f64,

    // ------------------------------------------------------------------
    // Stage 1: lead identification
    // ------------------------------------------------------------------
    /// Share of leads that qualify (%)
    pub lead_qualification_rate: f64,
    /// Improvement in qualification rate (points). Informational.
    pub lead_qualification_improvement: f64,
    /// Baseline marketing cost per lead
    pub cost_per_lead: f64,
    /// Reduction in cost per lead (%)
    pub cost_per_lead_reduction_percent: f64,

    // ------------------------------------------------------------------
    // Stage 2: conversion
    // ------------------------------------------------------------------
    /// Qualified lead to booked appointment rate (%)
    pub lead_to_appointment_rate: f64,
    /// Improvement in booking rate (points)
    pub appointment_rate_improvement: f64,
    /// Booked appointment show rate (%)
    pub appointment_show_rate: f64,
    /// Improvement in show rate (points)
    pub show_rate_improvement: f64,
    /// Introductory visit price
    pub intro_price: f64,
    /// Value of a first visit. Informational.
    pub first_visit_value: f64,

    // ------------------------------------------------------------------
    // Stage 3: retention
    // ------------------------------------------------------------------
    /// First-time patient to wellness-plan conversion rate (%)
    pub plan_conversion_rate: f64,
    /// Improvement in plan conversion (points)
    pub plan_conversion_improvement: f64,
    /// Current patient retention rate (%)
    pub current_retention_rate: f64,
    /// Improvement in retention (points)
    pub retention_improvement_percent: f64,
    /// Share of plan patients churning by month 3 (%). Informational.
    #[serde(rename = "month3ChurnRate")]
    pub month3_churn_rate: f64,
    /// Reduction in month-3 churn (points). Informational.
    pub churn_reduction: f64,
    /// Annual revenue per retention point per clinic
    pub value_per_retention_point: f64,

    // ------------------------------------------------------------------
    // Stage 4: operations
    // ------------------------------------------------------------------
    /// Minutes per staff member per day lost to the current system
    pub current_system_time_minutes: f64,
    /// Reduction in system time (%)
    pub time_reduction_percent: f64,
    /// Average patient visits per clinic per day
    pub average_visits_per_day: f64,
    /// Average hourly wage of front-office staff
    pub average_hourly_wage: f64,
    /// Front-office staff per clinic
    pub average_staff_per_clinic: f64,
    /// Share of revenue currently lost to payment failures (%)
    pub current_revenue_leakage_percent: f64,
    /// Reduction in revenue leakage (%)
    pub revenue_leakage_reduction_percent: f64,
    /// Centralized annual IT support cost
    #[serde(rename = "currentAnnualITCosts")]
    pub current_annual_it_costs: f64,
    /// Reduction in IT support cost (%)
    pub it_cost_reduction_percent: f64,
    /// Reduction in downtime (%). Informational.
    pub downtime_reduction_percent: f64,

    // ------------------------------------------------------------------
    // Stage 5: financial structure
    // ------------------------------------------------------------------
    /// Capitalizable share of the implementation cost
    #[serde(rename = "implementationCapEx")]
    pub implementation_capex: f64,
    /// Expensed share of the implementation cost
    #[serde(rename = "implementationOpEx")]
    pub implementation_opex: f64,
    /// Recurring annual operating expense of the system
    #[serde(rename = "recurringAnnualOpEx")]
    pub recurring_annual_opex: f64,
    /// Annual inflation applied to recurring OpEx (%)
    pub annual_inflation_rate: f64,
    /// Number of modeled projection years
    pub projection_years: u32,
    /// Calendar year of the first modeled year
    pub start_year: i32,
    /// Explicit per-year clinic counts (index 0 = first modeled year)
    pub projected_clinic_counts: Vec<f64>,
    /// Fallback annual clinic growth rate (%) for years without an override
    pub clinic_growth_rate: f64,
    /// Corporate royalty on franchise revenue (%)
    pub corporate_royalty_percent: f64,
    /// National marketing fund contribution (%)
    pub marketing_fund_percent: f64,
    /// Share of IT cost reduction allocated to corporate (%)
    #[serde(rename = "corporateITCostAllocation")]
    pub corporate_it_cost_allocation: f64,
    /// Regional developer cost of revenue on royalties (%)
    pub rd_cost_of_revenue_percent: f64,
    /// Merchant fee on franchise revenue (%)
    pub merchant_fee_percent: f64,
    /// Straight-line amortization period for CapEx, in years
    pub useful_life_years: u32,

    // ------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------
    /// New clinics opened per year without the system. Informational.
    pub baseline_new_clinics_per_year: f64,
    /// Additional clinics opened per year attributable to the system
    pub incremental_new_clinics_per_year: f64,
    /// One-time franchise fee per new clinic
    pub franchise_fee: f64,
    /// Years of expansion to model
    pub expansion_years: u32,
}

impl Default for BusinessCaseData {
    fn default() -> Self {
        Self {
            clinic_count: 880.0,
            clinic_count_change: 0.0,
            monthly_leads_per_clinic: 150.0,
            monthly_leads_change: 0.0,
            average_clinic_revenue: 1_000_000.0,
            average_clinic_revenue_change: 0.0,
            wellness_plan_price: 89.0,
            wellness_plan_price_change: 0.0,
            average_patient_ltv_months: 12.0,
            patient_ltv_change: 0.0,
            hourly_wage_change: 0.0,
            royalty_change: 0.0,

            lead_qualification_rate: 65.0,
            lead_qualification_improvement: 0.0,
            cost_per_lead: 35.0,
            cost_per_lead_reduction_percent: 0.0,

            lead_to_appointment_rate: 45.0,
            appointment_rate_improvement: 0.0,
            appointment_show_rate: 70.0,
            show_rate_improvement: 0.0,
            intro_price: 29.0,
            first_visit_value: 45.0,

            plan_conversion_rate: 30.0,
            plan_conversion_improvement: 0.0,
            current_retention_rate: 64.0,
            retention_improvement_percent: 0.0,
            month3_churn_rate: 35.0,
            churn_reduction: 0.0,
            value_per_retention_point: 10_000.0,

            // 60 min of refreshes plus 22.5 min of workarounds per day
            current_system_time_minutes: 82.5,
            time_reduction_percent: 0.0,
            average_visits_per_day: 40.0,
            average_hourly_wage: 30.0,
            average_staff_per_clinic: 2.0,
            current_revenue_leakage_percent: 1.5,
            revenue_leakage_reduction_percent: 0.0,
            current_annual_it_costs: 1_500_000.0,
            it_cost_reduction_percent: 0.0,
            downtime_reduction_percent: 0.0,

            implementation_capex: 260_000.0,
            implementation_opex: 65_000.0,
            recurring_annual_opex: 65_000.0,
            annual_inflation_rate: 3.0,
            projection_years: 5,
            start_year: 2026,
            projected_clinic_counts: Vec::new(),
            clinic_growth_rate: 5.0,
            corporate_royalty_percent: 7.0,
            marketing_fund_percent: 2.0,
            corporate_it_cost_allocation: 100.0,
            rd_cost_of_revenue_percent: 25.0,
            merchant_fee_percent: 0.3,
            useful_life_years: 5,

            baseline_new_clinics_per_year: 60.0,
            incremental_new_clinics_per_year: 0.0,
            franchise_fee: 29_000.0,
            expansion_years: 5,
        }
    }
}

/// Named improvement presets offered next to the dashboard sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetKind {
    Conservative,
    Expected,
    Optimistic,
}

impl PresetKind {
    pub fn all() -> [PresetKind; 3] {
        [
            PresetKind::Conservative,
            PresetKind::Expected,
            PresetKind::Optimistic,
        ]
    }
}

impl BusinessCaseData {
    /// Total implementation cost (CapEx + OpEx)
    pub fn implementation_cost(&self) -> f64 {
        self.implementation_capex + self.implementation_opex
    }

    /// Conservative improvement assumptions
    pub fn conservative() -> Self {
        Self::default().with_preset(PresetKind::Conservative)
    }

    /// Expected improvement assumptions
    pub fn expected() -> Self {
        Self::default().with_preset(PresetKind::Expected)
    }

    /// Optimistic improvement assumptions
    pub fn optimistic() -> Self {
        Self::default().with_preset(PresetKind::Optimistic)
    }

    /// Overwrite the improvement levers with a preset, keeping every baseline
    pub fn with_preset(mut self, kind: PresetKind) -> Self {
        let (cpl, booking, show, plan, retention, time, leakage, it) = match kind {
            PresetKind::Conservative => (10.0, 2.0, 2.0, 2.0, 2.0, 45.0, 40.0, 15.0),
            PresetKind::Expected => (20.0, 5.0, 5.0, 4.0, 4.0, 70.0, 60.0, 30.0),
            PresetKind::Optimistic => (30.0, 8.0, 8.0, 6.0, 6.0, 85.0, 80.0, 45.0),
        };
        self.cost_per_lead_reduction_percent = cpl;
        self.appointment_rate_improvement = booking;
        self.show_rate_improvement = show;
        self.plan_conversion_improvement = plan;
        self.retention_improvement_percent = retention;
        self.time_reduction_percent = time;
        self.revenue_leakage_reduction_percent = leakage;
        self.it_cost_reduction_percent = it;
        self
    }

    /// Apply a partial JSON patch over this record
    ///
    /// Keys present in `patch` override the current values; everything else
    /// is kept. This is the field-by-field update path used by interactive
    /// editing.
    pub fn merged_over(&self, patch: &Value) -> Result<Self, SchemaError> {
        schema::merge_with_defaults(patch, self)
    }

    /// Set the clinic count
    pub fn with_clinic_count(mut self, clinics: f64) -> Self {
        self.clinic_count = clinics;
        self
    }

    /// Set the forecast clinic count change (%)
    pub fn with_clinic_count_change(mut self, change_pct: f64) -> Self {
        self.clinic_count_change = change_pct;
        self
    }

    /// Set the corporate royalty (%)
    pub fn with_royalty(mut self, royalty_pct: f64) -> Self {
        self.corporate_royalty_percent = royalty_pct;
        self
    }

    /// Set the implementation cost split
    pub fn with_implementation_cost(mut self, capex: f64, opex: f64) -> Self {
        self.implementation_capex = capex;
        self.implementation_opex = opex;
        self
    }

    /// Set booking and show rate improvements (points)
    pub fn with_conversion_improvements(mut self, booking_pts: f64, show_pts: f64) -> Self {
        self.appointment_rate_improvement = booking_pts;
        self.show_rate_improvement = show_pts;
        self
    }

    /// Set the retention improvement (points)
    pub fn with_retention_improvement(mut self, points: f64) -> Self {
        self.retention_improvement_percent = points;
        self
    }

    /// Set explicit per-year clinic counts for the projection
    pub fn with_projected_clinic_counts(mut self, counts: Vec<f64>) -> Self {
        self.projected_clinic_counts = counts;
        self
    }

    /// Set the projection horizon and fallback growth rate
    pub fn with_projection(mut self, years: u32, growth_rate_pct: f64) -> Self {
        self.projection_years = years;
        self.clinic_growth_rate = growth_rate_pct;
        self
    }

    /// Set the expansion parameters
    pub fn with_expansion(mut self, incremental_per_year: f64, franchise_fee: f64, years: u32) -> Self {
        self.incremental_new_clinics_per_year = incremental_per_year;
        self.franchise_fee = franchise_fee;
        self.expansion_years = years;
        self
    }

    /// Names of numeric inputs that are negative
    ///
    /// Negative values are legal input; the calculator reports them so that
    /// surprising results can be traced back to their source.
    pub fn negative_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("clinicCount", self.clinic_count),
            ("monthlyLeadsPerClinic", self.monthly_leads_per_clinic),
            ("averageClinicRevenue", self.average_clinic_revenue),
            ("wellnessPlanPrice", self.wellness_plan_price),
            ("averagePatientLTVMonths", self.average_patient_ltv_months),
            ("leadQualificationRate", self.lead_qualification_rate),
            ("costPerLead", self.cost_per_lead),
            ("costPerLeadReductionPercent", self.cost_per_lead_reduction_percent),
            ("leadToAppointmentRate", self.lead_to_appointment_rate),
            ("appointmentShowRate", self.appointment_show_rate),
            ("planConversionRate", self.plan_conversion_rate),
            ("currentRetentionRate", self.current_retention_rate),
            ("currentSystemTimeMinutes", self.current_system_time_minutes),
            ("timeReductionPercent", self.time_reduction_percent),
            ("averageHourlyWage", self.average_hourly_wage),
            ("averageStaffPerClinic", self.average_staff_per_clinic),
            ("currentRevenueLeakagePercent", self.current_revenue_leakage_percent),
            ("revenueLeakageReductionPercent", self.revenue_leakage_reduction_percent),
            ("currentAnnualITCosts", self.current_annual_it_costs),
            ("itCostReductionPercent", self.it_cost_reduction_percent),
            ("implementationCapEx", self.implementation_capex),
            ("implementationOpEx", self.implementation_opex),
            ("recurringAnnualOpEx", self.recurring_annual_opex),
            ("corporateRoyaltyPercent", self.corporate_royalty_percent),
        ];
        checks
            .iter()
            .filter(|(_, v)| *v < 0.0)
            .map(|(name, _)| *name)
            .collect()
    }
}
