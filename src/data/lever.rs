//! Slider-adjustable inputs
//!
//! A [`Lever`] names one numeric field of [`BusinessCaseData`] that a user is
//! expected to move interactively. Levers give sensitivity sweeps and
//! comparison tables typed access to those fields without string lookups.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::business_case::BusinessCaseData;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeverError {
    #[error("Unknown lever '{0}'")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lever {
    ClinicCountChange,
    MonthlyLeadsChange,
    AverageClinicRevenueChange,
    WellnessPlanPriceChange,
    PatientLtvChange,
    HourlyWageChange,
    RoyaltyChange,
    LeadQualificationImprovement,
    CostPerLeadReduction,
    AppointmentRateImprovement,
    ShowRateImprovement,
    PlanConversionImprovement,
    RetentionImprovement,
    ChurnReduction,
    TimeReduction,
    RevenueLeakageReduction,
    ItCostReduction,
    DowntimeReduction,
    CorporateRoyalty,
    ImplementationCapEx,
    ImplementationOpEx,
    IncrementalNewClinics,
}

const ALL_LEVERS: [Lever; 22] = [
    Lever::ClinicCountChange,
    Lever::MonthlyLeadsChange,
    Lever::AverageClinicRevenueChange,
    Lever::WellnessPlanPriceChange,
    Lever::PatientLtvChange,
    Lever::HourlyWageChange,
    Lever::RoyaltyChange,
    Lever::LeadQualificationImprovement,
    Lever::CostPerLeadReduction,
    Lever::AppointmentRateImprovement,
    Lever::ShowRateImprovement,
    Lever::PlanConversionImprovement,
    Lever::RetentionImprovement,
    Lever::ChurnReduction,
    Lever::TimeReduction,
    Lever::RevenueLeakageReduction,
    Lever::ItCostReduction,
    Lever::DowntimeReduction,
    Lever::CorporateRoyalty,
    Lever::ImplementationCapEx,
    Lever::ImplementationOpEx,
    Lever::IncrementalNewClinics,
];

impl Lever {
    /// All levers in display order
    pub fn all() -> &'static [Lever] {
        &ALL_LEVERS
    }

    /// Serialized key of the underlying field
    pub fn key(&self) -> &'static str {
        match self {
            Lever::ClinicCountChange => "clinicCountChange",
            Lever::MonthlyLeadsChange => "monthlyLeadsChange",
            Lever::AverageClinicRevenueChange => "averageClinicRevenueChange",
            Lever::WellnessPlanPriceChange => "wellnessPlanPriceChange",
            Lever::PatientLtvChange => "patientLTVChange",
            Lever::HourlyWageChange => "hourlyWageChange",
            Lever::RoyaltyChange => "royaltyChange",
            Lever::LeadQualificationImprovement => "leadQualificationImprovement",
            Lever::CostPerLeadReduction => "costPerLeadReductionPercent",
            Lever::AppointmentRateImprovement => "appointmentRateImprovement",
            Lever::ShowRateImprovement => "showRateImprovement",
            Lever::PlanConversionImprovement => "planConversionImprovement",
            Lever::RetentionImprovement => "retentionImprovementPercent",
            Lever::ChurnReduction => "churnReduction",
            Lever::TimeReduction => "timeReductionPercent",
            Lever::RevenueLeakageReduction => "revenueLeakageReductionPercent",
            Lever::ItCostReduction => "itCostReductionPercent",
            Lever::DowntimeReduction => "downtimeReductionPercent",
            Lever::CorporateRoyalty => "corporateRoyaltyPercent",
            Lever::ImplementationCapEx => "implementationCapEx",
            Lever::ImplementationOpEx => "implementationOpEx",
            Lever::IncrementalNewClinics => "incrementalNewClinicsPerYear",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Lever::ClinicCountChange => "Clinic count change (%)",
            Lever::MonthlyLeadsChange => "Monthly leads change (%)",
            Lever::AverageClinicRevenueChange => "Clinic revenue change (%)",
            Lever::WellnessPlanPriceChange => "Wellness plan price change (%)",
            Lever::PatientLtvChange => "Patient lifetime change (%)",
            Lever::HourlyWageChange => "Hourly wage change (%)",
            Lever::RoyaltyChange => "Royalty change (%)",
            Lever::LeadQualificationImprovement => "Lead qualification improvement (pts)",
            Lever::CostPerLeadReduction => "Cost per lead reduction (%)",
            Lever::AppointmentRateImprovement => "Booking rate improvement (pts)",
            Lever::ShowRateImprovement => "Show rate improvement (pts)",
            Lever::PlanConversionImprovement => "Plan conversion improvement (pts)",
            Lever::RetentionImprovement => "Retention improvement (pts)",
            Lever::ChurnReduction => "Month-3 churn reduction (pts)",
            Lever::TimeReduction => "System time reduction (%)",
            Lever::RevenueLeakageReduction => "Revenue leakage reduction (%)",
            Lever::ItCostReduction => "IT cost reduction (%)",
            Lever::DowntimeReduction => "Downtime reduction (%)",
            Lever::CorporateRoyalty => "Corporate royalty (%)",
            Lever::ImplementationCapEx => "Implementation CapEx",
            Lever::ImplementationOpEx => "Implementation OpEx",
            Lever::IncrementalNewClinics => "Incremental new clinics per year",
        }
    }

    /// Read the lever's current value
    pub fn get(&self, data: &BusinessCaseData) -> f64 {
        match self {
            Lever::ClinicCountChange => data.clinic_count_change,
            Lever::MonthlyLeadsChange => data.monthly_leads_change,
            Lever::AverageClinicRevenueChange => data.average_clinic_revenue_change,
            Lever::WellnessPlanPriceChange => data.wellness_plan_price_change,
            Lever::PatientLtvChange => data.patient_ltv_change,
            Lever::HourlyWageChange => data.hourly_wage_change,
            Lever::RoyaltyChange => data.royalty_change,
            Lever::LeadQualificationImprovement => data.lead_qualification_improvement,
            Lever::CostPerLeadReduction => data.cost_per_lead_reduction_percent,
            Lever::AppointmentRateImprovement => data.appointment_rate_improvement,
            Lever::ShowRateImprovement => data.show_rate_improvement,
            Lever::PlanConversionImprovement => data.plan_conversion_improvement,
            Lever::RetentionImprovement => data.retention_improvement_percent,
            Lever::ChurnReduction => data.churn_reduction,
            Lever::TimeReduction => data.time_reduction_percent,
            Lever::RevenueLeakageReduction => data.revenue_leakage_reduction_percent,
            Lever::ItCostReduction => data.it_cost_reduction_percent,
            Lever::DowntimeReduction => data.downtime_reduction_percent,
            Lever::CorporateRoyalty => data.corporate_royalty_percent,
            Lever::ImplementationCapEx => data.implementation_capex,
            Lever::ImplementationOpEx => data.implementation_opex,
            Lever::IncrementalNewClinics => data.incremental_new_clinics_per_year,
        }
    }

    /// Overwrite the lever's value
    pub fn set(&self, data: &mut BusinessCaseData, value: f64) {
        let field = match self {
            Lever::ClinicCountChange => &mut data.clinic_count_change,
            Lever::MonthlyLeadsChange => &mut data.monthly_leads_change,
            Lever::AverageClinicRevenueChange => &mut data.average_clinic_revenue_change,
            Lever::WellnessPlanPriceChange => &mut data.wellness_plan_price_change,
            Lever::PatientLtvChange => &mut data.patient_ltv_change,
            Lever::HourlyWageChange => &mut data.hourly_wage_change,
            Lever::RoyaltyChange => &mut data.royalty_change,
            Lever::LeadQualificationImprovement => &mut data.lead_qualification_improvement,
            Lever::CostPerLeadReduction => &mut data.cost_per_lead_reduction_percent,
            Lever::AppointmentRateImprovement => &mut data.appointment_rate_improvement,
            Lever::ShowRateImprovement => &mut data.show_rate_improvement,
            Lever::PlanConversionImprovement => &mut data.plan_conversion_improvement,
            Lever::RetentionImprovement => &mut data.retention_improvement_percent,
            Lever::ChurnReduction => &mut data.churn_reduction,
            Lever::TimeReduction => &mut data.time_reduction_percent,
            Lever::RevenueLeakageReduction => &mut data.revenue_leakage_reduction_percent,
            Lever::ItCostReduction => &mut data.it_cost_reduction_percent,
            Lever::DowntimeReduction => &mut data.downtime_reduction_percent,
            Lever::CorporateRoyalty => &mut data.corporate_royalty_percent,
            Lever::ImplementationCapEx => &mut data.implementation_capex,
            Lever::ImplementationOpEx => &mut data.implementation_opex,
            Lever::IncrementalNewClinics => &mut data.incremental_new_clinics_per_year,
        };
        *field = value;
    }

    /// Copy of `data` with this lever set to `value`
    pub fn applied(&self, data: &BusinessCaseData, value: f64) -> BusinessCaseData {
        let mut out = data.clone();
        self.set(&mut out, value);
        out
    }
}

impl fmt::Display for Lever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Lever {
    type Err = LeverError;

    /// Parse a lever from its serialized key (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_LEVERS
            .iter()
            .find(|l| l.key().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| LeverError::Unknown(s.to_string()))
    }
}
