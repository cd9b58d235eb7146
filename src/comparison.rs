//! Baseline vs. future-state metric comparison
//!
//! Produces the table shown next to the benefit breakdown: every baseline
//! metric alongside the value it takes once its change or improvement is
//! applied. Informational metrics that do not enter the benefit arithmetic
//! (month-3 churn, downtime, lead qualification) are listed here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculator::stages;
use crate::data::{forecast, BusinessCaseData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricCategory {
    Global,
    Acquisition,
    Conversion,
    Retention,
    Operations,
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetricCategory::Global => "Global",
            MetricCategory::Acquisition => "Acquisition",
            MetricCategory::Conversion => "Conversion",
            MetricCategory::Retention => "Retention",
            MetricCategory::Operations => "Operations",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Count,
    Currency,
    Percent,
    Points,
    Minutes,
    Months,
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub category: MetricCategory,
    pub label: &'static str,
    pub baseline: f64,
    pub future: f64,
    pub unit: Unit,
}

impl MetricComparison {
    fn new(
        category: MetricCategory,
        label: &'static str,
        baseline: f64,
        future: f64,
        unit: Unit,
    ) -> Self {
        Self {
            category,
            label,
            baseline,
            future,
            unit,
        }
    }

    pub fn change(&self) -> f64 {
        self.future - self.baseline
    }

    /// Unit of [`change`](Self::change); percentages move in points
    pub fn change_unit(&self) -> Unit {
        match self.unit {
            Unit::Percent => Unit::Points,
            u => u,
        }
    }
}

/// Build the baseline vs. future comparison, grouped by category
pub fn compare(data: &BusinessCaseData) -> Vec<MetricComparison> {
    use MetricCategory::*;

    let fc = stages::forecast(data);
    let baseline_conversion =
        data.lead_to_appointment_rate * data.appointment_show_rate / 100.0;
    let future_conversion = (data.lead_to_appointment_rate + data.appointment_rate_improvement)
        * (data.appointment_show_rate + data.show_rate_improvement)
        / 100.0;

    vec![
        // Global
        MetricComparison::new(Global, "Clinic count", data.clinic_count, fc.clinic_count, Unit::Count),
        MetricComparison::new(
            Global,
            "Monthly leads per clinic",
            data.monthly_leads_per_clinic,
            fc.monthly_leads_per_clinic,
            Unit::Count,
        ),
        MetricComparison::new(
            Global,
            "Average clinic revenue",
            data.average_clinic_revenue,
            fc.average_clinic_revenue,
            Unit::Currency,
        ),
        MetricComparison::new(
            Global,
            "Wellness plan price",
            data.wellness_plan_price,
            fc.wellness_plan_price,
            Unit::Currency,
        ),
        MetricComparison::new(
            Global,
            "Patient lifetime",
            data.average_patient_ltv_months,
            fc.patient_ltv_months,
            Unit::Months,
        ),
        MetricComparison::new(
            Global,
            "Hourly wage",
            data.average_hourly_wage,
            fc.hourly_wage,
            Unit::Currency,
        ),
        MetricComparison::new(
            Global,
            "Royalty rate",
            data.corporate_royalty_percent,
            fc.royalty_percent,
            Unit::Percent,
        ),
        // Acquisition
        MetricComparison::new(
            Acquisition,
            "Lead qualification rate",
            data.lead_qualification_rate,
            data.lead_qualification_rate + data.lead_qualification_improvement,
            Unit::Percent,
        ),
        MetricComparison::new(
            Acquisition,
            "Cost per lead",
            data.cost_per_lead,
            forecast(data.cost_per_lead, -data.cost_per_lead_reduction_percent),
            Unit::Currency,
        ),
        // Conversion
        MetricComparison::new(
            Conversion,
            "Booking rate",
            data.lead_to_appointment_rate,
            data.lead_to_appointment_rate + data.appointment_rate_improvement,
            Unit::Percent,
        ),
        MetricComparison::new(
            Conversion,
            "Show rate",
            data.appointment_show_rate,
            data.appointment_show_rate + data.show_rate_improvement,
            Unit::Percent,
        ),
        MetricComparison::new(
            Conversion,
            "Effective conversion",
            baseline_conversion,
            future_conversion,
            Unit::Percent,
        ),
        MetricComparison::new(Conversion, "Intro price", data.intro_price, fc.intro_price, Unit::Currency),
        MetricComparison::new(
            Conversion,
            "First-visit value",
            data.first_visit_value,
            data.first_visit_value,
            Unit::Currency,
        ),
        // Retention
        MetricComparison::new(
            Retention,
            "Plan conversion rate",
            data.plan_conversion_rate,
            data.plan_conversion_rate + data.plan_conversion_improvement,
            Unit::Percent,
        ),
        MetricComparison::new(
            Retention,
            "Retention rate",
            data.current_retention_rate,
            data.current_retention_rate + data.retention_improvement_percent,
            Unit::Percent,
        ),
        MetricComparison::new(
            Retention,
            "Month-3 churn",
            data.month3_churn_rate,
            data.month3_churn_rate - data.churn_reduction,
            Unit::Percent,
        ),
        // Operations
        MetricComparison::new(
            Operations,
            "System time per day",
            data.current_system_time_minutes,
            forecast(data.current_system_time_minutes, -data.time_reduction_percent),
            Unit::Minutes,
        ),
        MetricComparison::new(
            Operations,
            "Revenue leakage",
            data.current_revenue_leakage_percent,
            forecast(
                data.current_revenue_leakage_percent,
                -data.revenue_leakage_reduction_percent,
            ),
            Unit::Percent,
        ),
        MetricComparison::new(
            Operations,
            "Annual IT cost",
            data.current_annual_it_costs,
            forecast(data.current_annual_it_costs, -data.it_cost_reduction_percent),
            Unit::Currency,
        ),
        MetricComparison::new(
            Operations,
            "Relative downtime",
            100.0,
            100.0 - data.downtime_reduction_percent,
            Unit::Percent,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row<'a>(rows: &'a [MetricComparison], label: &str) -> &'a MetricComparison {
        rows.iter().find(|r| r.label == label).unwrap()
    }

    #[test]
    fn test_defaults_have_no_change() {
        let rows = compare(&BusinessCaseData::default());
        assert!(rows.iter().all(|r| r.change() == 0.0), "{rows:?}");
    }

    #[test]
    fn test_effective_conversion_is_product() {
        let rows = compare(&BusinessCaseData::default().with_conversion_improvements(5.0, 5.0));
        let conv = row(&rows, "Effective conversion");
        assert_relative_eq!(conv.baseline, 31.5, epsilon = 1e-9);
        assert_relative_eq!(conv.future, 37.5, epsilon = 1e-9);
        assert_eq!(conv.change_unit(), Unit::Points);
    }

    #[test]
    fn test_reductions() {
        let rows = compare(&BusinessCaseData::expected());
        assert_relative_eq!(row(&rows, "Cost per lead").future, 28.0, epsilon = 1e-9);
        assert_relative_eq!(row(&rows, "Revenue leakage").future, 0.6, epsilon = 1e-9);
        assert_relative_eq!(row(&rows, "System time per day").future, 24.75, epsilon = 1e-9);
    }

    #[test]
    fn test_grouped_in_order() {
        let rows = compare(&BusinessCaseData::default());
        let cats: Vec<_> = rows.iter().map(|r| r.category).collect();
        let mut sorted = cats.clone();
        sorted.dedup();
        assert_eq!(
            sorted,
            vec![
                MetricCategory::Global,
                MetricCategory::Acquisition,
                MetricCategory::Conversion,
                MetricCategory::Retention,
                MetricCategory::Operations
            ]
        );
    }
}
