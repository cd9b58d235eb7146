//! Property tests for the calculator
//!
//! Checks the identities that must hold for every input record:
//! - stage sum equals the total
//! - corporate + franchise equals the total
//! - repeated calls give identical output
//! - merge-with-defaults is idempotent
//! - cumulative projection values are running sums in year order

use bizcase::data::schema::merge_with_defaults;
use bizcase::prelude::*;
use proptest::prelude::*;

/// Relative tolerance with an absolute floor for cancelling sums
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-4 + 1e-9 * b.abs()
}

prop_compose! {
    fn business_case()(
        (clinics, clinic_change, leads_change, revenue_change, price_change, ltv_change) in (
            0.0f64..2000.0,
            -50.0f64..100.0,
            -50.0f64..50.0,
            -20.0f64..50.0,
            -20.0f64..50.0,
            -20.0f64..50.0,
        ),
        (royalty, royalty_change, booking, show, plan, retention) in (
            0.0f64..15.0,
            -20.0f64..20.0,
            -5.0f64..20.0,
            -5.0f64..20.0,
            0.0f64..10.0,
            -2.0f64..10.0,
        ),
        (time, leakage, it, cpl, it_allocation) in (
            0.0f64..100.0,
            0.0f64..100.0,
            0.0f64..100.0,
            0.0f64..50.0,
            0.0f64..100.0,
        ),
        (capex, opex, years, growth, incremental) in (
            0.0f64..1e6,
            0.0f64..5e5,
            0u32..10,
            -10.0f64..20.0,
            0.0f64..50.0,
        ),
    ) -> BusinessCaseData {
        BusinessCaseData {
            clinic_count: clinics.round(),
            clinic_count_change: clinic_change,
            monthly_leads_change: leads_change,
            average_clinic_revenue_change: revenue_change,
            wellness_plan_price_change: price_change,
            patient_ltv_change: ltv_change,
            corporate_royalty_percent: royalty,
            royalty_change,
            appointment_rate_improvement: booking,
            show_rate_improvement: show,
            plan_conversion_improvement: plan,
            retention_improvement_percent: retention,
            time_reduction_percent: time,
            revenue_leakage_reduction_percent: leakage,
            it_cost_reduction_percent: it,
            cost_per_lead_reduction_percent: cpl,
            corporate_it_cost_allocation: it_allocation,
            incremental_new_clinics_per_year: incremental,
            ..Default::default()
        }
        .with_implementation_cost(capex, opex)
        .with_projection(years, growth)
    }
}

proptest! {
    /// Property: the total is exactly the sum of the four stages.
    #[test]
    fn total_is_sum_of_stages(data in business_case()) {
        let r = calculate_benefits(&data);
        let a = &r.allocation;
        let sum = a.acquisition_benefit + a.conversion_benefit + a.retention_benefit + a.operations_benefit;
        prop_assert!(close(a.total_annual_benefits, sum), "{} != {}", a.total_annual_benefits, sum);
    }

    /// Property: corporate and franchise benefits partition the total.
    #[test]
    fn split_is_partition(data in business_case()) {
        let r = calculate_benefits(&data);
        let a = &r.allocation;
        let sum = a.corporate_annual_benefits + a.franchise_annual_benefits;
        prop_assert!(close(sum, a.total_annual_benefits));

        let franchise: f64 = a.categories().iter().map(|(_, s)| s.franchise).sum();
        prop_assert!(close(franchise, a.franchise_annual_benefits));
    }

    /// Property: the calculator is a pure function.
    ///
    /// Compared through `Debug` so that `NaN` sentinels count as equal.
    #[test]
    fn calculation_is_deterministic(data in business_case()) {
        let first = format!("{:?}", calculate_benefits(&data));
        let second = format!("{:?}", calculate_benefits(&data));
        prop_assert_eq!(first, second);
    }

    /// Property: merging an already merged record changes nothing.
    #[test]
    fn merge_is_idempotent(data in business_case(), drop_mask in proptest::collection::vec(any::<bool>(), 64)) {
        let defaults = BusinessCaseData::default();
        let mut partial = serde_json::to_value(&data).unwrap();
        if let Some(map) = partial.as_object_mut() {
            let keys: Vec<String> = map.keys().cloned().collect();
            for (key, drop) in keys.iter().zip(drop_mask.iter()) {
                if *drop {
                    map.remove(key);
                }
            }
        }

        let once = merge_with_defaults(&partial, &defaults).unwrap();
        let twice = merge_with_defaults(&serde_json::to_value(&once).unwrap(), &defaults).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: cumulative benefit at year N is the sum of net benefits 1..N.
    #[test]
    fn cumulative_is_running_sum(data in business_case()) {
        let r = calculate_benefits(&data);
        prop_assert_eq!(r.projection.len(), data.projection_years as usize);

        let mut running = 0.0;
        for (i, y) in r.projection.iter().enumerate() {
            running += y.net_benefit;
            prop_assert_eq!(y.year, data.start_year + i as i32);
            if running.is_finite() {
                prop_assert!(close(y.cumulative_benefit, running));
            } else {
                prop_assert!(!y.cumulative_benefit.is_finite());
            }
        }
    }

    /// Property: sentinels appear exactly when the cost is zero.
    #[test]
    fn zero_cost_sentinel(data in business_case()) {
        let r = calculate_benefits(&data);
        let zero_cost = data.implementation_cost() == 0.0;
        prop_assert_eq!(r.roi.system.payback_months.is_nan(), zero_cost);
        prop_assert_eq!(r.quality.has(&Warning::ZeroImplementationCost), zero_cost);
    }
}
