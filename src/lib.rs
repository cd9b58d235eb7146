pub mod calculator;
pub mod comparison;
pub mod data;
pub mod error;
pub mod export;
pub mod scenario;
pub mod sensitivity;

//extension traits
pub use crate::calculator::BenefitModel;
pub use crate::calculator::{calculate_benefits, BenefitCalculation};
pub use crate::data::*;
pub use error::BizCaseError;

pub mod prelude {
    pub mod data {
        pub use crate::data::{
            forecast, merge_with_defaults, BusinessCaseData, Lever, PresetKind, SchemaError,
        };
    }
    pub mod calculator {
        pub use crate::calculator::{
            calculate_benefits, projection, stages, BenefitAllocation, BenefitBasis,
            BenefitCalculation, CorporatePnl, Quality, RoiMetrics, Warning, YearlyProjection,
        };
    }
    pub mod persistence {
        pub use crate::scenario::{
            load_scenario, save_scenario, JsonFileStore, MemoryStore, ScenarioStore, StoreError,
        };
    }

    //extension traits
    pub use crate::calculator::BenefitModel;
    pub use crate::data::*;

    pub use crate::calculator::{calculate_benefits, BenefitCalculation, Warning};
    pub use crate::comparison::{compare, MetricComparison};
    pub use crate::export::{to_csv, to_json, write_csv};
    pub use crate::scenario::{load_scenario, save_scenario, ScenarioStore};
    pub use crate::sensitivity::{compare_presets, sweep};
    pub use crate::BizCaseError;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_roundtrip() {
        let mut store = persistence::MemoryStore::new();
        let data = BusinessCaseData::expected();
        save_scenario(&mut store, "expected", &data).unwrap();
        let loaded = load_scenario(&store, "expected").unwrap();
        assert_eq!(loaded.benefits(), data.benefits());
    }

    #[test]
    fn test_errors_convert() {
        let err: BizCaseError = "bogus".parse::<Lever>().unwrap_err().into();
        assert!(err.to_string().contains("bogus"));
    }
}
