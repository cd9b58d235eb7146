//! Benefit calculator for franchise business cases
//!
//! Maps a [`BusinessCaseData`] record to a complete [`BenefitCalculation`]:
//! per-stage benefits, corporate/franchise allocation, ROI, projection series,
//! corporate P&L, expansion and amortization.
//!
//! # Pipeline
//!
//! | Step | Function | Depends on |
//! |------|----------|------------|
//! | 1 | [`stages::forecast`] | input |
//! | 2 | [`stages::acquisition`] | forecast |
//! | 3 | [`stages::conversion`] | acquisition |
//! | 4 | [`stages::global_growth`] | acquisition, conversion |
//! | 5 | [`stages::retention`] | acquisition, conversion, global growth |
//! | 6 | [`stages::operations`] | forecast |
//! | 7 | [`stages::allocate`] | stages 2-6 |
//! | 8 | [`stages::roi`] | allocation |
//! | 9 | [`projection::projection_series`] | allocation |
//! | 10 | [`stages::corporate_pnl`] | conversion, retention, operations |
//! | 11 | [`projection::expansion`] | forecast |
//! | 12 | [`projection::amortization_schedule`] | corporate P&L |
//!
//! # Usage
//!
//! ```rust,ignore
//! use bizcase::prelude::*;
//!
//! let data = BusinessCaseData::expected();
//! let result = data.benefits();
//!
//! println!("Total: {:.0}", result.total_annual_benefits());
//! println!("Payback: {:.1} months", result.roi.system.payback_months);
//! ```

mod analyze;
pub mod projection;
pub mod stages;
mod types;


pub use analyze::calculate_benefits;
pub use types::{
    AcquisitionBenefit, AmortizationYear, BenefitAllocation, BenefitBasis, BenefitCalculation,
    ConversionBenefit, CorporatePnl, ExpansionTotals, ExpansionYear, Forecast,
    GlobalGrowthBenefit, OperationsBenefit, Quality, RetentionBenefit, RoiFigures, RoiMetrics,
    Split, Warning, YearlyProjection,
};

use crate::data::BusinessCaseData;
use rayon::prelude::*;

/// Extension trait for running the calculator on input records
///
/// ```rust,ignore
/// let one = BusinessCaseData::expected().benefits();
/// let many = scenarios.as_slice().benefits();
/// ```
pub trait BenefitModel {
    type Output;

    fn benefits(&self) -> Self::Output;
}

impl BenefitModel for BusinessCaseData {
    type Output = BenefitCalculation;

    fn benefits(&self) -> BenefitCalculation {
        calculate_benefits(self)
    }
}

impl BenefitModel for [BusinessCaseData] {
    type Output = Vec<BenefitCalculation>;

    /// Evaluates every record in parallel, preserving order
    fn benefits(&self) -> Vec<BenefitCalculation> {
        self.par_iter().map(calculate_benefits).collect()
    }
}
