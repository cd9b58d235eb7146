pub mod business_case;
pub mod lever;
pub mod schema;
pub use business_case::{forecast, BusinessCaseData, PresetKind};
pub use lever::{Lever, LeverError};
pub use schema::{merge_with_defaults, SchemaError};
