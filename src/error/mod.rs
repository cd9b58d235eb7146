use thiserror::Error;

use crate::data::lever::LeverError;
use crate::data::schema::SchemaError;
use crate::export::ExportError;
use crate::scenario::StoreError;

#[derive(Error, Debug)]
pub enum BizCaseError {
    #[error("Error in the input schema: {0}")]
    SchemaError(#[from] SchemaError),
    #[error("Error in the scenario store: {0}")]
    StoreError(#[from] StoreError),
    #[error("Error during export: {0}")]
    ExportError(#[from] ExportError),
    #[error("Error resolving lever: {0}")]
    LeverError(#[from] LeverError),
}
