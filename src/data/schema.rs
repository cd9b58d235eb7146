//! Versioned record schema, legacy aliases and merge-with-defaults
//!
//! Saved scenarios outlive the schema they were written with. Every record
//! passes through [`migrate`] before it is overlaid on a default record, so
//! the rest of the crate only ever sees the current field set.
//!
//! | Version | Shape |
//! |---------|-------|
//! | 1 | Legacy flat model (no `schemaVersion` key) |
//! | 2 | Staged model with CapEx/OpEx split and forecast pairs |

use serde_json::{Map, Value};
use thiserror::Error;

use super::business_case::BusinessCaseData;

/// Latest schema version written by this crate
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Key carrying the schema version in a serialized record
pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";

/// Minutes per day attributed to system refreshes in the legacy model
const LEGACY_REFRESH_MINUTES: f64 = 60.0;
/// Minutes per day attributed to workarounds in the legacy model
const LEGACY_WORKAROUND_MINUTES: f64 = 22.5;
/// Share of a legacy single implementation cost treated as CapEx
const LEGACY_CAPEX_SHARE: f64 = 0.8;

/// Errors raised while reading a serialized record
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The record is not a JSON object
    #[error("Scenario record must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// The record was written by a newer schema
    #[error("Unsupported schema version {version}. Latest supported: {supported}")]
    UnsupportedVersion { version: u64, supported: u32 },

    /// The version key is not a non-negative integer
    #[error("Invalid schema version {found}; expected a non-negative integer")]
    InvalidVersion { found: String },

    /// A field holds a value of the wrong type
    #[error("Invalid field value: {0}")]
    InvalidField(#[from] serde_json::Error),
}

/// A field name retired from the schema together with its replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecatedAlias {
    /// Legacy key
    pub legacy: &'static str,
    /// Current keys derived from it (empty when the field was dropped)
    pub replacements: &'static [&'static str],
    /// Schema version that retired the key
    pub retired_in: u32,
}

/// Every legacy key still understood by [`migrate`]
pub const DEPRECATED_ALIASES: &[DeprecatedAlias] = &[
    DeprecatedAlias {
        legacy: "implementationCost",
        replacements: &["implementationCapEx", "implementationOpEx"],
        retired_in: 2,
    },
    DeprecatedAlias {
        legacy: "refreshReductionPercent",
        replacements: &["timeReductionPercent"],
        retired_in: 2,
    },
    DeprecatedAlias {
        legacy: "workaroundReductionPercent",
        replacements: &["timeReductionPercent"],
        retired_in: 2,
    },
    DeprecatedAlias {
        legacy: "corporateNMFPercent",
        replacements: &["marketingFundPercent"],
        retired_in: 2,
    },
    DeprecatedAlias {
        legacy: "extraStepsReductionPercent",
        replacements: &[],
        retired_in: 2,
    },
];

/// Look up a legacy key
pub fn deprecated_alias(key: &str) -> Option<&'static DeprecatedAlias> {
    DEPRECATED_ALIASES.iter().find(|a| a.legacy == key)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read the schema version of a record (absent or null = version 1)
///
/// Integral floats such as `2.0` are accepted; any other value errors.
pub fn schema_version(record: &Map<String, Value>) -> Result<u32, SchemaError> {
    let value = match record.get(SCHEMA_VERSION_KEY) {
        None | Some(Value::Null) => return Ok(1),
        Some(value) => value,
    };
    let version = value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v < u64::MAX as f64)
                .map(|v| v as u64)
        })
        .ok_or_else(|| SchemaError::InvalidVersion {
            found: value.to_string(),
        })?;

    if version <= CURRENT_SCHEMA_VERSION as u64 {
        Ok(version as u32)
    } else {
        Err(SchemaError::UnsupportedVersion {
            version,
            supported: CURRENT_SCHEMA_VERSION,
        })
    }
}

/// Bring a record of any supported version to the current field set
///
/// The returned map carries no `schemaVersion` key and no deprecated aliases.
/// Null values are dropped so that they fall back to defaults when merged.
pub fn migrate(record: &Value) -> Result<Map<String, Value>, SchemaError> {
    let obj = record.as_object().ok_or(SchemaError::NotAnObject {
        found: json_kind(record),
    })?;
    let version = schema_version(obj)?;

    let mut fields: Map<String, Value> = obj
        .iter()
        .filter(|(k, v)| k.as_str() != SCHEMA_VERSION_KEY && !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if version < 2 {
        migrate_v1_to_v2(&mut fields);
    }

    Ok(fields)
}

fn take_f64(fields: &mut Map<String, Value>, key: &str) -> Option<f64> {
    fields.remove(key).and_then(|v| v.as_f64())
}

fn migrate_v1_to_v2(fields: &mut Map<String, Value>) {
    if let Some(cost) = take_f64(fields, "implementationCost") {
        if !fields.contains_key("implementationCapEx") && !fields.contains_key("implementationOpEx")
        {
            fields.insert("implementationCapEx".into(), (cost * LEGACY_CAPEX_SHARE).into());
            fields.insert(
                "implementationOpEx".into(),
                (cost * (1.0 - LEGACY_CAPEX_SHARE)).into(),
            );
            tracing::debug!(cost, "migrated implementationCost to CapEx/OpEx split");
        }
    }

    let refresh = take_f64(fields, "refreshReductionPercent");
    let workaround = take_f64(fields, "workaroundReductionPercent");
    if (refresh.is_some() || workaround.is_some()) && !fields.contains_key("timeReductionPercent") {
        let weighted = (LEGACY_REFRESH_MINUTES * refresh.unwrap_or(0.0)
            + LEGACY_WORKAROUND_MINUTES * workaround.unwrap_or(0.0))
            / (LEGACY_REFRESH_MINUTES + LEGACY_WORKAROUND_MINUTES);
        fields.insert("timeReductionPercent".into(), weighted.into());
        tracing::debug!(weighted, "migrated refresh/workaround reductions to timeReductionPercent");
    }

    if let Some(nmf) = fields.remove("corporateNMFPercent") {
        fields.entry("marketingFundPercent").or_insert(nmf);
    }

    if fields.remove("extraStepsReductionPercent").is_some() {
        tracing::debug!("dropped extraStepsReductionPercent (no counterpart in schema v2)");
    }
}

/// Merge a partial or legacy record over a complete default record
///
/// Every field present in `partial` overrides the default; every absent
/// field falls back to `defaults`. Unknown keys are ignored. The operation is
/// idempotent: merging an already merged record changes nothing.
pub fn merge_with_defaults(
    partial: &Value,
    defaults: &BusinessCaseData,
) -> Result<BusinessCaseData, SchemaError> {
    let fields = migrate(partial)?;

    let mut base = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        other => {
            return Err(SchemaError::NotAnObject {
                found: json_kind(&other),
            })
        }
    };

    let missing: Vec<&str> = base
        .keys()
        .filter(|k| !fields.contains_key(k.as_str()))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        tracing::debug!(?missing, "fields falling back to defaults");
    }

    for (key, value) in fields {
        if base.contains_key(&key) {
            base.insert(key, value);
        }
    }

    Ok(serde_json::from_value(Value::Object(base))?)
}

/// Serialize a record in the current schema, tagged with its version
pub fn to_record(data: &BusinessCaseData) -> Result<Value, SchemaError> {
    let mut value = serde_json::to_value(data)?;
    if let Value::Object(ref mut map) = value {
        map.insert(SCHEMA_VERSION_KEY.into(), CURRENT_SCHEMA_VERSION.into());
    }
    Ok(value)
}
