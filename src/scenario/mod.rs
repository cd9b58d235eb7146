//! Named scenario persistence
//!
//! The calculator never touches storage. Saved scenarios live behind the
//! [`ScenarioStore`] trait as raw JSON records keyed by name, so records
//! written by older schema versions can be migrated when they are loaded.
//!
//! Two stores are provided:
//! - [`MemoryStore`]: ordered in-memory map
//! - [`JsonFileStore`]: a single JSON object file, rewritten on every mutation
//!
//! Writes are last-writer-wins; there is no locking.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::data::schema::{self, SchemaError};
use crate::data::BusinessCaseData;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Scenario '{0}' not found")]
    NotFound(String),
    #[error("Scenario '{0}' already exists")]
    AlreadyExists(String),
    #[error("Scenario name must not be empty")]
    EmptyName,
    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Malformed scenario store: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid scenario record: {0}")]
    Schema(#[from] SchemaError),
}

/// Trimmed, non-empty scenario name
fn normalize(name: &str) -> Result<&str, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        Err(StoreError::EmptyName)
    } else {
        Ok(name)
    }
}

/// Key-value store of named scenario records
pub trait ScenarioStore {
    /// Scenario names in sorted order
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Raw record for `name`, if present
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or overwrite `name`
    fn put(&mut self, name: &str, record: Value) -> Result<(), StoreError>;

    /// Remove `name`; errors when absent
    fn delete(&mut self, name: &str) -> Result<(), StoreError>;

    /// Move a record to a new name
    ///
    /// Fails without changes when `to` already exists. Renaming to the same
    /// name is a no-op.
    fn rename(&mut self, from: &str, to: &str) -> Result<(), StoreError>;
}

// ============================================================================
// Shared map operations
// ============================================================================

fn map_put(map: &mut BTreeMap<String, Value>, name: &str, record: Value) -> Result<(), StoreError> {
    let name = normalize(name)?;
    map.insert(name.to_string(), record);
    tracing::info!(scenario = name, "Saved scenario");
    Ok(())
}

fn map_delete(map: &mut BTreeMap<String, Value>, name: &str) -> Result<(), StoreError> {
    let name = normalize(name)?;
    map.remove(name)
        .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
    tracing::info!(scenario = name, "Deleted scenario");
    Ok(())
}

fn map_rename(map: &mut BTreeMap<String, Value>, from: &str, to: &str) -> Result<(), StoreError> {
    let from = normalize(from)?;
    let to = normalize(to)?;
    if !map.contains_key(from) {
        return Err(StoreError::NotFound(from.to_string()));
    }
    if from == to {
        return Ok(());
    }
    if map.contains_key(to) {
        return Err(StoreError::AlreadyExists(to.to_string()));
    }
    if let Some(record) = map.remove(from) {
        map.insert(to.to_string(), record);
    }
    tracing::info!(from, to, "Renamed scenario");
    Ok(())
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scenarios: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl ScenarioStore for MemoryStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.scenarios.keys().cloned().collect())
    }

    fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.scenarios.get(normalize(name)?).cloned())
    }

    fn put(&mut self, name: &str, record: Value) -> Result<(), StoreError> {
        map_put(&mut self.scenarios, name, record)
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        map_delete(&mut self.scenarios, name)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), StoreError> {
        map_rename(&mut self.scenarios, from, to)
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Scenarios stored as one JSON object (`name -> record`) in a file
///
/// A missing file is an empty store. Every mutation reads the file, applies
/// the change and rewrites the whole object.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    fn read(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let map: Map<String, Value> = serde_json::from_str(&content)?;
        Ok(map.into_iter().collect())
    }

    fn write(&self, scenarios: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(scenarios)?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }

    fn mutate<F>(&mut self, op: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, Value>) -> Result<(), StoreError>,
    {
        let mut scenarios = self.read()?;
        op(&mut scenarios)?;
        self.write(&scenarios)
    }
}

impl ScenarioStore for JsonFileStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read()?.into_keys().collect())
    }

    fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        let name = normalize(name)?;
        Ok(self.read()?.remove(name))
    }

    fn put(&mut self, name: &str, record: Value) -> Result<(), StoreError> {
        self.mutate(|m| map_put(m, name, record))
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.mutate(|m| map_delete(m, name))
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), StoreError> {
        self.mutate(|m| map_rename(m, from, to))
    }
}

// ============================================================================
// Typed save/load
// ============================================================================

/// Save `data` under `name` as a current-version record
pub fn save_scenario<S: ScenarioStore + ?Sized>(
    store: &mut S,
    name: &str,
    data: &BusinessCaseData,
) -> Result<(), StoreError> {
    let record = schema::to_record(data)?;
    store.put(name, record)
}

/// Load `name` and merge it over the current defaults
///
/// Records written by older versions are migrated; fields they lack take
/// their default value.
pub fn load_scenario<S: ScenarioStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<BusinessCaseData, StoreError> {
    let record = store
        .get(name)?
        .ok_or_else(|| StoreError::NotFound(name.trim().to_string()))?;
    tracing::debug!(scenario = name.trim(), "Loading scenario");
    Ok(schema::merge_with_defaults(&record, &BusinessCaseData::default())?)
}
