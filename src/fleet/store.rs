use crate::Result;
use crate::fleet::{ImoNumber, LookupResult, ShipRecord};
use crate::metrics::normalize;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;

/// Demo fleet embedded in the binary, keyed by IMO number.
const BUILTIN_FLEET: &str = include_str!("builtin_fleet.json");

/// A backing store that can produce raw ship records by IMO number.
///
/// The metrics engine never talks to a store directly; [`resolve`] owns the
/// fetch → normalize → classify pipeline, so a real store (parquet, HTTP,
/// whatever) can be substituted without touching anything downstream.
pub trait FleetStore {
    /// Fetch the raw, unnormalized record for a ship.
    fn fetch_raw(&self, imo: &ImoNumber) -> Result<LookupResult<Value>>;
}

/// Resolve a ship record: fetch the raw record, normalize its numeric
/// leaves, and classify it into its schema variant.
pub fn resolve(store: &dyn FleetStore, imo: &ImoNumber) -> Result<LookupResult<ShipRecord>> {
    log::debug!("resolving ship record for IMO {imo}");

    match store.fetch_raw(imo)? {
        LookupResult::NotFound => {
            log::debug!("no record for IMO {imo}");
            Ok(LookupResult::NotFound)
        }
        LookupResult::Found(raw) => {
            let normalized = normalize(&raw);
            let record = ShipRecord::classify(&normalized)?;
            Ok(LookupResult::Found(record))
        }
    }
}

/// In-memory store holding raw records keyed by IMO number.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create a store over the embedded demo fleet.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fleet data is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_FLEET)
    }

    /// Create a store from a JSON object mapping IMO numbers to records.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        let records: HashMap<String, Value> = serde_json::from_str(text).into_app_err("parsing fleet data")?;
        Ok(Self { records })
    }
}

impl FleetStore for MemoryStore {
    fn fetch_raw(&self, imo: &ImoNumber) -> Result<LookupResult<Value>> {
        Ok(self
            .records
            .get(imo.as_str())
            .map_or(LookupResult::NotFound, |record| LookupResult::Found(record.clone())))
    }
}

/// File-backed store reading a JSON fleet file on construction.
///
/// Stand-in for a real backing store; the file format is the same IMO-keyed
/// object the in-memory store uses.
#[derive(Debug, Clone)]
pub struct JsonStore {
    inner: MemoryStore,
}

impl JsonStore {
    /// Open a fleet file and load all records.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading fleet data from {path}"))?;
        let inner = MemoryStore::from_json(&text).into_app_err_with(|| format!("parsing fleet data from {path}"))?;
        log::debug!("loaded {} fleet record(s) from {path}", inner.records.len());
        Ok(Self { inner })
    }
}

impl FleetStore for JsonStore {
    fn fetch_raw(&self, imo: &ImoNumber) -> Result<LookupResult<Value>> {
        self.inner.fetch_raw(imo)
    }
}
