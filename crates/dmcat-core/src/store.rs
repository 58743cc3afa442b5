//! Store: the read-only, in-memory catalog of [`DamageRecord`] values.
//!
//! The store is the single source of truth; the CLI and HTTP layers read from
//! it, never from the data file directly. The file is read at most once per
//! store: the first successful [`RecordStore::load`] is cached and every later
//! call returns the cached slice. A failed load is not cached.
//!
//! # Source format
//!
//! The data file is a JSON array. Elements may themselves be arrays, nested to
//! any depth; they are flattened in order. Only object elements with an `id`
//! key become records, everything else is dropped without error.

use crate::config::DataConfig;
use crate::error::LoadError;
use crate::types::DamageRecord;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

type Loader = Box<dyn Fn(&[PathBuf]) -> Result<Vec<DamageRecord>, LoadError> + Send + Sync>;

/// Lazily-loaded catalog backed by an ordered list of candidate files.
///
/// Share one store per process (behind an `Arc`) so concurrent first callers
/// wait on the same read instead of each reading the file.
pub struct RecordStore {
    sources: Vec<PathBuf>,
    records: OnceLock<Vec<DamageRecord>>,
    /// Serialises first-time loads; the `OnceLock` alone cannot carry a
    /// fallible initialiser.
    init: Mutex<()>,
    loader: Loader,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("sources", &self.sources)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// A store that will read the first readable path in `sources`.
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_loader(sources, load_from_paths)
    }

    /// Like [`RecordStore::new`], with `loader` standing in for
    /// [`load_from_paths`]. The loader gets the candidate paths and runs at
    /// most once per successful load.
    pub fn with_loader<I, P, F>(sources: I, loader: F) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
        F: Fn(&[PathBuf]) -> Result<Vec<DamageRecord>, LoadError> + Send + Sync + 'static,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            records: OnceLock::new(),
            init: Mutex::new(()),
            loader: Box::new(loader),
        }
    }

    pub fn from_config(data: &DataConfig) -> Self {
        Self::new(data.candidate_paths.iter().cloned())
    }

    /// A store that is already loaded and never touches the filesystem.
    pub fn from_records(records: Vec<DamageRecord>) -> Self {
        let store = Self::new(Vec::<PathBuf>::new());
        // Freshly created, so the cell is empty.
        let _ = store.records.set(records);
        store
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn is_loaded(&self) -> bool {
        self.records.get().is_some()
    }

    /// Return the catalog, reading it from disk on the first call.
    pub fn load(&self) -> Result<&[DamageRecord], LoadError> {
        if let Some(records) = self.records.get() {
            return Ok(records.as_slice());
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished loading while we waited.
        if let Some(records) = self.records.get() {
            return Ok(records.as_slice());
        }

        let records = (self.loader)(&self.sources)?;
        Ok(self.records.get_or_init(|| records).as_slice())
    }

    /// Look up a record by exact id. The first occurrence in source order
    /// wins if ids repeat.
    pub fn find(&self, id: &str) -> Result<Option<&DamageRecord>, LoadError> {
        Ok(self.load()?.iter().find(|r| r.id == id))
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read and parse the first readable file among `sources`.
pub fn load_from_paths(sources: &[PathBuf]) -> Result<Vec<DamageRecord>, LoadError> {
    let result = read_first(sources).and_then(|(path, text)| {
        let records = load_from_str(&text, path)?;
        tracing::info!(path = %path.display(), records = records.len(), "catalog loaded");
        Ok(records)
    });
    if let Err(err) = &result {
        tracing::warn!(error = %err, "catalog load failed");
    }
    result
}

fn read_first(sources: &[PathBuf]) -> Result<(&Path, String), LoadError> {
    for path in sources {
        match std::fs::read_to_string(path) {
            Ok(text) => return Ok((path.as_path(), text)),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "candidate data path unreadable");
            }
        }
    }
    Err(LoadError::DataUnavailable {
        tried: sources.to_vec(),
    })
}

/// Parse catalog JSON text. `origin` only labels errors.
pub fn load_from_str(text: &str, origin: impl AsRef<Path>) -> Result<Vec<DamageRecord>, LoadError> {
    let origin = origin.as_ref();
    let value: Value =
        serde_json::from_str(text).map_err(|e| LoadError::malformed(origin, e.to_string()))?;
    match value {
        Value::Array(items) => Ok(records_from_items(items)),
        _ => Err(LoadError::malformed(origin, "top-level value is not an array")),
    }
}

/// Flatten `items` and keep the elements that are records.
pub fn records_from_items(items: Vec<Value>) -> Vec<DamageRecord> {
    let flat = flatten(items);
    let total = flat.len();
    let records: Vec<DamageRecord> = flat.into_iter().filter_map(into_record).collect();
    if records.len() < total {
        tracing::debug!(dropped = total - records.len(), "skipped catalog entries without an id");
    }
    records
}

/// Recursively flatten nested arrays, preserving element order.
pub fn flatten(items: Vec<Value>) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    flatten_into(items, &mut out);
    out
}

fn flatten_into(items: Vec<Value>, out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(inner) => flatten_into(inner, out),
            other => out.push(other),
        }
    }
}

fn into_record(value: Value) -> Option<DamageRecord> {
    match value {
        Value::Object(map) if map.contains_key("id") => {
            serde_json::from_value(Value::Object(map)).ok()
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
