//! Load-time error taxonomy.
//!
//! Only loading the catalog can fail. Matching and option collection are
//! total over any record the store hands out.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// None of the candidate source paths could be read.
    #[error("damage mechanism data file not found; tried: {}", display_paths(.tried))]
    DataUnavailable { tried: Vec<PathBuf> },

    /// The source was read but is not a JSON array.
    #[error("malformed data in {}: {reason}", .path.display())]
    MalformedData { path: PathBuf, reason: String },
}

impl LoadError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LoadError::MalformedData {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
