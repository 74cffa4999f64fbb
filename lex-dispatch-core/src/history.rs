//! Search-history persistence
//!
//! Each search container keeps its history in its own JSON file,
//! `<dir>/<container>.search-history.json`, holding an array of
//! `{params, numResults}` records. Loading is defensive: records missing
//! either field are dropped with a warning instead of failing the load.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::params::Params;
use crate::selection::ContainerId;

/// One remembered search and how many results it produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub params: Params,
    pub num_results: usize,
}

/// File-backed search history for one container.
#[derive(Clone, Debug)]
pub struct SearchHistory {
    path: PathBuf,
}

impl SearchHistory {
    /// History stored under `dir` for the given container
    pub fn new(dir: impl Into<PathBuf>, container: &ContainerId) -> Self {
        let mut path = dir.into();
        path.push(format!("{container}.search-history.json"));
        Self { path }
    }

    /// The file this history reads and writes
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load all valid records.
    ///
    /// A missing file is an empty history. An unreadable file or a body
    /// that is not a JSON array surfaces as an error; individual invalid
    /// records are skipped with a warning.
    pub fn load(&self) -> io::Result<Vec<HistoryEntry>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };

        let records: Vec<Value> = serde_json::from_str(&raw)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<HistoryEntry>(record.clone()) {
                Ok(entry) => entries.push(entry),
                Err(_) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        record = %record,
                        "discarding invalid search-history record"
                    );
                }
            }
        }
        Ok(entries)
    }

    /// Append one search to the history file.
    pub fn record(&self, params: Params, num_results: usize) -> io::Result<()> {
        let mut entries = self.load()?;
        entries.push(HistoryEntry {
            params,
            num_results,
        });

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&entries)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(&self.path, body)
    }
}
