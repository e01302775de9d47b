//! Persisted best times, one record per scenario.
//!
//! The store is a single JSON document that is read once per run and, on a
//! new best, rewritten whole.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::result::RunResult;

/// History store errors
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Best result recorded for a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    pub average_time: f64,
    pub times: Vec<f64>,
}

impl From<&RunResult> for BestRecord {
    fn from(result: &RunResult) -> Self {
        Self {
            average_time: result.average_time,
            times: result.times.clone(),
        }
    }
}

/// Scenario name to best record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryStore {
    records: BTreeMap<String, BestRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, scenario: &str) -> Option<&BestRecord> {
        self.records.get(scenario)
    }

    pub fn contains(&self, scenario: &str) -> bool {
        self.records.contains_key(scenario)
    }

    /// Insert or replace the record for `scenario`, returning the old one.
    pub fn insert(&mut self, scenario: impl Into<String>, record: BestRecord) -> Option<BestRecord> {
        self.records.insert(scenario.into(), record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read the store from `path`.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read the store, first writing an empty document if `path` is absent.
    pub fn load_or_init(path: &Path) -> Result<Self, HistoryError> {
        if !path.exists() {
            log::debug!("Creating empty history at {}", path.display());
            Self::new().save(path)?;
        }
        Self::load(path)
    }

    /// Serialize with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, HistoryError> {
        let mut buf = Vec::new();
        self.write_pretty(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Rewrite the whole document at `path`.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pretty(&mut writer)?;
        writer.flush()?;
        log::debug!("Saved {} best record(s) to {}", self.len(), path.display());
        Ok(())
    }

    fn write_pretty<W: Write>(&self, writer: &mut W) -> Result<(), HistoryError> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        self.serialize(&mut ser)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
