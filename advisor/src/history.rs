//! Sources of a farm's historical yield table.
//!
//! The table reaches the model as delimited text: one header row followed by
//! data rows. A source that cannot produce it fails with
//! [`AdvisorError::DataUnavailable`]; nothing is retried.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::AdvisorError;

#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Return the table serialized as CSV text.
    async fn load(&self) -> Result<String, AdvisorError>;
}

/// Table read from a CSV file such as `farm_data.csv`.
#[derive(Clone, Debug)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistorySource for CsvFileSource {
    async fn load(&self) -> Result<String, AdvisorError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            AdvisorError::DataUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        let table = reserialize(&raw)
            .map_err(|e| AdvisorError::DataUnavailable(format!("{}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), bytes = table.len(), "history table loaded");
        Ok(table)
    }
}

/// Table held in memory, e.g. supplied by another service.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    table: Option<String>,
}

impl StaticSource {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
        }
    }

    /// A source with no table at all.
    pub fn empty() -> Self {
        Self { table: None }
    }
}

#[async_trait]
impl HistorySource for StaticSource {
    async fn load(&self) -> Result<String, AdvisorError> {
        self.table
            .clone()
            .ok_or_else(|| AdvisorError::DataUnavailable("no historical table configured".into()))
    }
}

/// Parse `raw` as CSV with a header row and write it back out.
///
/// Rows must all have the header's width. Quoting and line endings are
/// normalized; cell contents are kept as-is.
pub fn reserialize(raw: &[u8]) -> Result<String, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(raw);
    let headers = reader.headers().map_err(|e| e.to_string())?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err("table has no header row".into());
    }

    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(&headers).map_err(|e| e.to_string())?;
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}
