use std::path::Path;

use csv::StringRecord;
use tracing::info;

use crate::error::{PipelineError, Result};

/// The raw card dataset exactly as read from durable storage: the header row
/// plus untyped records. The schema normalizer owns turning this into typed
/// cards.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

/// Reads the raw card dataset from `path`.
///
/// A missing or unreadable backing file is a `SourceUnavailable` error; the
/// pipeline aborts before any stage runs.
pub fn read_raw_cards(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(PipelineError::SourceUnavailable(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(false)
        .from_path(path)
        .map_err(|e| {
            PipelineError::SourceUnavailable(format!("cannot open {}: {}", path.display(), e))
        })?;

    let headers = reader
        .headers()
        .map_err(|e| {
            PipelineError::SourceUnavailable(format!("cannot read header row: {}", e))
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    info!(rows = rows.len(), "loaded raw card dataset");
    Ok(RawTable { headers, rows })
}
