use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::FeatureRow;
use crate::error::Result;

/// Sorts the feature table ascending by (set name, set number) for
/// reproducible output. The sort is stable, so dedup-order ties keep their
/// relative order.
pub fn sort(mut rows: Vec<FeatureRow>) -> Vec<FeatureRow> {
    rows.sort_by(|a, b| {
        (a.set_name.as_str(), a.set_number).cmp(&(b.set_name.as_str(), b.set_number))
    });
    rows
}

/// Writes the final feature table. Column selection and order come from the
/// `FeatureRow` field declaration order.
pub fn write_features(path: &Path, rows: &[FeatureRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(rows = rows.len(), path = %path.display(), "wrote feature table");
    Ok(())
}

/// Reads a previously written feature table back into memory.
pub fn read_features(path: &Path) -> Result<Vec<FeatureRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
