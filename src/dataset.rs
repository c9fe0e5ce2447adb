use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Read a whole input file into memory. The handle is closed before returning.
pub fn read_dataset(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read dataset {}", path.display()))?;
    debug!(path = %path.display(), bytes = raw.len(), "dataset read");
    Ok(raw)
}

/// Decode a top-level JSON array of records. Shape errors name the record index.
pub fn parse_record_array<T: DeserializeOwned>(raw: &str, what: &str) -> Result<Vec<T>> {
    let rows = serde_json::from_str::<Vec<Value>>(raw.trim())
        .with_context(|| format!("invalid {what} json (expected an array of objects)"))?;
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            serde_json::from_value::<T>(row).with_context(|| format!("{what} #{idx}"))
        })
        .collect()
}
