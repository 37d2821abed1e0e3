//! Loading analysis records from JSON files.
//!
//! Each input file may hold a single record, an array of records, or a
//! full analyzer response carrying `individual_results`. Directories are
//! walked for `*.json` files.

use crate::models::AnalysisRecord;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Records loaded for one comparison, in batch order.
#[derive(Debug, Clone, Default)]
pub struct LoadedBatch {
    pub records: Vec<AnalysisRecord>,
    /// Files the records came from, in read order.
    pub sources: Vec<String>,
}

/// Expand input paths into a list of JSON files.
///
/// Files are kept in argument order. Directories contribute their
/// `*.json` files sorted by path; hidden entries are skipped.
pub fn resolve_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = discover_json_files(input)?;
            if found.is_empty() {
                return Err(anyhow!("No .json files found in {}", input.display()));
            }
            debug!("Found {} record files in {}", found.len(), input.display());
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(anyhow!("Input not found: {}", input.display()));
        }
    }

    Ok(files)
}

fn discover_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|e| e.to_str()) == Some("json")
        {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn is_hidden(name: Option<&str>) -> bool {
    name.map(|n| n.starts_with('.')).unwrap_or(false)
}

/// Parse the records held in one JSON document.
pub fn parse_records(content: &str) -> Result<Vec<AnalysisRecord>> {
    let value: Value = serde_json::from_str(content).context("Invalid JSON")?;

    let records = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        Value::Object(ref map) if map.contains_key("individual_results") => {
            let results = map
                .get("individual_results")
                .cloned()
                .unwrap_or(Value::Null);
            serde_json::from_value(results).context("Malformed individual_results")?
        }
        Value::Object(_) => vec![serde_json::from_value(value)?],
        _ => return Err(anyhow!("Expected a record, an array of records, or an analyzer response")),
    };

    Ok(records)
}

/// Give unlabeled records a positional label (`Text 1`, `Text 2`, ...).
pub fn fill_missing_labels(records: &mut [AnalysisRecord]) {
    for (i, record) in records.iter_mut().enumerate() {
        if record.label.trim().is_empty() {
            record.label = format!("Text {}", i + 1);
        }
    }
}

/// Read and parse all files concurrently, preserving input order.
pub async fn load_records(paths: &[PathBuf]) -> Result<LoadedBatch> {
    let reads = paths.iter().map(|path| async move {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let records = parse_records(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded {} record(s) from {}", records.len(), path.display());
        Ok::<_, anyhow::Error>(records)
    });

    let per_file = futures::future::try_join_all(reads).await?;

    let mut batch = LoadedBatch {
        records: per_file.into_iter().flatten().collect(),
        sources: paths.iter().map(|p| p.display().to_string()).collect(),
    };
    fill_missing_labels(&mut batch.records);

    info!(
        "Loaded {} records from {} file(s)",
        batch.records.len(),
        batch.sources.len()
    );

    Ok(batch)
}
