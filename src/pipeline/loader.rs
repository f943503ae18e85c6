//! Typed dataset loading into named in-memory tables

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use crate::pipeline::schema::TableSchema;

/// Named in-memory tables loaded from the source directory.
///
/// Tables are keyed by the name derived from their file name and hold
/// fully materialized frames with the schema's dtypes enforced.
#[derive(Debug, Default)]
pub struct DatasetStore {
    tables: HashMap<String, DataFrame>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every schema's file from `dir`, enforcing declared column types.
    /// A missing file or a value that fails to parse to its declared type is
    /// a load error naming the file at fault.
    pub fn load(dir: &Path, schemas: &[TableSchema]) -> Result<Self> {
        let mut store = Self::new();
        for schema in schemas {
            let key = schema.table_key()?;
            let path = dir.join(&schema.file_name);
            let df = read_typed_csv(&path, schema).with_context(|| {
                format!("Failed to load table '{}' from {}", key, path.display())
            })?;
            store.insert(&key, df);
        }
        Ok(store)
    }

    /// Register a table under a key, replacing any previous frame
    pub fn insert(&mut self, key: &str, df: DataFrame) {
        self.tables.insert(key.to_string(), df);
    }

    /// Look up a loaded table by key
    pub fn table(&self, key: &str) -> Result<&DataFrame> {
        self.tables.get(key).ok_or_else(|| {
            anyhow::anyhow!(
                "Table '{}' is not loaded. Available tables: {:?}",
                key,
                self.keys()
            )
        })
    }

    /// Table keys in sorted order for stable display
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tables.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Read one CSV with the schema's dtypes enforced.
///
/// The literal token `NA` is registered as a null value for every column,
/// matching how the source files encode missingness (this is what lets a
/// float column like `Conforming_Limit_000` carry `NA` cells). Whitespace
/// variants such as `"NA "` survive as text for the missing-value check.
fn read_typed_csv(path: &Path, schema: &TableSchema) -> Result<DataFrame> {
    let dtypes: SchemaRef = Arc::new(schema.to_polars());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(dtypes))
        .with_parse_options(
            CsvParseOptions::default()
                .with_null_values(Some(NullValues::AllColumnsSingle("NA".into()))),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}

/// Display per-table statistics for a loaded store
pub fn display_store_stats(store: &DatasetStore) {
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    for key in store.keys() {
        if let Ok(df) = store.table(key) {
            let (rows, cols) = df.shape();
            let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
            println!(
                "      {}: {} rows, {} columns ({:.2} MB)",
                style(key).white().bold(),
                rows,
                cols,
                memory_mb
            );
        }
    }
}
